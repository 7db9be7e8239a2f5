use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::net::SocketAddr;

use inventory_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    routes::{create_service, doc::DOCS_PATH},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,inventory_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let pool = create_pool(&config).await?;
    run_migrations(&pool).await?;

    let state = AppState::new(&config, pool);
    state.uploads.ensure_dir().await?;

    let app = create_service(state);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("listening on http://{}", addr);
    tracing::info!("API docs at http://{}{}", addr, DOCS_PATH);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
