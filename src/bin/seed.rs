use inventory_api::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
    services::auth_service::hash_password,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let user_id = ensure_user(&pool, "Eureka", "eureka@example.com", "eur@2026").await?;
    seed_kategori(&pool).await?;

    println!("Seed completed. User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &DbPool,
    nama_user: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i32> {
    if let Some((id,)) = sqlx::query_as::<_, (i32,)>("SELECT id_user FROM tbl_user WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?
    {
        return Ok(id);
    }

    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let (id,): (i32,) = sqlx::query_as(
        "INSERT INTO tbl_user (nama_user, email, password) VALUES ($1, $2, $3) RETURNING id_user",
    )
    .bind(nama_user)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

async fn seed_kategori(pool: &DbPool) -> anyhow::Result<()> {
    for nama in ["Makanan", "Minuman", "Alat Tulis"] {
        sqlx::query(
            r#"
            INSERT INTO tbl_kategori (nama_kategori)
            SELECT $1::varchar
            WHERE NOT EXISTS (SELECT 1 FROM tbl_kategori WHERE nama_kategori = $1::varchar)
            "#,
        )
        .bind(nama)
        .execute(pool)
        .await?;
    }

    println!("Seeded kategori");
    Ok(())
}
