use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn, create_orm_conn},
    services::token_service::TokenKeys,
    upload::UploadStore,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub tokens: Arc<TokenKeys>,
    pub uploads: UploadStore,
}

impl AppState {
    pub fn new(config: &AppConfig, pool: DbPool) -> Self {
        let orm = create_orm_conn(&pool);
        Self {
            pool,
            orm,
            tokens: Arc::new(TokenKeys::new(config.jwt_secret.as_bytes())),
            uploads: UploadStore::new(config.upload_dir.clone()),
        }
    }
}
