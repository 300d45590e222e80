use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::token_service::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub orm: Arc<DatabaseConnection>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            orm: Arc::new(orm),
            tokens,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.orm
    }
}
