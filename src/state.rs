use crate::errors::AppError;
use crate::storage::Database;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub database: Option<Database>,
    pub api_base: Option<Arc<str>>,
}

impl AppState {
    pub fn new(database: Option<Database>, api_base: Option<String>) -> Self {
        Self {
            database,
            api_base: api_base.map(Arc::from),
        }
    }

    pub fn database(&self) -> Result<&Database, AppError> {
        self.database.as_ref().ok_or_else(AppError::not_configured)
    }
}
