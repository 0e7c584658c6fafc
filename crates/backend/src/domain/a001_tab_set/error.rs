use contracts::domain::a001_tab_set::{TabSetId, TabSetValidationError};
use thiserror::Error;

/// Failures of the tab set store
#[derive(Debug, Error)]
pub enum TabSetError {
    #[error(transparent)]
    Validation(#[from] TabSetValidationError),

    #[error("Tab set not found: {0}")]
    NotFound(TabSetId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sea_orm::DbErr> for TabSetError {
    fn from(e: sea_orm::DbErr) -> Self {
        TabSetError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for TabSetError {
    fn from(e: serde_json::Error) -> Self {
        TabSetError::Storage(format!("corrupt tabs column: {}", e))
    }
}
