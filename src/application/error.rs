use thiserror::Error;

use crate::domain::{DomainError, IndexError, ValidationError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid item: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid row: {0}")]
    Index(#[from] IndexError),

    #[error("Invalid amount: {0}")]
    Domain(#[from] DomainError),

    #[error("Stored bill contains an invalid item: {0}")]
    InvalidStoredItem(ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
