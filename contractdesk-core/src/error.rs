use thiserror::Error;
use uuid::Uuid;

use crate::models::Category;

/// Rejections raised by the contract form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractFormError {
    #[error("no contract form is open")]
    NotOpen,

    #[error("acceptance date is required for completed contracts")]
    AcceptanceDateRequired,

    #[error("contract {0} no longer exists")]
    ContractNotFound(Uuid),
}

/// Rejections raised by the master-data screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MasterDataError {
    #[error("{operation} is not available for {category}")]
    UnsupportedOperation {
        category: Category,
        operation: &'static str,
    },

    #[error("every row needs a code and a name")]
    MissingCodeOrName,

    #[error("code {0} already exists")]
    DuplicateCode(String),

    #[error("no edit dialog is open")]
    ModalNotOpen,

    #[error("row {0} not found")]
    RowNotFound(Uuid),

    #[error("no delete is awaiting confirmation")]
    NoPendingDelete,
}

/// Rejections raised by user and group administration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("{0} is required")]
    MissingRequiredField(&'static str),

    #[error("username {0} is already taken")]
    DuplicateUsername(String),

    #[error("no edit dialog is open")]
    NotOpen,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hash(String),
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AuthError::Hash(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export payload: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize details: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}
