use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Sneaker not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("AI identification failed: {0}")]
    Identify(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;
