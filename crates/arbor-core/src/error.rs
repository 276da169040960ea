use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArborError {
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),
    #[error("default provider has no tier mapping: {0}")]
    MissingDefaultProvider(String),
    #[error("invalid model catalog: {0}")]
    InvalidCatalog(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ArborError>;
