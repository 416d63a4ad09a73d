use thiserror::Error;

/// Errors produced by model constructors and loaders.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid promo id `{0}`")]
    InvalidId(String),

    #[cfg(feature = "serde")]
    #[error("malformed promo json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
