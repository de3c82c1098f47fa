use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Text diff generation failed: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Comparer is missing its base batch")]
    MissingBase,
}

pub type Result<T> = std::result::Result<T, DiffError>;
