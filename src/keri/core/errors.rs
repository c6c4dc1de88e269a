use crate::errors::MatterError;
use thiserror::Error;

/// Error taxonomy for Mapper/Partor field map serialization.
#[allow(dead_code)]
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("empty material: {0}")]
    EmptyMaterial(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("deserialize error: {0}")]
    Deserialize(String),

    #[error("serialize error: {0}")]
    Serialize(String),

    #[error(transparent)]
    Matter(#[from] MatterError),
}

#[allow(dead_code)]
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid code: {0}")]
    InvalidCode(String),

    #[error("Invalid code: {0}")]
    NotRelativePath(String),

    #[error("Invalid code: {0}")]
    IoError(String),

    #[error("Invalid code: {0}")]
    OtherError(String),

    #[error("Invalid code: {0}")]
    PermissionError(String),

    #[error("Invalid code: {0}")]
    FilerError(String),
}
