//! Error types for the KERI library

use thiserror::Error;

/// Error types for the KERI library
#[derive(Error, Debug)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(String),
    
    #[error("parsing error: {0}")]
    Parsing(String),
    
    #[error("crypto error: {0}")]
    Crypto(String),
    
    #[error("general error: {0}")]
    Other(String),
}

/// Result type for KERI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for CESR primitive (Matter-family) material: malformed codes,
/// mis-sized raw material, and codec failures raised while building or
/// parsing qb64/qb64b/qb2 representations.
#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum MatterError {
    #[error("empty material: {0}")]
    EmptyMaterial(String),

    #[error("empty material: {0}")]
    EmptyMaterialError(String),

    #[error("type error: {0}")]
    TypeError(String),

    #[error("invalid code: {0}")]
    InvalidCode(String),

    #[error("invalid variable raw size: {0}")]
    InvalidVarRawSize(String),

    #[error("invalid variable index: {0}")]
    InvalidVarIndex(String),

    #[error("invalid variable index: {0}")]
    InvalidVarIndexError(String),

    #[error("invalid code size: {0}")]
    InvalidCodeSize(String),

    #[error("invalid code size: {0}")]
    InvalidCodeSizeError(String),

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength { expected: usize, actual: usize },

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid soft material: {0}")]
    InvalidSoft(String),

    #[error("invalid soft material: {0}")]
    InvalidSoftError(String),

    #[error("invalid base64")]
    InvalidBase64,

    #[error("invalid base64 index: {0}")]
    InvalidBase64Index(String),

    #[error("invalid format")]
    InvalidFormat,

    #[error("unexpected code: {0}")]
    UnexpectedCode(String),

    #[error("unexpected code: {0}")]
    UnexpectedCodeError(String),

    #[error("unexpected count code: {0}")]
    UnexpectedCountCode(String),

    #[error("unexpected count code: {0}")]
    UnexpectedCountCodeError(String),

    #[error("unexpected op code: {0}")]
    UnexpectedOpCode(String),

    #[error("unexpected op code: {0}")]
    UnexpectedOpCodeError(String),

    #[error("unsupported code: {0}")]
    UnsupportedCodeError(String),

    #[error("short count, need more material: {0}")]
    Shortage(String),

    #[error("short count, need more material: {0}")]
    ShortageError(String),

    #[error("need more data: {0}")]
    NeedMoreDataError(String),

    #[error("cold start error: {0}")]
    ColdStartError(String),

    #[error("raw material error: {0}")]
    RawMaterial(String),

    #[error("raw material error: {0}")]
    RawMaterialError(String),

    #[error("soft material error: {0}")]
    SoftMaterial(String),

    #[error("soft material error: {0}")]
    SoftMaterialError(String),

    #[error("conversion error: {0}")]
    Conversion(String),

    #[error("conversion error: {0}")]
    ConversionError(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("value error: {0}")]
    ValueError(String),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("verification error: {0}")]
    VerificationError(String),

    #[error("crypto error: {0}")]
    CryptoError(String),

    #[error("secp256k1 error: {0}")]
    Secp256k1Error(String),

    #[error("secp256r1 error: {0}")]
    Secp256r1Error(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),
}
