use thiserror::Error;

#[derive(Error, Debug)]
pub enum HppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Input error: {0}")]
    Input(String),
    #[error("PostDictKeyError: {0} must be present in the response payload")]
    MissingField(String),
    #[error("Signature mismatch: expected {expected}, received {received}")]
    SignatureMismatch { expected: String, received: String },
    #[error("Payload error: {0}")]
    Payload(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HppError>;
