use thiserror::Error;

#[derive(Error, Debug)]
pub enum VigilError {
    #[error("Unsupported LLM backend kind: {0}")]
    UnsupportedBackendKind(String),

    #[error("LLM backend call failed: {0}")]
    BackendCallFailed(String),

    #[error("Malformed LLM backend response: {0}")]
    MalformedBackendResponse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, VigilError>;
