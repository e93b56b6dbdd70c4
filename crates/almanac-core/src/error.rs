use thiserror::Error;

/// Errors raised at the edges of the engine: configuration and event ingestion.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid event '{id}': {reason}")]
    InvalidEvent { id: String, reason: &'static str },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
