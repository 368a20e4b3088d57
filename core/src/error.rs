use thiserror::Error;

/// Failure raised while configuring, opening, or consuming a chat stream.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
    #[error("Stream error: {0}")]
    StreamError(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ChatError {
    /// True when the failure came from the remote side or the wire rather
    /// than from local configuration or the terminal.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            ChatError::ApiError(_)
                | ChatError::NetworkError(_)
                | ChatError::SerializationError(_)
                | ChatError::StreamError(_)
        )
    }
}
