use thiserror::Error;

/// Main error type for ghw operations
#[derive(Debug, Error)]
pub enum GhwError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("http {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl GhwError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::NetworkError(msg.into())
    }

    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn http_status<S: Into<String>>(status: u16, url: S) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
        }
    }

    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::DecodeError(msg.into())
    }

    /// True for failures that happen before any request is sent
    pub fn is_config(&self) -> bool {
        matches!(self, Self::ConfigError(_) | Self::InvalidUrl(_))
    }
}

/// Result type alias for ghw operations
pub type Result<T> = std::result::Result<T, GhwError>;
