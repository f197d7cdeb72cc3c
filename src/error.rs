use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum GenerateError {
    ValidationError(String),
    EncodingError(String),
    NetworkError(String),
    ServerError { status: u16, detail: String },
    ClientConfigError(String),
    MalformedResponseError(String),
}

impl GenerateError {
    /// Stable category name used for display and log filtering.
    pub fn category(&self) -> &'static str {
        match self {
            GenerateError::ValidationError(_) => "validation",
            GenerateError::EncodingError(_) => "encoding",
            GenerateError::NetworkError(_) => "network",
            GenerateError::ServerError { .. } => "server",
            GenerateError::ClientConfigError(_) => "client-config",
            GenerateError::MalformedResponseError(_) => "malformed-response",
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            GenerateError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            GenerateError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            GenerateError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            GenerateError::ServerError { status, detail } => {
                write!(f, "Server error ({}): {}", status, detail)
            }
            GenerateError::ClientConfigError(msg) => write!(f, "Client config error: {}", msg),
            GenerateError::MalformedResponseError(msg) => {
                write!(f, "Malformed response: {}", msg)
            }
        }
    }
}

impl std::error::Error for GenerateError {}

pub type Result<T> = std::result::Result<T, GenerateError>;
