//! Error types for the DOMS client

use thiserror::Error;

/// Result type alias for DOMS client operations
pub type Result<T> = std::result::Result<T, DomsError>;

/// Errors that can occur when talking to the DOMS repository
#[derive(Error, Debug)]
pub enum DomsError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The repository rejected the supplied credentials
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The addressed object, template or datastream does not exist
    #[error("invalid resource: {0}")]
    InvalidResource(String),

    /// The repository failed to carry out the method
    #[error("method failed ({status}): {message}")]
    MethodFailed { status: u16, message: String },

    /// The PID generator service failed to allocate a PID
    #[error("PID generation failed: {0}")]
    PidGenerator(String),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid client configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl DomsError {
    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DomsError::MethodFailed { status, .. } => Some(*status),
            DomsError::InvalidCredentials(_) => Some(401),
            DomsError::InvalidResource(_) => Some(404),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomsError::InvalidResource("doms:Template_Newspaper".to_string());
        assert!(err.to_string().contains("invalid resource"));

        let err = DomsError::MethodFailed {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.status_code(), Some(500));
    }
}
