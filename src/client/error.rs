use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// 401, 403
    #[error("Auth error ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{code} ({status}): {message}")]
    Server {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Invalid path: {0}")]
    Path(String),

    #[error("Invalid request: {0}")]
    Request(String),

    #[error("Invalid response ({status}): {message}")]
    InvalidResponse { status: u16, message: String },
}

impl ClientError {
    pub fn code(&self) -> &str {
        match self {
            ClientError::Auth { .. } => "AUTH_ERROR",
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::Server { code, .. } => code,
            ClientError::Path(_) => "INVALID_PATH",
            ClientError::Request(_) => "INVALID_REQUEST",
            ClientError::InvalidResponse { .. } => "INVALID_RESPONSE",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Auth { status, .. }
            | ClientError::Server { status, .. }
            | ClientError::InvalidResponse { status, .. } => Some(*status),
            ClientError::Network(err) => err.status().map(|s| s.as_u16()),
            ClientError::Path(_) | ClientError::Request(_) => None,
        }
    }
}
