use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("no recommendations to display")]
    EmptyInput,

    #[error("{endpoint} failed: {message}")]
    UpstreamFailure { endpoint: String, message: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

impl DashError {
    pub fn upstream(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamFailure {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

pub type DashResult<T> = std::result::Result<T, DashError>;
