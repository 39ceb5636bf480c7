use thiserror::Error;

pub type Result<T> = std::result::Result<T, TicketmasterError>;

#[derive(Debug, Error)]
pub enum TicketmasterError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TicketmasterError {
    fn from(err: reqwest::Error) -> Self {
        TicketmasterError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for TicketmasterError {
    fn from(err: serde_json::Error) -> Self {
        TicketmasterError::Parse(err.to_string())
    }
}
