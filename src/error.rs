use chromiumoxide::error::CdpError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("browser error: {0}")]
    Browser(#[from] CdpError),

    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("failed to load {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("login failed: {0}")]
    Login(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid reservation request: {0}")]
    InvalidRequest(String),

    #[error("notification failed: {0}")]
    Notify(String),

    #[error("script result could not be decoded: {0}")]
    Script(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReservationError>;
