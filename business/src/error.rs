use std::time::Duration;

use quickqr_clipboard::ClipboardError;
use thiserror::Error;

use crate::http::HttpError;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error - please check your connection and try again.";
pub const TIMEOUT_MESSAGE: &str = "Request timed out - please try again.";
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input - please enter a valid text or URL.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error - please try again later.";
pub const GENERIC_ERROR_MESSAGE: &str = "Please try again with valid input.";

/// Everything that can go wrong while asking the endpoint for a QR code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// The endpoint could not be reached.
    #[error("Failed to fetch: {0}")]
    Network(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    /// Non-2xx response.
    #[error("Failed to generate QR code: {status} - {body}")]
    Remote { status: u16, body: String },
    /// 2xx response without a usable `qr_code_url`.
    #[error("Invalid response format - {0}")]
    MalformedResponse(String),
    /// The request body could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl GenerateError {
    /// Text shown to the user, chosen from the error kind.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_owned(),
            Self::Timeout(_) => TIMEOUT_MESSAGE.to_owned(),
            Self::Remote { status: 400, .. } => INVALID_INPUT_MESSAGE.to_owned(),
            Self::Remote { status, .. } if *status >= 500 => SERVER_ERROR_MESSAGE.to_owned(),
            Self::Remote { .. } | Self::MalformedResponse(_) => self.to_string(),
            Self::InvalidRequest(_) => GENERIC_ERROR_MESSAGE.to_owned(),
        }
    }
}

/// Failures of the download and copy actions. Never shown to the user directly.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("No QR code to act on")]
    NoImage,
    #[error(transparent)]
    Fetch(#[from] GenerateError),
    #[error("Failed to save QR code: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    #[error("Clipboard task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<HttpError> for GenerateError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Timeout(limit) => Self::Timeout(limit),
            HttpError::Transport(message) => Self::Network(message),
        }
    }
}
