use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop a user action from completing
///
/// The variants follow how the failure is reported to the user: local
/// validation messages are shown verbatim, server rejections carry the
/// server's own text, and transport failures are shown with an `Error: `
/// prefix.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Rejected locally, before any request was sent
    #[error("{0}")]
    Validation(String),
    /// Server returned a non-success status
    #[error("Server error ({}): {message}", .status.as_u16())]
    Server { status: StatusCode, message: String },
    /// Network/connection failure or an unreadable response body
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    /// A page attribute the action depends on is absent
    #[error("Page attribute {0} is missing")]
    MissingAttribute(String),
    /// The payment widget could not be opened
    #[error("Payment widget error: {0}")]
    Widget(#[from] anyhow::Error),
}

impl ClientError {
    /// Returns true if the request never got a usable answer from the server
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Request(_))
    }

    /// Gets the server's message for a rejected request
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Server { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Formats the error the way most actions alert it: `Error: <message>`
    ///
    /// Validation errors are returned as-is since they are already phrased
    /// for the user.
    pub fn prefixed_alert(&self) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Server { message, .. } => format!("Error: {}", message),
            other => format!("Error: {}", other),
        }
    }
}
