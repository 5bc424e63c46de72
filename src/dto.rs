use serde::{Deserialize, Serialize};

/// Data transfer object for requesting flashcards
///
/// This struct is serialized as the JSON body of `POST /generate`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GenerateDto {
    /// The trimmed study notes
    pub notes: String,
}

/// Data transfer object for a plain server message
///
/// Returned on success by `/register`, `/login`, `/logout` and `/payment-success`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageDto {
    pub message: String,
}

/// Data transfer object for a server rejection
///
/// Every endpoint reports failures as `{"error": "..."}`. The field is
/// optional because a failing server is not guaranteed to send it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ErrorDto {
    pub error: Option<String>,
}
