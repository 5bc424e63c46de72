use serde::{Deserialize, Serialize};

use crate::errors::ClientError;

/// Minimum number of characters a password must have before it is sent
pub const MIN_PASSWORD_LEN: usize = 6;

/// Alert shown when the notes field is empty
pub const EMPTY_NOTES_MESSAGE: &str = "Please enter study notes!";

/// Alert shown when a password is too short
pub const SHORT_PASSWORD_MESSAGE: &str = "Password must be at least 6 characters long";

/// Study notes ready to be submitted for flashcard generation
///
/// Only constructible through [`NotesInput::parse`], so a value of this type
/// always holds non-empty, trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesInput(String);

impl NotesInput {
    /// Trims the raw field value and rejects it if nothing is left
    ///
    /// ### Arguments
    ///
    /// * `raw` - The text as typed into the notes field
    ///
    /// ### Returns
    ///
    /// The trimmed notes, or `ClientError::Validation` if they are blank
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ClientError::Validation(EMPTY_NOTES_MESSAGE.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Gets the trimmed notes text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A question/answer pair produced by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardItem {
    /// Shown on the front of the card
    pub question: String,
    /// Shown on the back of the card
    pub answer: String,
}

impl FlashcardItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Email and password pair used by login and registration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

// Keeps passwords out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Builds credentials after checking the password length
    ///
    /// The email is passed through untouched; the server owns its validation.
    ///
    /// ### Arguments
    ///
    /// * `email` - The email as typed
    /// * `password` - The password as typed
    ///
    /// ### Returns
    ///
    /// The credentials, or `ClientError::Validation` if the password has
    /// fewer than [`MIN_PASSWORD_LEN`] characters
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, ClientError> {
        let password = password.into();
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::Validation(SHORT_PASSWORD_MESSAGE.to_string()));
        }
        Ok(Self {
            email: email.into(),
            password,
        })
    }
}

/// A checkout session handed out by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSession {
    /// Handle the payment widget opens to complete the checkout
    pub authorization_url: String,
}
