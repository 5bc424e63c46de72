use reqwest::Client;
use tracing::debug;

use crate::dto::{ErrorDto, GenerateDto, MessageDto};
use crate::errors::ClientError;
use crate::models::{Credentials, FlashcardItem, NotesInput, PaymentSession};

/// Fallback texts used when a rejection carries no `error` field
pub const GENERATE_FAILED: &str = "Failed to generate flashcards";
pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const LOGOUT_FAILED: &str = "Logout failed";
pub const PAYMENT_INIT_FAILED: &str = "Failed to initialize payment";
pub const PAYMENT_CONFIRM_FAILED: &str = "Payment confirmation failed";

/// Extension trait for checking HTTP responses and extracting server error messages
trait ResponseExt {
    /// Checks for error status and extracts the server's error message body
    ///
    /// `fallback` is used when the body has no `error` text.
    async fn check(self, fallback: &str) -> Result<reqwest::Response, ClientError>;
}

impl ResponseExt for reqwest::Response {
    async fn check(self, fallback: &str) -> Result<reqwest::Response, ClientError> {
        if self.status().is_success() {
            return Ok(self);
        }
        let status = self.status();
        let message = match self.json::<ErrorDto>().await {
            Ok(ErrorDto { error: Some(error) }) => error,
            Ok(_) => fallback.to_string(),
            Err(err) => {
                debug!("unreadable error body from server: {}", err);
                fallback.to_string()
            }
        };
        Err(ClientError::Server { status, message })
    }
}

/// HTTP client wrapper for communicating with the Flashnotes server
///
/// Cloning is cheap and clones share the same connection pool and cookie
/// store, so a session started by [`FlashnotesClient::login`] is visible to
/// every clone.
#[derive(Clone, Debug)]
pub struct FlashnotesClient {
    /// The base URL of the server (e.g. "http://localhost:5000")
    base_url: String,
    /// The underlying HTTP client
    client: Client,
}

impl FlashnotesClient {
    /// Creates a new FlashnotesClient
    ///
    /// ### Arguments
    ///
    /// * `base_url` - The base URL of the Flashnotes server
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { base_url, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ── Flashcards ───────────────────────────────────────────────────

    /// Asks the server to turn notes into flashcards
    pub async fn generate(&self, notes: &NotesInput) -> Result<Vec<FlashcardItem>, ClientError> {
        let dto = GenerateDto {
            notes: notes.as_str().to_string(),
        };
        let response = self.client.post(self.url("/generate")).json(&dto).send().await?.check(GENERATE_FAILED).await?;
        Ok(response.json().await?)
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Logs in; the session cookie is kept by the client
    ///
    /// The success body is not inspected.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ClientError> {
        self.client.post(self.url("/login")).json(credentials).send().await?.check(LOGIN_FAILED).await?;
        Ok(())
    }

    /// Registers a new account and returns the server's confirmation message
    pub async fn register(&self, credentials: &Credentials) -> Result<String, ClientError> {
        let response = self.client.post(self.url("/register")).json(credentials).send().await?.check(REGISTER_FAILED).await?;
        let body: MessageDto = response.json().await?;
        Ok(body.message)
    }

    /// Ends the current session
    ///
    /// Any non-success status is reported as [`LOGOUT_FAILED`]; the body is ignored.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.client.post(self.url("/logout")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Server {
                status,
                message: LOGOUT_FAILED.to_string(),
            });
        }
        Ok(())
    }

    // ── Payments ─────────────────────────────────────────────────────

    /// Opens a checkout session on the server
    pub async fn initialize_payment(&self) -> Result<PaymentSession, ClientError> {
        let response = self.client.post(self.url("/initialize-payment"))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send().await?
            .check(PAYMENT_INIT_FAILED).await?;
        Ok(response.json().await?)
    }

    /// Tells the server the checkout completed and returns its message
    pub async fn confirm_payment(&self) -> Result<String, ClientError> {
        let response = self.client.post(self.url("/payment-success")).send().await?.check(PAYMENT_CONFIRM_FAILED).await?;
        let body: MessageDto = response.json().await?;
        Ok(body.message)
    }
}
