use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::client::FlashnotesClient;
use crate::errors::ClientError;
use crate::models::{Credentials, NotesInput, PaymentSession};
use crate::page::{
    Page, Surface, FLASHCARD_CONTAINER, LOGIN_EMAIL_FIELD, LOGIN_PASSWORD_FIELD, NOTES_FIELD,
    PUBLIC_KEY_ATTRIBUTE, REGISTER_EMAIL_FIELD, REGISTER_PASSWORD_FIELD, USER_EMAIL_ATTRIBUTE,
};
use crate::payment::{
    CheckoutCallbacks, CheckoutOptions, CheckoutSettings, PaymentWidget, PAYMENT_CANCELLED_MESSAGE,
};

/// Event handlers of the Flashnotes page
///
/// Each handler reads its inputs from the page, validates them, makes one
/// request and then updates the page or alerts the user. Failures are alerted
/// before they are returned, so callers only need the `Result` to know what
/// happened.
///
/// Handlers take `&self`: the same action can be running twice at once, and
/// whichever response arrives last is the one left on the page.
pub struct ClientController<S, W> {
    client: FlashnotesClient,
    page: Arc<Mutex<Page>>,
    surface: Arc<S>,
    widget: W,
    checkout: CheckoutSettings,
}

impl<S, W> ClientController<S, W>
where
    S: Surface + 'static,
    W: PaymentWidget,
{
    /// Creates a controller over an empty page
    ///
    /// ### Arguments
    ///
    /// * `client` - Client for the Flashnotes server
    /// * `surface` - Where alerts and reloads go
    /// * `widget` - The checkout UI used by [`ClientController::initialize_payment`]
    pub fn new(client: FlashnotesClient, surface: Arc<S>, widget: W) -> Self {
        Self {
            client,
            page: Arc::new(Mutex::new(Page::new())),
            surface,
            widget,
            checkout: CheckoutSettings::default(),
        }
    }

    /// Replaces the page the handlers work against
    pub fn with_page(mut self, page: Page) -> Self {
        self.page = Arc::new(Mutex::new(page));
        self
    }

    /// Overrides the currency and amount used for checkouts
    pub fn with_checkout_settings(mut self, settings: CheckoutSettings) -> Self {
        self.checkout = settings;
        self
    }

    /// Shared handle to the page view model
    pub fn page(&self) -> Arc<Mutex<Page>> {
        self.page.clone()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Types a value into an input field
    pub async fn set_field(&self, id: &str, value: impl Into<String>) {
        self.page.lock().await.set_field(id, value);
    }

    fn alert(&self, message: &str) {
        debug!("alert: {}", message);
        self.surface.alert(message);
    }

    // ── Flashcards ───────────────────────────────────────────────────

    /// Sends the notes field to the server and renders the returned cards
    ///
    /// ### Returns
    ///
    /// The number of cards now in the flashcard container
    #[instrument(skip(self))]
    pub async fn generate_flashcards(&self) -> Result<usize, ClientError> {
        let raw = self.page.lock().await.field(NOTES_FIELD).to_string();
        let notes = match NotesInput::parse(&raw) {
            Ok(notes) => notes,
            Err(err) => {
                self.alert(&err.prefixed_alert());
                return Err(err);
            }
        };

        info!("Generating flashcards from {} characters of notes", notes.as_str().len());
        let items = match self.client.generate(&notes).await {
            Ok(items) => items,
            Err(err) => {
                warn!("Flashcard generation failed: {}", err);
                self.alert(&err.prefixed_alert());
                return Err(err);
            }
        };

        let count = items.len();
        self.page.lock().await.replace_cards(items);
        info!("Rendered {} cards into {}", count, FLASHCARD_CONTAINER);
        Ok(count)
    }

    /// Turns over one card in the flashcard container
    ///
    /// ### Returns
    ///
    /// The card's new flipped state, or `None` if there is no card at `index`
    pub async fn flip_card(&self, index: usize) -> Option<bool> {
        self.page.lock().await.flip(index)
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Logs in with the login form and reloads the page on success
    #[instrument(skip(self))]
    pub async fn login(&self) -> Result<(), ClientError> {
        let credentials = self.read_credentials(LOGIN_EMAIL_FIELD, LOGIN_PASSWORD_FIELD).await?;

        info!(email = %credentials.email, "Logging in");
        match self.client.login(&credentials).await {
            Ok(()) => {
                info!("Login succeeded, reloading");
                self.surface.reload();
                Ok(())
            }
            Err(err) => {
                warn!("Login failed: {}", err);
                self.alert(&auth_alert(&err));
                Err(err)
            }
        }
    }

    /// Registers with the register form, then closes its modal
    ///
    /// ### Returns
    ///
    /// The server's confirmation message
    #[instrument(skip(self))]
    pub async fn register(&self) -> Result<String, ClientError> {
        let credentials = self.read_credentials(REGISTER_EMAIL_FIELD, REGISTER_PASSWORD_FIELD).await?;

        info!(email = %credentials.email, "Registering");
        match self.client.register(&credentials).await {
            Ok(message) => {
                self.alert(&message);
                self.close_modal("register").await;
                Ok(message)
            }
            Err(err) => {
                warn!("Registration failed: {}", err);
                self.alert(&auth_alert(&err));
                Err(err)
            }
        }
    }

    /// Ends the session and reloads the page on success
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ClientError> {
        info!("Logging out");
        match self.client.logout().await {
            Ok(()) => {
                self.surface.reload();
                Ok(())
            }
            Err(err) => {
                warn!("Logout failed: {}", err);
                self.alert(&auth_alert(&err));
                Err(err)
            }
        }
    }

    async fn read_credentials(&self, email_id: &str, password_id: &str) -> Result<Credentials, ClientError> {
        let (email, password) = {
            let page = self.page.lock().await;
            (page.field(email_id).to_string(), page.field(password_id).to_string())
        };
        Credentials::new(email, password).inspect_err(|err| self.alert(&err.prefixed_alert()))
    }

    // ── Payments ─────────────────────────────────────────────────────

    /// Opens a checkout session and hands it to the payment widget
    ///
    /// The confirmation request is only made if the widget reports the
    /// checkout as completed.
    #[instrument(skip(self))]
    pub async fn initialize_payment(&self) -> Result<PaymentSession, ClientError> {
        info!("Initializing payment");
        let session = match self.client.initialize_payment().await {
            Ok(session) => session,
            Err(err) => {
                warn!("Payment initialization failed: {}", err);
                self.alert(&err.prefixed_alert());
                return Err(err);
            }
        };

        let (public_key, email) = {
            let page = self.page.lock().await;
            (
                page.attribute(PUBLIC_KEY_ATTRIBUTE).map(str::to_string),
                page.attribute(USER_EMAIL_ATTRIBUTE).map(str::to_string),
            )
        };
        let Some(public_key) = public_key else {
            let err = ClientError::MissingAttribute(PUBLIC_KEY_ATTRIBUTE.to_string());
            self.alert(&err.prefixed_alert());
            return Err(err);
        };

        let options = CheckoutOptions {
            public_key,
            authorization_url: session.authorization_url.clone(),
            email,
            amount: self.checkout.amount,
            currency: self.checkout.currency.clone(),
        };

        debug!(amount = options.amount, currency = %options.currency, "Opening checkout");
        if let Err(err) = self.widget.open(options, self.checkout_callbacks()).await {
            let err = ClientError::from(err);
            warn!("Could not open checkout: {}", err);
            self.alert(&err.prefixed_alert());
            return Err(err);
        }
        Ok(session)
    }

    fn checkout_callbacks(&self) -> CheckoutCallbacks {
        let cancel_surface = self.surface.clone();
        let complete_surface = self.surface.clone();
        let client = self.client.clone();

        CheckoutCallbacks::new(
            move || {
                info!("Checkout cancelled");
                cancel_surface.alert(PAYMENT_CANCELLED_MESSAGE);
            },
            move || async move {
                info!("Checkout completed, confirming with server");
                match client.confirm_payment().await {
                    Ok(message) => complete_surface.alert(&message),
                    Err(err) => {
                        warn!("Payment confirmation failed: {}", err);
                        complete_surface.alert(&auth_alert(&err));
                    }
                }
            },
        )
    }

    // ── Modals ───────────────────────────────────────────────────────

    /// Shows the `{kind}-modal` dialog
    pub async fn show_modal(&self, kind: &str) {
        self.page.lock().await.modals_mut().show(kind);
    }

    /// Hides the `{kind}-modal` dialog
    ///
    /// ### Returns
    ///
    /// `false` if the modal was never shown, in which case nothing happens
    pub async fn close_modal(&self, kind: &str) -> bool {
        self.page.lock().await.modals_mut().hide(kind)
    }
}

/// Alert text for flows that show the server's rejection verbatim
fn auth_alert(err: &ClientError) -> String {
    match err.server_message() {
        Some(message) => message.to_string(),
        None => err.prefixed_alert(),
    }
}
