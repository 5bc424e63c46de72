use std::future::Future;
use std::pin::Pin;

/// Currency and amount charged by the checkout unless configured otherwise
pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_AMOUNT: u64 = 500;

/// Alert shown when the user closes the checkout without paying
pub const PAYMENT_CANCELLED_MESSAGE: &str = "Payment cancelled";

/// Future returned by the completion callback
pub type CompletionFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Fixed part of every checkout: what is charged and in which currency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub currency: String,
    pub amount: u64,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            amount: DEFAULT_AMOUNT,
        }
    }
}

/// Everything the payment widget needs to open a checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOptions {
    /// Public key of the payment provider, read from the page
    pub public_key: String,
    /// Handle of the session created by the server
    pub authorization_url: String,
    /// Email of the signed-in user, when the page knows it
    pub email: Option<String>,
    pub amount: u64,
    pub currency: String,
}

/// The two ways a checkout can hand control back
///
/// Both callbacks are consumed together, so a widget can fire at most one
/// of them per checkout.
pub struct CheckoutCallbacks {
    on_cancel: Box<dyn FnOnce() + Send>,
    on_complete: Box<dyn FnOnce() -> CompletionFuture + Send>,
}

impl CheckoutCallbacks {
    pub fn new<C, F, Fut>(on_cancel: C, on_complete: F) -> Self
    where
        C: FnOnce() + Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            on_cancel: Box::new(on_cancel),
            on_complete: Box::new(move || Box::pin(on_complete()) as CompletionFuture),
        }
    }

    /// Reports that the user closed the checkout
    pub fn cancel(self) {
        (self.on_cancel)()
    }

    /// Reports that the checkout went through and runs the follow-up
    pub async fn complete(self) {
        (self.on_complete)().await
    }
}

impl std::fmt::Debug for CheckoutCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutCallbacks").finish_non_exhaustive()
    }
}

/// A third-party checkout UI
///
/// `open` resolves once the widget has shown the checkout. A widget may
/// invoke one of the callbacks before resolving, keep them to invoke later,
/// or drop them without calling either.
pub trait PaymentWidget {
    fn open(
        &self,
        options: CheckoutOptions,
        callbacks: CheckoutCallbacks,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}
