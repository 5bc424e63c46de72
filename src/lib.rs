/// Flashnotes: client for a study-flashcard web application
///
/// This library holds everything the Flashnotes page does on the user's
/// side: it sends study notes to the server to get flashcards back, renders
/// them as flip cards, signs users in and out, and walks them through the
/// payment checkout.
///
/// ### Modules
///
/// - `models`: Values handled by a single action (notes, cards, credentials, payment session)
/// - `dto`: Request and response bodies exchanged with the server
/// - `errors`: The `ClientError` type every action returns
/// - `client`: HTTP client with one method per server endpoint
/// - `page`: View model of the page (fields, attributes, cards, modals)
/// - `payment`: Checkout options, callbacks and the payment widget trait
/// - `controller`: The event handlers tying the above together
/// - `config`: Layered configuration for the command line front end
///
/// ### Server endpoints
///
/// - `POST /generate`: Turn notes into flashcards
/// - `POST /login`, `POST /register`, `POST /logout`: Session management
/// - `POST /initialize-payment`: Open a checkout session
/// - `POST /payment-success`: Confirm a completed checkout

/// HTTP client module
pub mod client;

/// Configuration module
pub mod config;

/// Event handler module
pub mod controller;

/// Data transfer objects module
pub mod dto;

/// Error types module
pub mod errors;

/// Data models module
pub mod models;

/// Page view model module
pub mod page;

/// Payment checkout module
pub mod payment;

#[cfg(test)]
mod test_utils;

pub use client::FlashnotesClient;
pub use controller::ClientController;
pub use errors::ClientError;
pub use page::{Page, Surface};
pub use payment::{CheckoutCallbacks, CheckoutOptions, PaymentWidget};
