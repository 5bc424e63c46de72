use std::collections::HashMap;

use crate::models::FlashcardItem;

/// Element ids and attributes the handlers read from the page
pub const NOTES_FIELD: &str = "notes";
pub const FLASHCARD_CONTAINER: &str = "flashcard-container";
pub const LOGIN_EMAIL_FIELD: &str = "login-email";
pub const LOGIN_PASSWORD_FIELD: &str = "login-password";
pub const REGISTER_EMAIL_FIELD: &str = "register-email";
pub const REGISTER_PASSWORD_FIELD: &str = "register-password";
pub const PUBLIC_KEY_ATTRIBUTE: &str = "data-paystack-public-key";
pub const USER_EMAIL_ATTRIBUTE: &str = "data-user-email";

/// Side effects a page can only ask its host to perform
///
/// A browser would show a blocking dialog and reload the document; the CLI
/// prints to the terminal; tests record the calls.
pub trait Surface: Send + Sync {
    /// Shows a message to the user
    fn alert(&self, message: &str);

    /// Reloads the page so it reflects new session state
    fn reload(&self);
}

/// One rendered card in the flashcard container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipCard {
    item: FlashcardItem,
    flipped: bool,
}

impl FlipCard {
    /// Creates an unflipped card showing the question
    pub fn new(item: FlashcardItem) -> Self {
        Self { item, flipped: false }
    }

    pub fn question(&self) -> &str {
        &self.item.question
    }

    pub fn answer(&self) -> &str {
        &self.item.answer
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Turns the card over and returns the new flipped state
    pub fn toggle(&mut self) -> bool {
        self.flipped = !self.flipped;
        self.flipped
    }

    /// The text currently facing the user
    pub fn visible_face(&self) -> &str {
        if self.flipped {
            self.answer()
        } else {
            self.question()
        }
    }
}

/// Open/closed state of the page's modal dialogs
///
/// A modal only gets an instance the first time it is shown, which is what
/// lets [`ModalRegistry::hide`] tell "closed" apart from "never opened".
#[derive(Debug, Clone, Default)]
pub struct ModalRegistry {
    instances: HashMap<String, bool>,
}

impl ModalRegistry {
    /// Builds the element id of a modal from its type, e.g. `register-modal`
    pub fn modal_id(kind: &str) -> String {
        format!("{}-modal", kind)
    }

    pub fn show(&mut self, kind: &str) {
        self.instances.insert(Self::modal_id(kind), true);
    }

    /// Hides a modal if it has an instance
    ///
    /// ### Returns
    ///
    /// `false` when no instance exists for the modal; nothing changes then
    pub fn hide(&mut self, kind: &str) -> bool {
        match self.instances.get_mut(&Self::modal_id(kind)) {
            Some(open) => {
                *open = false;
                true
            }
            None => false,
        }
    }

    pub fn is_open(&self, kind: &str) -> bool {
        self.instances
            .get(&Self::modal_id(kind))
            .copied()
            .unwrap_or(false)
    }

    pub fn has_instance(&self, kind: &str) -> bool {
        self.instances.contains_key(&Self::modal_id(kind))
    }
}

/// View model of the single page the handlers work against
///
/// Holds the input values by element id, the data attributes the server
/// rendered into the page, the flashcard container and the modals. Only
/// the controller's handlers mutate it.
#[derive(Debug, Clone, Default)]
pub struct Page {
    fields: HashMap<String, String>,
    attributes: HashMap<String, String>,
    cards: Vec<FlipCard>,
    modals: ModalRegistry,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of an input field, as a user typing into it would
    pub fn set_field(&mut self, id: &str, value: impl Into<String>) {
        self.fields.insert(id.to_string(), value.into());
    }

    /// Reads an input field; a field that was never filled in reads as empty
    pub fn field(&self, id: &str) -> &str {
        self.fields.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The cards currently rendered in the flashcard container
    pub fn cards(&self) -> &[FlipCard] {
        &self.cards
    }

    /// Clears the flashcard container and renders one card per item
    pub fn replace_cards(&mut self, items: Vec<FlashcardItem>) {
        self.cards = items.into_iter().map(FlipCard::new).collect();
    }

    /// Flips the card at `index`
    ///
    /// ### Returns
    ///
    /// The card's new flipped state, or `None` if there is no such card
    pub fn flip(&mut self, index: usize) -> Option<bool> {
        self.cards.get_mut(index).map(FlipCard::toggle)
    }

    pub fn modals(&self) -> &ModalRegistry {
        &self.modals
    }

    pub fn modals_mut(&mut self) -> &mut ModalRegistry {
        &mut self.modals
    }
}
