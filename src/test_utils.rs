use crate::models::FlashcardItem;
use proptest::prelude::*;

/// Strings with the awkward characters real input tends to contain
///
/// Mixes plain ASCII with whitespace, quotes, markup and non-ASCII text.
pub fn arb_messy_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,24}",
        "[ \t\n\"'<>&]{0,8}",
        "\\PC{0,24}",
    ]
}

/// Arbitrary question/answer pair
pub fn arb_flashcard_item() -> impl Strategy<Value = FlashcardItem> {
    (arb_messy_string(), arb_messy_string())
        .prop_map(|(question, answer)| FlashcardItem { question, answer })
}

/// Arbitrary list of cards as the server would return them
pub fn arb_flashcard_items() -> impl Strategy<Value = Vec<FlashcardItem>> {
    prop::collection::vec(arb_flashcard_item(), 0..8)
}
