use clap::ValueEnum;
use flashnotes::page::{FlipCard, ModalRegistry, Page};
use serde_json::{json, Value};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output, one document per line
    Json,
}

/// Bundled output configuration passed to all print functions
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// The output format
    pub format: OutputFormat,
    /// When true, print minimal output (just counts and alerts)
    pub quiet: bool,
}

fn print_json(value: &Value) {
    match serde_json::to_string(value) {
        Ok(text) => println!("{}", text),
        Err(err) => eprintln!("Could not encode output: {}", err),
    }
}

/// Prints an alert raised by a handler
pub fn print_alert(message: &str, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => println!("! {}", message),
        OutputFormat::Json => print_json(&json!({ "alert": message })),
    }
}

/// Prints the notice shown when the page reloads
pub fn print_reload(config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if !config.quiet {
                println!("Session changed, page reloaded.");
            }
        }
        OutputFormat::Json => print_json(&json!({ "reload": true })),
    }
}

/// Prints the cards in the flashcard container, each showing its visible face
pub fn print_cards(cards: &[FlipCard], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if cards.is_empty() {
                if !config.quiet {
                    println!("No flashcards.");
                }
                return;
            }
            if config.quiet {
                println!("{}", cards.len());
                return;
            }
            for (index, card) in cards.iter().enumerate() {
                let side = if card.is_flipped() { "A" } else { "Q" };
                println!("[{}] {}: {}", index, side, card.visible_face());
            }
        }
        OutputFormat::Json => {
            let cards: Vec<Value> = cards
                .iter()
                .map(|card| {
                    json!({
                        "question": card.question(),
                        "answer": card.answer(),
                        "flipped": card.is_flipped(),
                    })
                })
                .collect();
            print_json(&Value::Array(cards));
        }
    }
}

/// Prints a one-line summary of the page
pub fn print_page(page: &Page, config: &OutputConfig) {
    let open_modals: Vec<&str> = ["login", "register"]
        .into_iter()
        .filter(|kind| page.modals().is_open(kind))
        .collect();
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                return;
            }
            let modals = if open_modals.is_empty() {
                "none".to_string()
            } else {
                open_modals
                    .iter()
                    .map(|kind| ModalRegistry::modal_id(kind))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            println!("{} card(s), open modals: {}", page.cards().len(), modals);
        }
        OutputFormat::Json => print_json(&json!({
            "cards": page.cards().len(),
            "open_modals": open_modals,
        })),
    }
}
