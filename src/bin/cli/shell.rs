use flashnotes::page::{
    LOGIN_EMAIL_FIELD, LOGIN_PASSWORD_FIELD, NOTES_FIELD, REGISTER_EMAIL_FIELD,
    REGISTER_PASSWORD_FIELD,
};
use tracing::debug;

use crate::output::{self, OutputConfig};
use crate::terminal::Prompt;
use crate::Controller;

const HELP: &str = "\
Commands:
  notes <text>                 fill in the notes field
  generate [text]              generate flashcards (optionally setting the notes first)
  cards                        show the flashcards
  flip <n>                     turn card n over
  login <email> <password>     log in
  register <email> <password>  create an account
  logout                       log out
  pay                          buy premium
  show <type> / close <type>   show or hide the <type>-modal dialog
  page                         summarize the page
  help                         show this help
  quit                         leave the shell";

/// One line of shell input
#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Notes(String),
    Generate(Option<String>),
    Cards,
    Flip(usize),
    Login { email: String, password: String },
    Register { email: String, password: String },
    Logout,
    Pay,
    Show(String),
    Close(String),
    Page,
    Help,
    Quit,
    Empty,
}

fn credentials(rest: &str, usage: &str) -> Result<(String, String), String> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(email), Some(password), None) => Ok((email.to_string(), password.to_string())),
        _ => Err(format!("usage: {}", usage)),
    }
}

fn single_word(rest: &str, usage: &str) -> Result<String, String> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(word), None) => Ok(word.to_string()),
        _ => Err(format!("usage: {}", usage)),
    }
}

/// Parses a line of shell input
pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "" => Ok(ShellCommand::Empty),
        "notes" => Ok(ShellCommand::Notes(rest.to_string())),
        "generate" => Ok(ShellCommand::Generate((!rest.is_empty()).then(|| rest.to_string()))),
        "cards" => Ok(ShellCommand::Cards),
        "flip" => rest
            .parse()
            .map(ShellCommand::Flip)
            .map_err(|_| "usage: flip <n>".to_string()),
        "login" => credentials(rest, "login <email> <password>")
            .map(|(email, password)| ShellCommand::Login { email, password }),
        "register" => credentials(rest, "register <email> <password>")
            .map(|(email, password)| ShellCommand::Register { email, password }),
        "logout" => Ok(ShellCommand::Logout),
        "pay" => Ok(ShellCommand::Pay),
        "show" => single_word(rest, "show <type>").map(ShellCommand::Show),
        "close" => single_word(rest, "close <type>").map(ShellCommand::Close),
        "page" => Ok(ShellCommand::Page),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{}', try 'help'", other)),
    }
}

/// Runs actions read from the prompt until `quit` or end of input
///
/// A failed action has already been alerted, so the shell just moves on.
pub async fn run(controller: &Controller, prompt: &Prompt, config: &OutputConfig) -> anyhow::Result<()> {
    if !config.quiet {
        println!("Flashnotes shell. Type 'help' for commands.");
    }

    while let Some(line) = prompt.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(usage) => {
                eprintln!("{}", usage);
                continue;
            }
        };
        debug!(?command, "shell command");

        match command {
            ShellCommand::Empty => {}
            ShellCommand::Notes(text) => controller.set_field(NOTES_FIELD, text).await,
            ShellCommand::Generate(text) => {
                if let Some(text) = text {
                    controller.set_field(NOTES_FIELD, text).await;
                }
                if controller.generate_flashcards().await.is_ok() {
                    output::print_cards(controller.page().lock().await.cards(), config);
                }
            }
            ShellCommand::Cards => output::print_cards(controller.page().lock().await.cards(), config),
            ShellCommand::Flip(index) => match controller.flip_card(index).await {
                Some(_) => output::print_cards(controller.page().lock().await.cards(), config),
                None => eprintln!("no card {}", index),
            },
            ShellCommand::Login { email, password } => {
                controller.set_field(LOGIN_EMAIL_FIELD, email).await;
                controller.set_field(LOGIN_PASSWORD_FIELD, password).await;
                let _ = controller.login().await;
            }
            ShellCommand::Register { email, password } => {
                controller.show_modal("register").await;
                controller.set_field(REGISTER_EMAIL_FIELD, email).await;
                controller.set_field(REGISTER_PASSWORD_FIELD, password).await;
                let _ = controller.register().await;
            }
            ShellCommand::Logout => {
                let _ = controller.logout().await;
            }
            ShellCommand::Pay => {
                let _ = controller.initialize_payment().await;
            }
            ShellCommand::Show(kind) => controller.show_modal(&kind).await,
            ShellCommand::Close(kind) => {
                controller.close_modal(&kind).await;
            }
            ShellCommand::Page => output::print_page(&*controller.page().lock().await, config),
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Quit => break,
        }
    }
    Ok(())
}
