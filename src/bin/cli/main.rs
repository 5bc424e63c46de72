mod output;
mod shell;
mod terminal;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use flashnotes::config::{self, ConfigArgs};
use flashnotes::page::{
    Page, LOGIN_EMAIL_FIELD, LOGIN_PASSWORD_FIELD, NOTES_FIELD, PUBLIC_KEY_ATTRIBUTE,
    REGISTER_EMAIL_FIELD, REGISTER_PASSWORD_FIELD, USER_EMAIL_ATTRIBUTE,
};
use flashnotes::{ClientController, FlashnotesClient};
use output::{OutputConfig, OutputFormat};
use terminal::{Prompt, TerminalCheckout, TerminalSurface};
use tracing_subscriber::EnvFilter;

pub type Controller = ClientController<TerminalSurface, TerminalCheckout>;

/// CLI for the Flashnotes study app
#[derive(Parser, Debug)]
#[clap(name = "flashnotes-cli", about = "Turn study notes into flashcards")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    format: OutputFormat,

    /// Quiet mode: minimal output
    #[clap(short, long, global = true)]
    quiet: bool,

    /// Log format written to stderr
    #[clap(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate flashcards from notes
    Generate {
        /// The notes text
        #[clap(long, conflicts_with = "file", required_unless_present = "file")]
        notes: Option<String>,
        /// Read the notes from a file
        #[clap(long)]
        file: Option<PathBuf>,
    },
    /// Log in
    Login {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Buy premium through the payment checkout
    Pay {
        /// Email shown in the checkout
        #[clap(long)]
        email: Option<String>,
    },
    /// Interactive session; the login cookie lasts until the shell exits
    Shell,
}

fn init_tracing(debug: bool, format: LogFormat) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::get_config(cli.config);
    let output_config = OutputConfig {
        format: cli.format,
        quiet: cli.quiet,
    };

    let mut page = Page::new();
    if let Some(key) = &config.paystack_public_key {
        page.set_attribute(PUBLIC_KEY_ATTRIBUTE, key.as_str());
    }

    let prompt = Prompt::stdin();
    let client = FlashnotesClient::new(config.server_url.as_str())
        .context("could not build HTTP client")?;
    let controller: Controller = ClientController::new(
        client,
        Arc::new(TerminalSurface::new(output_config)),
        TerminalCheckout::new(prompt.clone()),
    )
    .with_page(page)
    .with_checkout_settings(config.checkout_settings());

    match cli.command {
        Commands::Generate { notes, file } => {
            let notes = match (notes, file) {
                (Some(notes), _) => notes,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("could not read notes from {}", path.display()))?,
                (None, None) => String::new(),
            };
            controller.set_field(NOTES_FIELD, notes).await;
            controller.generate_flashcards().await?;
            output::print_cards(controller.page().lock().await.cards(), &output_config);
        }
        Commands::Login { email, password } => {
            controller.set_field(LOGIN_EMAIL_FIELD, email).await;
            controller.set_field(LOGIN_PASSWORD_FIELD, password).await;
            controller.login().await?;
        }
        Commands::Register { email, password } => {
            controller.set_field(REGISTER_EMAIL_FIELD, email).await;
            controller.set_field(REGISTER_PASSWORD_FIELD, password).await;
            let message = controller.register().await?;
            tracing::debug!("registered: {}", message);
        }
        Commands::Logout => controller.logout().await?,
        Commands::Pay { email } => {
            if let Some(email) = email {
                controller.page().lock().await.set_attribute(USER_EMAIL_ATTRIBUTE, email);
            }
            let session = controller.initialize_payment().await?;
            tracing::debug!("checkout opened at {}", session.authorization_url);
        }
        Commands::Shell => shell::run(&controller, &prompt, &output_config).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.config.debug, cli.log_format);

    if let Err(e) = run(cli).await {
        if !already_alerted(&e) {
            eprintln!("Error: {:#}", e);
        }
        process::exit(1);
    }
}

/// True for a bare handler error, which the surface has already shown
///
/// Errors wrapped with context come from setup and were never alerted.
fn already_alerted(err: &anyhow::Error) -> bool {
    err.chain()
        .next()
        .is_some_and(|outer| outer.is::<flashnotes::ClientError>())
}
