use std::sync::Arc;

use anyhow::Context;
use flashnotes::{CheckoutCallbacks, CheckoutOptions, PaymentWidget, Surface};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::output::{self, OutputConfig};

/// Line reader over stdin shared by the shell and the checkout prompt
pub struct Prompt {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl Prompt {
    pub fn stdin() -> Arc<Self> {
        Arc::new(Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        })
    }

    /// Reads the next line; `None` at end of input
    pub async fn next_line(&self) -> std::io::Result<Option<String>> {
        self.lines.lock().await.next_line().await
    }
}

/// Surface that writes alerts and reloads to stdout
pub struct TerminalSurface {
    output: OutputConfig,
}

impl TerminalSurface {
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }
}

impl Surface for TerminalSurface {
    fn alert(&self, message: &str) {
        output::print_alert(message, &self.output);
    }

    fn reload(&self) {
        output::print_reload(&self.output);
    }
}

/// Checkout that shows the authorization URL and asks the user how it went
pub struct TerminalCheckout {
    prompt: Arc<Prompt>,
}

impl TerminalCheckout {
    pub fn new(prompt: Arc<Prompt>) -> Self {
        Self { prompt }
    }
}

impl PaymentWidget for TerminalCheckout {
    async fn open(&self, options: CheckoutOptions, callbacks: CheckoutCallbacks) -> anyhow::Result<()> {
        println!("Checkout: {} {} ({})", options.amount, options.currency, options.public_key);
        if let Some(email) = &options.email {
            println!("Paying as: {}", email);
        }
        println!("Open {} to pay.", options.authorization_url);
        println!("Completed the payment? [y/N]");

        let answer = self
            .prompt
            .next_line()
            .await
            .context("could not read checkout answer")?;

        match answer.as_deref().map(str::trim) {
            Some("y") | Some("Y") | Some("yes") => callbacks.complete().await,
            _ => callbacks.cancel(),
        }
        Ok(())
    }
}
