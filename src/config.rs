use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use clap::Args;
use std::fs;
use tracing::{info, warn};

use crate::payment::{CheckoutSettings, DEFAULT_AMOUNT, DEFAULT_CURRENCY};

/// Server URL used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Configuration for the Flashnotes client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the Flashnotes server
    pub server_url: String,
    /// Currency charged by the checkout
    pub payment_currency: String,
    /// Amount charged by the checkout, in the currency's minor unit
    pub payment_amount: u64,
    /// Public key of the payment provider; a browser page carries it as a data attribute
    pub paystack_public_key: Option<String>,
}

/// Update structure for Config with all fields optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    /// Optional update for the server URL
    #[serde(default)]
    pub server_url: Option<String>,
    /// Optional update for the checkout currency
    #[serde(default)]
    pub payment_currency: Option<String>,
    /// Optional update for the checkout amount
    #[serde(default)]
    pub payment_amount: Option<u64>,
    /// Optional update for the payment provider's public key
    #[serde(default)]
    pub paystack_public_key: Option<String>,
}

/// Command line arguments that feed into the configuration
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Server URL to connect to
    #[clap(long, env = "FLASHNOTES_URL", global = true)]
    pub server_url: Option<String>,

    /// Checkout currency
    #[clap(long, env = "FLASHNOTES_CURRENCY", global = true)]
    pub currency: Option<String>,

    /// Checkout amount
    #[clap(long, env = "FLASHNOTES_AMOUNT", global = true)]
    pub amount: Option<u64>,

    /// Public key of the payment provider
    #[clap(long, env = "PAYSTACK_PUBLIC_KEY", global = true, hide_env_values = true)]
    pub paystack_public_key: Option<String>,

    /// Debug mode
    #[clap(long, env = "FLASHNOTES_DEBUG", default_value_t = false, global = true)]
    pub debug: bool,
}

impl Config {
    /// Applies a config update to the current configuration
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            server_url: update.server_url.unwrap_or(self.server_url),
            payment_currency: update.payment_currency.unwrap_or(self.payment_currency),
            payment_amount: update.payment_amount.unwrap_or(self.payment_amount),
            paystack_public_key: update.paystack_public_key.or(self.paystack_public_key),
        }
    }

    /// Returns the currency and amount the checkout should charge
    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            currency: self.payment_currency.clone(),
            amount: self.payment_amount,
        }
    }
}

/// Returns the base (default) configuration
pub fn base_config() -> Config {
    Config {
        server_url: DEFAULT_SERVER_URL.to_string(),
        payment_currency: DEFAULT_CURRENCY.to_string(),
        payment_amount: DEFAULT_AMOUNT,
        paystack_public_key: None,
    }
}

/// Returns the platform config directory, if one can be determined
pub fn get_config_dir_path() -> Option<PathBuf> {
    match ProjectDirs::from("com", "flashnotes", "flashnotes") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().to_path_buf()),
        None => {
            warn!("Could not determine XDG config directory, skipping config file");
            None
        }
    }
}

/// Loads configuration from a TOML file
pub fn config_from_file(config_path: Option<PathBuf>) -> Result<ConfigUpdate, String> {
    let Some(config_path) = config_path else {
        return Ok(ConfigUpdate::default());
    };

    if !config_path.exists() {
        info!("Config file not found at {:?}, using defaults", config_path);
        return Ok(ConfigUpdate::default());
    }

    match fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<ConfigUpdate>(&content) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", config_path);
                Ok(config)
            },
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                Err(format!("Failed to parse config file: {}", e))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            Err(format!("Failed to read config file: {}", e))
        }
    }
}

/// Loads configuration from command line arguments
pub fn config_from_args(args: ConfigArgs) -> ConfigUpdate {
    ConfigUpdate {
        server_url: args.server_url,
        payment_currency: args.currency,
        payment_amount: args.amount,
        paystack_public_key: args.paystack_public_key,
    }
}

/// Gets the complete configuration by combining defaults with
/// values from the config file, environment variables, and command line arguments
/// in order of increasing precedence
pub fn get_config(args: ConfigArgs) -> Config {
    let config_path = get_config_dir_path().map(|dir| dir.join("config.toml"));

    let config = base_config()
        .apply_update(config_from_file(config_path).unwrap_or_default())
        .apply_update(config_from_args(args));

    info!("Final configuration: server_url={}, currency={}, amount={}, public_key_set={}",
          config.server_url, config.payment_currency, config.payment_amount,
          config.paystack_public_key.is_some());

    config
}
