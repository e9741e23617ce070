use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Runtime settings, read from the environment (and `.env` via dotenv in the binary).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub admin_username: String,
    pub admin_password: String,
    pub bcrypt_cost: u32,
    /// Simulated loading delay around login and dashboard refresh
    pub loading_delay: Duration,
    pub export_dir: PathBuf,
    /// VAT percentage for new contracts
    pub default_vat: Decimal,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            loading_delay: Duration::from_millis(800),
            export_dir: PathBuf::from("."),
            default_vat: Decimal::from(10),
        }
    }
}

impl AppConfig {
    /// Reads `CONTRACTDESK_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            admin_username: lookup("CONTRACTDESK_ADMIN_USERNAME").unwrap_or(defaults.admin_username),
            admin_password: lookup("CONTRACTDESK_ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            bcrypt_cost: parse_or(&lookup, "CONTRACTDESK_BCRYPT_COST", defaults.bcrypt_cost)?,
            loading_delay: Duration::from_millis(parse_or(
                &lookup,
                "CONTRACTDESK_LOADING_DELAY_MS",
                defaults.loading_delay.as_millis() as u64,
            )?),
            export_dir: lookup("CONTRACTDESK_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            default_vat: parse_or(&lookup, "CONTRACTDESK_DEFAULT_VAT", defaults.default_vat)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
