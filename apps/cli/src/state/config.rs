//! # Configuration State
//!
//! Terminal configuration, loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources (later wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Built-in defaults (this file)                                       │
//! │  2. dispatch.toml in the working directory, or the `--config` file      │
//! │  3. Environment variables DISPATCH_* (DISPATCH_INVOICE_API_URL, ...)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example `dispatch.toml`
//! ```toml
//! invoice_api_url = "http://billing.local:8000"
//! output_dir = "/srv/invoices"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use dispatch_core::{DEFAULT_HSN_SAC, DEFAULT_STATE_CODE};
use dispatch_invoice::{normalize_base_url, DEFAULT_BASE_URL};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ENV_PREFIX: &str = "DISPATCH";
const DEFAULT_CONFIG_NAME: &str = "dispatch";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Terminal configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Invoicing backend base URL, without trailing slash.
    pub invoice_api_url: String,

    /// State code used when the customer leaves it blank.
    pub default_state_code: String,

    /// HSN/SAC code printed on every invoice line.
    pub hsn_sac: String,

    /// SQLite file holding the catalog and sales history.
    pub database_path: PathBuf,

    /// Directory invoice PDFs are written to.
    pub output_dir: PathBuf,

    pub currency_symbol: String,
}

impl AppConfig {
    /// Loads configuration from defaults, file and process environment.
    ///
    /// With `config_file` the file must exist; without it `dispatch.toml`
    /// is picked up from the working directory when present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_sources(config_file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration with an explicit environment source.
    pub fn from_sources(
        config_file: Option<&Path>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Config::builder()
            .set_default("invoice_api_url", DEFAULT_BASE_URL)?
            .set_default("default_state_code", DEFAULT_STATE_CODE)?
            .set_default("hsn_sac", DEFAULT_HSN_SAC)?
            .set_default(
                "database_path",
                default_database_path().to_string_lossy().into_owned(),
            )?
            .set_default("output_dir", ".")?
            .set_default("currency_symbol", "₹")?
            .add_source(file)
            .add_source(environment)
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validated()
    }

    /// Normalizes and checks loaded values.
    fn validated(mut self) -> Result<Self, ConfigError> {
        self.invoice_api_url = normalize_base_url(&self.invoice_api_url);
        if !(self.invoice_api_url.starts_with("http://")
            || self.invoice_api_url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid {
                key: "invoice_api_url",
                reason: format!("'{}' must start with http:// or https://", self.invoice_api_url),
            });
        }

        self.default_state_code = self.default_state_code.trim().to_string();
        if self.default_state_code.is_empty() {
            return Err(ConfigError::Invalid {
                key: "default_state_code",
                reason: "must not be empty".to_string(),
            });
        }

        self.hsn_sac = self.hsn_sac.trim().to_string();
        if self.hsn_sac.is_empty() {
            return Err(ConfigError::Invalid {
                key: "hsn_sac",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(self)
    }

    /// Formats an amount with the currency symbol and two decimals.
    ///
    /// ```rust,ignore
    /// config.format_currency(Decimal::new(20178, 2)) // "₹201.78"
    /// ```
    pub fn format_currency(&self, amount: Decimal) -> String {
        let rounded = dispatch_core::money::round_money(amount);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{}{:.2}", self.currency_symbol, rounded.abs())
        } else {
            format!("{}{:.2}", self.currency_symbol, rounded.abs())
        }
    }
}

/// Platform data directory, e.g. `~/.local/share/dispatch/dispatch.db` on
/// Linux. Falls back to the working directory.
fn default_database_path() -> PathBuf {
    ProjectDirs::from("in", "paintdispatch", "dispatch")
        .map(|dirs| dirs.data_dir().join("dispatch.db"))
        .unwrap_or_else(|| PathBuf::from("dispatch.db"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let file = config_file("");
        let config = AppConfig::from_sources(Some(file.path()), env(&[])).unwrap();

        assert_eq!(config.invoice_api_url, "http://127.0.0.1:8000");
        assert_eq!(config.default_state_code, "37");
        assert_eq!(config.hsn_sac, "998313");
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn test_env_overrides_file() {
        let file = config_file(
            r#"
            invoice_api_url = "http://from-file:8000"
            output_dir = "/srv/invoices"
            "#,
        );
        let config = AppConfig::from_sources(
            Some(file.path()),
            env(&[("DISPATCH_INVOICE_API_URL", "https://billing.example.in/")]),
        )
        .unwrap();

        assert_eq!(config.invoice_api_url, "https://billing.example.in");
        assert_eq!(config.output_dir, PathBuf::from("/srv/invoices"));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let file = config_file(r#"invoice_api_url = "ftp://billing""#);
        let err = AppConfig::from_sources(Some(file.path()), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "invoice_api_url", .. }));
    }

    #[test]
    fn test_rejects_blank_state_code() {
        let file = config_file(r#"default_state_code = "  ""#);
        let err = AppConfig::from_sources(Some(file.path()), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "default_state_code", .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = AppConfig::from_sources(Some(Path::new("/nonexistent/dispatch.toml")), env(&[]));
        assert!(matches!(err, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_format_currency() {
        let file = config_file("");
        let config = AppConfig::from_sources(Some(file.path()), env(&[])).unwrap();

        assert_eq!(config.format_currency(Decimal::new(20178, 2)), "₹201.78");
        assert_eq!(config.format_currency(Decimal::new(307_849, 4)), "₹30.78");
        assert_eq!(config.format_currency(Decimal::from(5)), "₹5.00");
        assert_eq!(config.format_currency(Decimal::new(-150, 2)), "-₹1.50");
    }
}
