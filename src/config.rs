//! Configuration management.
//!
//! Settings are read from environment variables, with a `.env` file picked
//! up via `dotenvy` when present. These mirror the original config-file keys
//! (contacts file path, autosave on exit, splash toggle).

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default contacts file, relative to the working directory.
pub const DEFAULT_CONTACTS_FILE: &str = "contacts.json";

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the contacts file loaded at boot and written by `save`
    pub contacts_file: String,

    /// Save without prompting when the shell exits (default: false)
    pub autosave_on_exit: bool,

    /// Show the startup splash screen (default: true)
    pub splash_screen: bool,

    /// Log level for the stderr tracing subscriber (default: "error")
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contacts_file: DEFAULT_CONTACTS_FILE.to_string(),
            autosave_on_exit: false,
            splash_screen: true,
            log_level: "error".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `ROLODEX_CONTACTS_FILE`: contacts file path (default: `contacts.json`)
    /// - `ROLODEX_AUTOSAVE_ON_EXIT`: `true`/`false` (default: false)
    /// - `ROLODEX_SPLASH_SCREEN`: `true`/`false` (default: true)
    /// - `LOG_LEVEL`: tracing filter for stderr logging (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env if present; its absence is not an error.
        let _ = dotenvy::dotenv();

        let defaults = Config::default();
        let contacts_file =
            env::var("ROLODEX_CONTACTS_FILE").unwrap_or(defaults.contacts_file);
        let autosave_on_exit =
            Self::parse_env_bool("ROLODEX_AUTOSAVE_ON_EXIT", defaults.autosave_on_exit)?;
        let splash_screen =
            Self::parse_env_bool("ROLODEX_SPLASH_SCREEN", defaults.splash_screen)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            contacts_file,
            autosave_on_exit,
            splash_screen,
            log_level,
        })
    }

    fn parse_env_bool(var: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var) {
            Err(_) => Ok(default),
            Ok(raw) => match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var.to_string(),
                    reason: format!("expected true or false, got '{}'", raw),
                }),
            },
        }
    }
}
