//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    #[serde(default)]
    pub modes: ModesConfig,
    #[serde(default)]
    pub locator: LocatorConfig,
    #[serde(default)]
    pub samples: SamplesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// The moderated group
    pub primary_chat_id: i64,
    /// Private chat where ban reports land and admins press buttons
    pub admin_chat_id: i64,
    /// Usernames exempt from moderation, `@` prefix optional
    #[serde(default)]
    pub super_users: Vec<String>,
}

/// Operating modes
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModesConfig {
    /// Simulate every mutating action
    #[serde(default)]
    pub dry: bool,
    /// Report detected spam without banning until an admin confirms
    #[serde(default)]
    pub training: bool,
}

/// Message index configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub ttl_hours: u64,
    pub min_size: usize,
}

/// Spam/ham sample files
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SamplesConfig {
    pub spam_path: String,
    pub ham_path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_prefix: String,
    /// Emit JSON lines on stdout instead of human-readable text
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("TGSPAM")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("bot.super_users")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ModerationError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                primary_chat_id: 0,
                admin_chat_id: 0,
                super_users: vec![],
            },
            modes: ModesConfig::default(),
            locator: LocatorConfig::default(),
            samples: SamplesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            ttl_hours: 24,
            min_size: 1000,
        }
    }
}

impl Default for SamplesConfig {
    fn default() -> Self {
        Self {
            spam_path: "data/spam-samples.txt".to_string(),
            ham_path: "data/ham-samples.txt".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
            file_prefix: "tg-spam-admin.log".to_string(),
            json: false,
        }
    }
}
