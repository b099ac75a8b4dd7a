//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{ModerationError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_locator_config(&settings.locator)?;
    validate_samples_config(&settings.samples)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(ModerationError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.primary_chat_id == 0 {
        return Err(ModerationError::Config(
            "Primary chat ID is required".to_string()
        ));
    }

    if config.admin_chat_id == 0 {
        return Err(ModerationError::Config(
            "Admin chat ID is required".to_string()
        ));
    }

    if config.admin_chat_id == config.primary_chat_id {
        return Err(ModerationError::Config(
            "Admin chat must differ from the primary chat".to_string()
        ));
    }

    if config.super_users.iter().any(|name| name.trim_start_matches('@').is_empty()) {
        return Err(ModerationError::Config(
            "Super-user names must not be empty".to_string()
        ));
    }

    Ok(())
}

/// Validate message index configuration
fn validate_locator_config(config: &super::LocatorConfig) -> Result<()> {
    if config.ttl_hours == 0 {
        return Err(ModerationError::Config(
            "Locator TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate sample store configuration
fn validate_samples_config(config: &super::SamplesConfig) -> Result<()> {
    if config.spam_path.is_empty() || config.ham_path.is_empty() {
        return Err(ModerationError::Config(
            "Spam and ham sample paths are required".to_string()
        ));
    }

    if config.spam_path == config.ham_path {
        return Err(ModerationError::Config(
            "Spam and ham samples must be stored in different files".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ModerationError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ModerationError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.directory.is_empty() || config.file_prefix.is_empty() {
        return Err(ModerationError::Config(
            "Log directory and file prefix are required".to_string()
        ));
    }

    Ok(())
}
