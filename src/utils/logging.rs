//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for moderation actions.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{ModerationError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for as long as the process logs.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| ModerationError::Config(format!("invalid log filter {:?}: {}", config.level, e)))?;

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .try_init()
        .map_err(|e| ModerationError::Config(format!("logger already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a moderation action applied (or simulated) against a user
pub fn log_moderation_action(action: &str, user_id: i64, chat_id: i64, outcome: &str) {
    info!(
        action = action,
        user_id = user_id,
        chat_id = chat_id,
        outcome = outcome,
        "Moderation action"
    );
}

/// Log the outcome of an admin button press
pub fn log_callback_outcome(actor: &str, payload: &str, succeeded: bool, details: Option<&str>) {
    if succeeded {
        info!(
            actor = actor,
            payload = payload,
            details = details,
            "Admin callback handled"
        );
    } else {
        warn!(
            actor = actor,
            payload = payload,
            details = details,
            "Admin callback failed"
        );
    }
}

/// Log an inbound event that was ignored on purpose
pub fn log_ignored_event(kind: &str, chat_id: i64, reason: &str) {
    debug!(kind = kind, chat_id = chat_id, reason = reason, "Event ignored");
}
