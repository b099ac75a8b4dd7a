//! tg-spam admin chat moderation
//!
//! Moderation workflow of a Telegram anti-spam bot: detected spam is reported
//! to a private admin chat with inline buttons, admins confirm or reverse the
//! ban with a button press, and spam the detector missed can be forwarded into
//! the admin chat to ban its author and learn the text.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ErrorList, ModerationError, Result};

// Re-export main components for easy access
pub use services::ModerationContext;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
