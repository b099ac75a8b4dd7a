//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by chat:
//! - Admin chat handlers for ban reports, forwarded spam and button presses
//! - Primary chat message handlers
//! - Update routing from teloxide into the handlers

pub mod admin;
pub mod dispatch;
pub mod messages;

// Re-export commonly used handler functions
pub use admin::*;
pub use dispatch::create_handler;
pub use messages::handle_primary_message;
