//! Data models module
//!
//! This module contains the data structures shared by the moderation handlers:
//! button payloads, keyboards, admin-message text and inbound events.

pub mod admin_message;
pub mod callback;
pub mod events;
pub mod keyboard;
pub mod records;

// Re-export commonly used models
pub use callback::{CallbackAction, CallbackPayload};
pub use events::{AdminMessageRef, CallbackPress, ForwardedReport, IncomingMessage};
pub use keyboard::{InlineButton, Keyboard};
pub use records::{CheckResult, DetectorResponse, MessageRecord, SpamRecord};
