//! Inbound events, independent of the Telegram client library

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use super::keyboard::Keyboard;

/// A text message seen in the primary chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub message_id: i32,
    pub chat_id: i64,
    pub text: String,
    pub user_id: i64,
    pub username: String,
    pub display_name: String,
    /// Set when the message was posted on behalf of a channel
    pub sender_chat_id: Option<i64>,
    pub date: DateTime<Utc>,
}

impl IncomingMessage {
    /// User description in the `{id username display name}` form that ban
    /// reports carry and the username extractor understands
    pub fn user_label(&self) -> String {
        let username = if self.username.is_empty() {
            "-"
        } else {
            self.username.as_str()
        };
        format!("{{{} {} {}}}", self.user_id, username, self.display_name)
    }
}

/// A message posted into the admin chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardedReport {
    pub message_id: i32,
    pub text: String,
    /// False for regular admin chatter, true when the message was forwarded
    pub forwarded: bool,
    pub from_username: String,
}

/// The admin-chat message a button belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminMessageRef {
    pub chat_id: i64,
    pub message_id: i32,
    pub text: String,
    pub date: DateTime<Utc>,
    pub keyboard: Keyboard,
}

/// An inline button press
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackPress {
    pub query_id: String,
    pub data: String,
    pub from_username: String,
    pub message: AdminMessageRef,
}
