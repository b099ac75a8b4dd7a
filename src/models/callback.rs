//! Inline button payloads
//!
//! Every button on an admin report carries `<prefix><user_id>:<msg_id>`, where
//! the one-character prefix selects the action. Telegram hands the string back
//! verbatim on press, so this is the only state that survives between a report
//! and the admin's decision.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{ModerationError, Result};

/// What a button press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallbackAction {
    /// Lift the ban; carries no prefix
    Unban,
    /// Replace the report buttons with an unban/keep decision pair
    AskConfirm,
    /// Keep the ban and learn the message as spam
    ConfirmBan,
    /// Append the recorded spam checks to the report
    ShowInfo,
}

impl CallbackAction {
    pub const ALL: [CallbackAction; 4] = [
        CallbackAction::Unban,
        CallbackAction::AskConfirm,
        CallbackAction::ConfirmBan,
        CallbackAction::ShowInfo,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            CallbackAction::Unban => "",
            CallbackAction::AskConfirm => "?",
            CallbackAction::ConfirmBan => "+",
            CallbackAction::ShowInfo => "!",
        }
    }

    fn from_prefix(c: char) -> Option<Self> {
        match c {
            '?' => Some(CallbackAction::AskConfirm),
            '+' => Some(CallbackAction::ConfirmBan),
            '!' => Some(CallbackAction::ShowInfo),
            _ => None,
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackAction::Unban => write!(f, "unban"),
            CallbackAction::AskConfirm => write!(f, "ask-confirm"),
            CallbackAction::ConfirmBan => write!(f, "confirm-ban"),
            CallbackAction::ShowInfo => write!(f, "show-info"),
        }
    }
}

/// Decoded button payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallbackPayload {
    pub action: CallbackAction,
    pub user_id: i64,
    pub msg_id: i32,
}

impl CallbackPayload {
    pub fn new(action: CallbackAction, user_id: i64, msg_id: i32) -> Self {
        Self { action, user_id, msg_id }
    }

    /// Same ids, different action
    pub fn with_action(self, action: CallbackAction) -> Self {
        Self { action, ..self }
    }

    pub fn encode(&self) -> String {
        encode(self.action, self.user_id, self.msg_id)
    }

    pub fn decode(payload: &str) -> Result<Self> {
        decode(payload)
    }
}

/// Build the wire form of a button payload
pub fn encode(action: CallbackAction, user_id: i64, msg_id: i32) -> String {
    format!("{}{}:{}", action.prefix(), user_id, msg_id)
}

/// Parse the wire form of a button payload
pub fn decode(payload: &str) -> Result<CallbackPayload> {
    let malformed = |reason: String| ModerationError::MalformedPayload {
        payload: payload.to_string(),
        reason,
    };

    if payload.chars().count() < 3 {
        return Err(malformed("too short".to_string()));
    }

    let mut chars = payload.chars();
    let (action, ids) = match chars.next().and_then(CallbackAction::from_prefix) {
        Some(action) => (action, chars.as_str()),
        None => (CallbackAction::Unban, payload),
    };

    let parts: Vec<&str> = ids.split(':').collect();
    if parts.len() != 2 {
        return Err(malformed("should have both ids".to_string()));
    }

    let user_id = parts[0]
        .parse::<i64>()
        .map_err(|e| malformed(format!("failed to parse userID {:?}: {}", parts[0], e)))?;
    let msg_id = parts[1]
        .parse::<i32>()
        .map_err(|e| malformed(format!("failed to parse msgID {:?}: {}", parts[1], e)))?;

    Ok(CallbackPayload { action, user_id, msg_id })
}
