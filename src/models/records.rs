//! Records kept by the message index and produced by the spam detector

use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// A primary-chat message as remembered by the locator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub time: DateTime<Utc>,
    pub chat_id: i64,
    pub user_id: i64,
    pub username: String,
    pub msg_id: i32,
    pub text: String,
}

impl fmt::Display for MessageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{time: {}, chat: {}, user: {}:{}, msg: {}}}",
            self.time.format("%Y-%m-%dT%H:%M:%SZ"),
            self.chat_id,
            self.username,
            self.user_id,
            self.msg_id
        )
    }
}

/// Outcome of one spam check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub spam: bool,
    pub details: String,
}

impl CheckResult {
    pub fn new(name: impl Into<String>, spam: bool, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spam,
            details: details.into(),
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.spam { "spam" } else { "ham" };
        write!(f, "{}: {}, {}", self.name, verdict, self.details)
    }
}

/// Spam checks recorded for a user at detection time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpamRecord {
    pub time: DateTime<Utc>,
    pub user_id: i64,
    pub checks: Vec<CheckResult>,
}

/// Verdict of the detector for a single message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorResponse {
    pub spam: bool,
    pub check_results: Vec<CheckResult>,
}
