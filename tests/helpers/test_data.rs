//! Test data factory
//!
//! Builders for the records, reports and button presses the handler tests use.

use chrono::{Duration, Utc};
use tg_spam_admin::models::keyboard::report_keyboard;
use tg_spam_admin::models::{
    AdminMessageRef, CallbackPress, CheckResult, ForwardedReport, IncomingMessage, Keyboard, MessageRecord,
    SpamRecord,
};

pub const PRIMARY_CHAT_ID: i64 = -1001234567890;
pub const ADMIN_CHAT_ID: i64 = -1009876543210;
pub const SUPER_USER: &str = "admin";

pub const SPAMMER_ID: i64 = 42;
pub const SPAMMER_USERNAME: &str = "spammer";
pub const SPAM_MSG_ID: i32 = 777;
pub const SPAM_TEXT: &str = "buy cheap meds now";

/// Admin message id of the ban report the presses belong to
pub const REPORT_MSG_ID: i32 = 55;

/// Indexed primary-chat message
pub fn message_record(user_id: i64, username: &str, msg_id: i32, text: &str) -> MessageRecord {
    MessageRecord {
        time: Utc::now(),
        chat_id: PRIMARY_CHAT_ID,
        user_id,
        username: username.to_string(),
        msg_id,
        text: text.to_string(),
    }
}

pub fn spammer_record() -> MessageRecord {
    message_record(SPAMMER_ID, SPAMMER_USERNAME, SPAM_MSG_ID, SPAM_TEXT)
}

pub fn spam_checks() -> Vec<CheckResult> {
    vec![
        CheckResult::new("samples", true, "matches a spam sample"),
        CheckResult::new("stopword", false, "no stop words"),
    ]
}

pub fn spam_record(user_id: i64) -> SpamRecord {
    SpamRecord {
        time: Utc::now(),
        user_id,
        checks: spam_checks(),
    }
}

pub fn forwarded(text: &str) -> ForwardedReport {
    ForwardedReport {
        message_id: 9001,
        text: text.to_string(),
        forwarded: true,
        from_username: SUPER_USER.to_string(),
    }
}

pub fn primary_message(user_id: i64, username: &str, msg_id: i32, text: &str) -> IncomingMessage {
    IncomingMessage {
        message_id: msg_id,
        chat_id: PRIMARY_CHAT_ID,
        text: text.to_string(),
        user_id,
        username: username.to_string(),
        display_name: "Spam Bot".to_string(),
        sender_chat_id: None,
        date: Utc::now(),
    }
}

/// Plain text Telegram returns for a ban report about the spammer
pub fn report_text() -> String {
    format!(
        "permanently banned {{{} {} Spam Bot}}\n\n{}",
        SPAMMER_ID, SPAMMER_USERNAME, SPAM_TEXT
    )
}

/// Press on the spammer's ban report, 65 seconds after it was posted
pub fn press(data: &str, keyboard: Keyboard) -> CallbackPress {
    CallbackPress {
        query_id: "query-1".to_string(),
        data: data.to_string(),
        from_username: "moderator".to_string(),
        message: AdminMessageRef {
            chat_id: ADMIN_CHAT_ID,
            message_id: REPORT_MSG_ID,
            text: report_text(),
            date: Utc::now() - Duration::seconds(65),
            keyboard,
        },
    }
}

/// Press on a fresh report, both buttons still present
pub fn report_press(data: &str) -> CallbackPress {
    press(data, report_keyboard(SPAMMER_ID, SPAM_MSG_ID))
}
