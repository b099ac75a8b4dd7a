//! Text of admin-chat messages
//!
//! Telegram returns the rendered text of a message without markup, so the
//! reported body and the user name are recovered from what the bot wrote
//! earlier. The layout is: header line, blank line, body lines, then an
//! optional section opened by [`SPAM_RESULTS_MARKER`].

use std::sync::LazyLock;
use regex::Regex;
use crate::models::records::CheckResult;
use crate::utils::errors::{ModerationError, Result};
use crate::utils::helpers::{escape_markdown_v1, format_duration, shrink, single_line};

/// First line of the appended spam-check section
pub const SPAM_RESULTS_MARKER: &str = "spam detection results";

/// Shown when no spam checks are recorded for a user
pub const NO_SPAM_INFO: &str = "**can't get spam info**";

static MARKDOWN_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(.*?)\]\(tg://user\?id=\d+\)").expect("Regex will always be valid")
});

static PLAIN_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\d+ (\S+) .+?\}").expect("Regex will always be valid"));

/// Recover the reported message body from an admin message
pub fn extract_clean(text: &str) -> Result<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 2 {
        return Err(ModerationError::ExtractionNotFound(format!(
            "unexpected admin message layout: {:?}",
            text
        )));
    }

    let end = lines
        .iter()
        .position(|line| line.trim_start_matches('*').starts_with(SPAM_RESULTS_MARKER))
        .unwrap_or(lines.len());

    let mut body: Vec<&str> = if end > 2 {
        lines[2..end].to_vec()
    } else {
        Vec::new()
    };
    while body.last().is_some_and(|line| line.trim().is_empty()) {
        body.pop();
    }

    Ok(body.join("\n"))
}

/// Recover the banned user's name from an admin message
pub fn extract_username(text: &str) -> Result<String> {
    if let Some(name) = MARKDOWN_MENTION.captures(text).and_then(|c| c.get(1)) {
        return Ok(name.as_str().to_string());
    }
    if let Some(name) = PLAIN_MENTION.captures(text).and_then(|c| c.get(1)) {
        return Ok(name.as_str().to_string());
    }

    Err(ModerationError::ExtractionNotFound(format!(
        "no user mention in {:?}",
        shrink(text, 50)
    )))
}

/// Markdown text of a ban report
pub fn render_ban_report(user_label: &str, user_id: i64, body: &str) -> String {
    format!(
        "**permanently banned [{}](tg://user?id={})**\n\n{}\n\n",
        user_label,
        user_id,
        single_line(&escape_markdown_v1(body))
    )
}

/// Bulleted check lines, or the "no info" notice when there are none
pub fn render_check_lines(checks: &[CheckResult]) -> String {
    if checks.is_empty() {
        return NO_SPAM_INFO.to_string();
    }
    checks
        .iter()
        .map(|check| format!("- {}", escape_markdown_v1(&check.to_string())))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Notification posted after a forwarded report was acted on
pub fn render_forwarded_notice(username: &str, user_id: i64, checks: &[CheckResult]) -> String {
    format!(
        "**original detection results for {:?} ({})**\n\n{}\n\n\n*the user banned and message deleted*",
        username,
        user_id,
        render_check_lines(checks)
    )
}

/// Admin message text with the spam-check section appended
pub fn append_spam_results(text: &str, checks: Option<&[CheckResult]>) -> String {
    let section = match checks {
        Some(checks) => render_check_lines(checks),
        None => NO_SPAM_INFO.to_string(),
    };
    format!("{}\n\n**{}**\n{}", text, SPAM_RESULTS_MARKER, section)
}

/// Admin message text with a decision footer, e.g. `_unbanned by bob in 5s_`
pub fn annotate(text: &str, verb: &str, actor: &str, elapsed: chrono::Duration) -> String {
    format!("{}\n\n_{} by {} in {}_", text, verb, actor, format_duration(elapsed))
}
