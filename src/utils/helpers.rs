//! Helper functions and utilities
//!
//! This module contains common text and time helpers used by the moderation
//! handlers.

use chrono::{DateTime, Duration, Utc};

/// Shorten text to at most `max_chars` characters, appending `...` when cut.
///
/// Works on characters, not bytes, so multi-byte text is never split.
pub fn shrink(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

/// Escape characters that have a meaning in Telegram's legacy Markdown mode
pub fn escape_markdown_v1(text: &str) -> String {
    text.replace('_', r"\_")
        .replace('*', r"\*")
        .replace('`', r"\`")
        .replace('[', r"\[")
}

/// Time elapsed since `since`, rounded to whole seconds
pub fn elapsed_since(since: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    let elapsed = now.signed_duration_since(since);
    let millis = elapsed.num_milliseconds().max(0);
    Duration::seconds((millis + 500) / 1000)
}

/// Format a duration compactly, e.g. `45s`, `2m5s`, `1h0m3s`
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Flatten multi-line text into a single line
pub fn single_line(text: &str) -> String {
    text.replace('\n', " ")
}
