//! Inline keyboards attached to admin-chat messages

use serde::{Deserialize, Serialize};
use super::callback::{CallbackAction, CallbackPayload};

/// Rows of inline buttons
pub type Keyboard = Vec<Vec<InlineButton>>;

/// A single callback button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub label: String,
    pub data: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Buttons attached to a fresh ban report
pub fn report_keyboard(user_id: i64, msg_id: i32) -> Keyboard {
    let payload = CallbackPayload::new(CallbackAction::AskConfirm, user_id, msg_id);
    vec![vec![
        InlineButton::new("⛔︎ change ban", payload.encode()),
        InlineButton::new(
            "⚑ info",
            payload.with_action(CallbackAction::ShowInfo).encode(),
        ),
    ]]
}

/// Decision pair shown after "change ban" was pressed
pub fn decision_keyboard(payload: CallbackPayload, training: bool) -> Keyboard {
    let keep_label = if training { "Confirm ban" } else { "Keep it banned" };
    vec![vec![
        InlineButton::new(
            "Unban for real",
            payload.with_action(CallbackAction::Unban).encode(),
        ),
        InlineButton::new(
            keep_label,
            payload.with_action(CallbackAction::ConfirmBan).encode(),
        ),
    ]]
}

/// Drop everything but the first button of the first row
pub fn without_info_button(keyboard: &Keyboard) -> Keyboard {
    let mut trimmed = keyboard.clone();
    if let Some(first_row) = trimmed.first_mut() {
        first_row.truncate(1);
    }
    trimmed
}

/// Count of buttons across all rows
pub fn button_count(keyboard: &Keyboard) -> usize {
    keyboard.iter().map(Vec::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_keyboard_payloads() {
        let keyboard = report_keyboard(42, 7);
        assert_eq!(button_count(&keyboard), 2);
        assert_eq!(keyboard[0][0].data, "?42:7");
        assert_eq!(keyboard[0][1].data, "!42:7");
    }

    #[test]
    fn test_decision_keyboard_labels() {
        let payload = CallbackPayload::new(CallbackAction::AskConfirm, 42, 7);

        let keyboard = decision_keyboard(payload, false);
        assert_eq!(keyboard[0][0].label, "Unban for real");
        assert_eq!(keyboard[0][0].data, "42:7");
        assert_eq!(keyboard[0][1].label, "Keep it banned");
        assert_eq!(keyboard[0][1].data, "+42:7");

        let keyboard = decision_keyboard(payload, true);
        assert_eq!(keyboard[0][1].label, "Confirm ban");
    }

    #[test]
    fn test_without_info_button() {
        let trimmed = without_info_button(&report_keyboard(1, 2));
        assert_eq!(button_count(&trimmed), 1);
        assert_eq!(trimmed[0][0].data, "?1:2");

        assert!(without_info_button(&Vec::new()).is_empty());
    }
}
