//! Outbound Telegram operations
//!
//! Handlers talk to Telegram through the [`Transport`] trait so the moderation
//! flows can run against a recording double in tests. [`TeloxideTransport`]
//! is the production implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use teloxide::{
    Bot,
    payloads::{
        AnswerCallbackQuerySetters, BanChatMemberSetters, EditMessageReplyMarkupSetters,
        EditMessageTextSetters, SendMessageSetters,
    },
    requests::Requester,
    sugar::request::RequestLinkPreviewExt,
    types::{
        ChatId, InlineKeyboardButton, InlineKeyboardButtonKind,
        InlineKeyboardMarkup, MessageId, ParseMode, UserId,
    },
};
use tracing::debug;
use crate::models::keyboard::{InlineButton, Keyboard};
use crate::utils::errors::Result;
use crate::utils::helpers::shrink;

/// Telegram operations used by the moderation flows
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a Markdown message with link previews disabled, returning its id
    async fn send_message(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>) -> Result<i32>;

    /// Replace text and keyboard of a message; plain text unless `markdown`
    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        keyboard: &Keyboard,
        markdown: bool,
    ) -> Result<()>;

    async fn edit_message_keyboard(&self, chat_id: i64, message_id: i32, keyboard: &Keyboard) -> Result<()>;

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()>;

    async fn ban_member(&self, chat_id: i64, user_id: i64, until: DateTime<Utc>) -> Result<()>;

    async fn ban_sender_chat(&self, chat_id: i64, sender_chat_id: i64) -> Result<()>;

    async fn unban_member(&self, chat_id: i64, user_id: i64) -> Result<()>;

    /// Acknowledge a button press, optionally with a toast text
    async fn answer_callback(&self, query_id: &str, text: Option<&str>) -> Result<()>;
}

/// [`Transport`] backed by a teloxide [`Bot`]
#[derive(Clone)]
pub struct TeloxideTransport {
    bot: Bot,
}

impl TeloxideTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TeloxideTransport {
    async fn send_message(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>) -> Result<i32> {
        debug!(chat_id = chat_id, text = %shrink(text, 50), "Sending message");

        let mut request = self
            .bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Markdown)
            .disable_link_preview(true);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(to_markup(keyboard));
        }

        let message = request.await?;
        Ok(message.id.0)
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        keyboard: &Keyboard,
        markdown: bool,
    ) -> Result<()> {
        debug!(chat_id = chat_id, message_id = message_id, markdown = markdown, "Editing message text");

        let mut request = self
            .bot
            .edit_message_text(ChatId(chat_id), MessageId(message_id), text)
            .reply_markup(to_markup(keyboard));
        if markdown {
            request = request.parse_mode(ParseMode::Markdown);
        }

        request.await?;
        Ok(())
    }

    async fn edit_message_keyboard(&self, chat_id: i64, message_id: i32, keyboard: &Keyboard) -> Result<()> {
        debug!(chat_id = chat_id, message_id = message_id, "Editing message keyboard");

        self.bot
            .edit_message_reply_markup(ChatId(chat_id), MessageId(message_id))
            .reply_markup(to_markup(keyboard))
            .await?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await?;
        Ok(())
    }

    async fn ban_member(&self, chat_id: i64, user_id: i64, until: DateTime<Utc>) -> Result<()> {
        self.bot
            .ban_chat_member(ChatId(chat_id), UserId(user_id as u64))
            .until_date(until)
            .await?;
        Ok(())
    }

    async fn ban_sender_chat(&self, chat_id: i64, sender_chat_id: i64) -> Result<()> {
        self.bot
            .ban_chat_sender_chat(ChatId(chat_id), ChatId(sender_chat_id))
            .await?;
        Ok(())
    }

    async fn unban_member(&self, chat_id: i64, user_id: i64) -> Result<()> {
        self.bot
            .unban_chat_member(ChatId(chat_id), UserId(user_id as u64))
            .await?;
        Ok(())
    }

    async fn answer_callback(&self, query_id: &str, text: Option<&str>) -> Result<()> {
        let mut request = self
            .bot
            .answer_callback_query(query_id.to_owned());
        if let Some(text) = text {
            request = request.text(text);
        }

        request.await?;
        Ok(())
    }
}

/// Convert a keyboard into teloxide markup; an empty keyboard clears buttons
pub fn to_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.data.clone()))
            .collect::<Vec<_>>()
    }))
}

/// Callback buttons of a teloxide markup; other button kinds are skipped
pub fn from_markup(markup: &InlineKeyboardMarkup) -> Keyboard {
    markup
        .inline_keyboard
        .iter()
        .map(|row| {
            row.iter()
                .filter_map(|button| match &button.kind {
                    InlineKeyboardButtonKind::CallbackData(data) => {
                        Some(InlineButton::new(button.text.clone(), data.clone()))
                    }
                    _ => None,
                })
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .collect()
}
