//! Telegram update routing
//!
//! Converts teloxide updates into the crate's event types, routes them by
//! chat and logs handler failures by severity.

use std::sync::Arc;
use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{MaybeInaccessibleMessage, Update};
use tracing::{debug, error, info, warn};
use crate::models::events::{AdminMessageRef, CallbackPress, ForwardedReport, IncomingMessage};
use crate::services::transport::from_markup;
use crate::services::ModerationContext;
use crate::utils::errors::{ErrorSeverity, ModerationError, Result};
use crate::utils::helpers::escape_markdown_v1;
use crate::utils::logging::log_ignored_event;
use super::admin::{handle_admin_callback, handle_forwarded_report};
use super::messages::handle_primary_message;

pub type HandlerResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Build the update handler tree
pub fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_edited_message().endpoint(on_edited_message))
        .branch(Update::filter_callback_query().endpoint(on_callback))
}

/// Route a new message by the chat it was posted in
pub async fn on_message(msg: Message, ctx: Arc<ModerationContext>) -> HandlerResult {
    let chat_id = msg.chat.id.0;

    if chat_id == ctx.admin_chat_id {
        if let Some(report) = forwarded_report(&msg) {
            let result = handle_forwarded_report(&ctx, &report).await;
            report_outcome(&ctx, "forwarded report", result).await;
        }
    } else if chat_id == ctx.primary_chat_id {
        if let Some(incoming) = incoming_message(&msg) {
            let result = handle_primary_message(&ctx, &incoming).await;
            report_outcome(&ctx, "primary message", result).await;
        }
    } else {
        log_ignored_event("message", chat_id, "unknown chat");
    }

    Ok(())
}

/// Edited primary-chat messages are checked again, spammers edit in links
pub async fn on_edited_message(msg: Message, ctx: Arc<ModerationContext>) -> HandlerResult {
    if msg.chat.id.0 != ctx.primary_chat_id {
        return Ok(());
    }
    if let Some(incoming) = incoming_message(&msg) {
        let result = handle_primary_message(&ctx, &incoming).await;
        report_outcome(&ctx, "edited message", result).await;
    }
    Ok(())
}

pub async fn on_callback(query: CallbackQuery, ctx: Arc<ModerationContext>) -> HandlerResult {
    match callback_press(&query) {
        Some(press) => {
            let result = handle_admin_callback(&ctx, &press).await;
            report_outcome(&ctx, "callback", result).await;
        }
        None => debug!(callback_id = %query.id, "Callback without data or accessible message, ignored"),
    }
    Ok(())
}

/// Log a handler failure at a level matching its severity; a protected
/// super-user is also reported back to the admin chat
async fn report_outcome(ctx: &ModerationContext, kind: &str, result: Result<()>) {
    let err = match result {
        Ok(()) => return,
        Err(e) => e,
    };

    match err.severity() {
        ErrorSeverity::Info => info!(kind = kind, error = %err, "Handler finished without result"),
        ErrorSeverity::Warning => warn!(kind = kind, error = %err, "Handler rejected event"),
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(kind = kind, error = %err, recoverable = err.is_recoverable(), "Handler failed")
        }
    }

    if let ModerationError::SuperUserProtected { .. } = err.root() {
        let notice = escape_markdown_v1(&err.root().to_string());
        if let Err(e) = ctx.transport.send_message(ctx.admin_chat_id, &notice, None).await {
            warn!(error = %e, "Failed to send super-user notice to admin chat");
        }
    }
}

/// Text message of the primary chat
pub fn incoming_message(msg: &Message) -> Option<IncomingMessage> {
    let text = msg.text()?;
    let user = msg.from.as_ref();

    // anonymous admins post as the group itself, that is not a channel
    let sender_chat_id = msg
        .sender_chat
        .as_ref()
        .map(|chat| chat.id.0)
        .filter(|id| *id != msg.chat.id.0);

    Some(IncomingMessage {
        message_id: msg.id.0,
        chat_id: msg.chat.id.0,
        text: text.to_string(),
        user_id: user.map(|u| u.id.0 as i64).unwrap_or_default(),
        username: user.and_then(|u| u.username.clone()).unwrap_or_default(),
        display_name: user.map(|u| u.full_name()).unwrap_or_default(),
        sender_chat_id,
        date: msg.date,
    })
}

/// Text message of the admin chat, forwarded or not
pub fn forwarded_report(msg: &Message) -> Option<ForwardedReport> {
    let text = msg.text()?;

    Some(ForwardedReport {
        message_id: msg.id.0,
        text: text.to_string(),
        forwarded: msg.forward_origin().is_some(),
        from_username: msg
            .from
            .as_ref()
            .and_then(|u| u.username.clone())
            .unwrap_or_default(),
    })
}

/// Button press on a message the bot can still see
pub fn callback_press(query: &CallbackQuery) -> Option<CallbackPress> {
    let data = query.data.clone()?;
    let msg = match query.message.as_ref()? {
        MaybeInaccessibleMessage::Regular(msg) => msg,
        MaybeInaccessibleMessage::Inaccessible(_) => return None,
    };

    Some(CallbackPress {
        query_id: query.id.to_string(),
        data,
        from_username: query.from.username.clone().unwrap_or_default(),
        message: AdminMessageRef {
            chat_id: msg.chat.id.0,
            message_id: msg.id.0,
            text: msg.text().unwrap_or_default().to_string(),
            date: msg.date,
            keyboard: msg.reply_markup().map(from_markup).unwrap_or_default(),
        },
    })
}
