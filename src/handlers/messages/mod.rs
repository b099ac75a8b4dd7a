//! Primary chat message handlers
//!
//! Every text message of the moderated chat is indexed so a later forward can
//! be traced back to its author, then classified. Detected spam is deleted,
//! its author banned and a report posted to the admin chat.

use tracing::{debug, info};
use crate::handlers::admin::report_ban;
use crate::models::events::IncomingMessage;
use crate::models::records::{MessageRecord, SpamRecord};
use crate::services::ban::{self, BanRequest};
use crate::services::ModerationContext;
use crate::utils::errors::{ErrorList, Result};
use crate::utils::helpers::shrink;
use crate::utils::logging::log_ignored_event;

/// Handle a message posted in the primary chat
pub async fn handle_primary_message(ctx: &ModerationContext, msg: &IncomingMessage) -> Result<()> {
    if msg.chat_id != ctx.primary_chat_id {
        log_ignored_event("message", msg.chat_id, "not the primary chat");
        return Ok(());
    }
    if msg.text.trim().is_empty() {
        log_ignored_event("message", msg.chat_id, "no text");
        return Ok(());
    }

    ctx.locator
        .add_message(MessageRecord {
            time: msg.date,
            chat_id: msg.chat_id,
            user_id: msg.user_id,
            username: msg.username.clone(),
            msg_id: msg.message_id,
            text: msg.text.clone(),
        })
        .await
        .map_err(|e| e.context("failed to index message"))?;

    if !msg.username.is_empty() && ctx.super_users.is_super(&msg.username) {
        debug!(username = %msg.username, "Message from super-user, not checked");
        return Ok(());
    }

    let response = ctx
        .detector
        .on_message(msg.user_id, &msg.username, &msg.text)
        .await;
    if !response.spam {
        return Ok(());
    }

    info!(
        user = %msg.user_label(),
        text = %shrink(&msg.text, 50),
        "Spam detected"
    );

    let mut errors = ErrorList::new();
    errors.collect(
        ctx.locator
            .add_spam(SpamRecord {
                time: msg.date,
                user_id: msg.user_id,
                checks: response.check_results,
            })
            .await
            .map_err(|e| e.context("failed to record spam checks")),
    );

    if ctx.training {
        debug!(msg_id = msg.message_id, "Training mode, message kept");
    } else {
        errors.collect(
            ban::delete_message(ctx.transport.as_ref(), ctx.primary_chat_id, msg.message_id, ctx.dry)
                .await
                .map_err(|e| e.context(format!("failed to delete message {}", msg.message_id))),
        );
    }

    let request = BanRequest::permanent(ctx.primary_chat_id, msg.user_id)
        .with_channel(msg.sender_chat_id)
        .with_modes(ctx.dry, ctx.training);
    errors.collect(
        ban::ban_user_or_channel(ctx.transport.as_ref(), &request)
            .await
            .map_err(|e| e.context(format!("failed to ban user {}", msg.user_id))),
    );

    errors.collect(report_ban(ctx, msg).await);
    errors.into_result()
}
