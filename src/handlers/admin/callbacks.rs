//! Admin button presses on ban reports
//!
//! A report starts with "change ban" and "info" buttons. "change ban" swaps
//! them for an unban/keep decision; either decision is final and clears the
//! keyboard. "info" appends the recorded spam checks and can be pressed at any
//! point before a decision.

use chrono::Utc;
use tracing::{debug, info};
use crate::models::admin_message::{annotate, append_spam_results, extract_clean, extract_username};
use crate::models::callback::{self, CallbackAction, CallbackPayload};
use crate::models::events::CallbackPress;
use crate::models::keyboard::{decision_keyboard, without_info_button, Keyboard};
use crate::services::ban::{self, BanRequest};
use crate::services::ModerationContext;
use crate::utils::errors::{ErrorList, Result};
use crate::utils::helpers::{elapsed_since, escape_markdown_v1};
use crate::utils::logging::{log_callback_outcome, log_ignored_event};

/// Dispatch a button press by the action encoded in its payload
pub async fn handle_admin_callback(ctx: &ModerationContext, press: &CallbackPress) -> Result<()> {
    if press.message.chat_id != ctx.admin_chat_id {
        log_ignored_event("callback", press.message.chat_id, "not the admin chat");
        return Ok(());
    }

    let payload = callback::decode(&press.data)?;
    debug!(
        action = %payload.action,
        user_id = payload.user_id,
        msg_id = payload.msg_id,
        actor = %press.from_username,
        "Admin callback"
    );

    let result = match payload.action {
        CallbackAction::AskConfirm => ask_ban_confirmation(ctx, press, payload)
            .await
            .map_err(|e| e.context("failed to make ban confirmation dialog")),
        CallbackAction::ConfirmBan => ban_confirmed(ctx, press, payload)
            .await
            .map_err(|e| e.context("failed confirmation ban")),
        CallbackAction::ShowInfo => show_info(ctx, press, payload)
            .await
            .map_err(|e| e.context("failed to show spam info")),
        CallbackAction::Unban => unban_confirmed(ctx, press, payload)
            .await
            .map_err(|e| e.context("failed to unban user")),
    };

    let details = result.as_ref().err().map(ToString::to_string);
    log_callback_outcome(&press.from_username, &press.data, result.is_ok(), details.as_deref());
    result
}

/// Replace the report buttons with the unban/keep pair
async fn ask_ban_confirmation(ctx: &ModerationContext, press: &CallbackPress, payload: CallbackPayload) -> Result<()> {
    let keyboard = decision_keyboard(payload, ctx.training);
    ctx.transport
        .edit_message_keyboard(press.message.chat_id, press.message.message_id, &keyboard)
        .await
}

/// Keep the ban: mark the report, learn the body as spam, and in training
/// mode carry out the ban that was held back
async fn ban_confirmed(ctx: &ModerationContext, press: &CallbackPress, payload: CallbackPayload) -> Result<()> {
    let message = &press.message;
    let elapsed = elapsed_since(message.date, Utc::now());
    let text = annotate(&message.text, "ban confirmed", &press.from_username, elapsed);
    ctx.transport
        .edit_message_text(message.chat_id, message.message_id, &text, &Keyboard::new(), false)
        .await
        .map_err(|e| e.context("failed to clear confirmation"))?;

    let body = extract_clean(&message.text).map_err(|e| e.context("failed to get clean message"))?;
    ctx.detector.update_spam(&body).await?;

    if ctx.training {
        delete_and_ban(ctx, payload.user_id, payload.msg_id)
            .await
            .map_err(|e| e.context(format!("failed to ban user {}", payload.user_id)))?;
    }

    info!(user_id = payload.user_id, actor = %press.from_username, "Ban confirmed");
    Ok(())
}

/// Lift the ban: learn the body as ham, unban, approve the user, mark the report
async fn unban_confirmed(ctx: &ModerationContext, press: &CallbackPress, payload: CallbackPayload) -> Result<()> {
    let message = &press.message;
    ctx.transport
        .answer_callback(&press.query_id, Some("accepted"))
        .await
        .map_err(|e| e.context("failed to send callback response"))?;

    let body = extract_clean(&message.text).map_err(|e| e.context("failed to get clean message"))?;
    ctx.detector.update_ham(&body).await?;

    ban::unban_user(
        ctx.transport.as_ref(),
        ctx.primary_chat_id,
        payload.user_id,
        ctx.dry,
        ctx.training,
    )
    .await
    .map_err(|e| e.context(format!("failed to unban user {}", payload.user_id)))?;

    let name = extract_username(&message.text).unwrap_or_else(|e| {
        debug!(error = %e, "Username not found in admin message");
        String::new()
    });
    ctx.detector
        .add_approved_user(payload.user_id, &name)
        .await
        .map_err(|e| e.context(format!("failed to add user {} to approved list", payload.user_id)))?;

    let elapsed = elapsed_since(message.date, Utc::now());
    let text = annotate(&message.text, "unbanned", &press.from_username, elapsed);
    ctx.transport
        .edit_message_text(message.chat_id, message.message_id, &text, &Keyboard::new(), false)
        .await
        .map_err(|e| e.context("failed to edit message"))?;

    info!(user_id = payload.user_id, name = %name, actor = %press.from_username, "User unbanned");
    Ok(())
}

/// Append the recorded spam checks and drop the info button
async fn show_info(ctx: &ModerationContext, press: &CallbackPress, payload: CallbackPayload) -> Result<()> {
    let message = &press.message;
    let record = ctx.locator.spam(payload.user_id).await;
    let text = append_spam_results(
        &escape_markdown_v1(&message.text),
        record.as_ref().map(|r| r.checks.as_slice()),
    );
    let keyboard = without_info_button(&message.keyboard);

    ctx.transport
        .edit_message_text(message.chat_id, message.message_id, &text, &keyboard, true)
        .await
        .map_err(|e| e.context("failed to send spam info"))
}

/// Ban held back by training mode, now confirmed by an admin
///
/// Super-users keep their membership but their message is still removed.
/// The delete always goes through on this path; only the ban honours dry mode.
pub async fn delete_and_ban(ctx: &ModerationContext, user_id: i64, msg_id: i32) -> Result<()> {
    let mut errors = ErrorList::new();
    let request = BanRequest::permanent(ctx.primary_chat_id, user_id).with_modes(ctx.dry, false);

    let username = ctx.locator.user_name_by_id(user_id).await.unwrap_or_default();
    let from_super = !username.is_empty() && ctx.super_users.is_super(&username);
    if !from_super {
        errors.collect(
            ban::ban_user_or_channel(ctx.transport.as_ref(), &request)
                .await
                .map_err(|e| e.context(format!("failed to ban user {}", user_id))),
        );
    }

    errors.collect(
        ban::delete_message(ctx.transport.as_ref(), ctx.primary_chat_id, msg_id, false)
            .await
            .map_err(|e| e.context(format!("failed to delete message {}", msg_id))),
    );

    if errors.is_empty() {
        if from_super {
            info!(msg_id = msg_id, username = %username, user_id = user_id, "Message deleted, user is super, not banned");
        } else {
            info!(msg_id = msg_id, username = %username, user_id = user_id, "Message deleted, user banned");
        }
    }
    errors.into_result()
}
