//! Spam forwarded into the admin chat by hand
//!
//! An admin forwards a message the detector missed. Telegram hides the
//! original author of forwarded messages, so the author is found through the
//! message index by exact text, then banned and the text learned as spam.

use tracing::{debug, info};
use crate::models::admin_message::render_forwarded_notice;
use crate::models::events::ForwardedReport;
use crate::models::records::MessageRecord;
use crate::services::ban::{self, BanRequest};
use crate::services::ModerationContext;
use crate::utils::errors::{ErrorList, ModerationError, Result};
use crate::utils::helpers::shrink;

/// Find who originally posted `text`, refusing to act on super-users
pub async fn correlate(ctx: &ModerationContext, text: &str) -> Result<MessageRecord> {
    let record = ctx
        .locator
        .message(text)
        .await
        .ok_or_else(|| ModerationError::CorrelationNotFound {
            text: shrink(text, 50),
        })?;

    debug!(record = %record, "Forwarded message correlated");

    if !record.username.is_empty() && ctx.super_users.is_super(&record.username) {
        return Err(ModerationError::SuperUserProtected {
            username: record.username,
            user_id: record.user_id,
        });
    }

    Ok(record)
}

/// Handle a message posted into the admin chat
///
/// Regular admin chatter is ignored. For a forwarded message the steps run in
/// order: drop the author from the approved list, post detection results,
/// learn the text as spam, delete the original, ban the author. Dry mode stops
/// after the notification. Failing steps do not stop later ones, except the
/// spam sample update, which ends the sequence.
pub async fn handle_forwarded_report(ctx: &ModerationContext, report: &ForwardedReport) -> Result<()> {
    if !report.forwarded {
        debug!(message_id = report.message_id, "Regular admin chat message, ignored");
        return Ok(());
    }

    info!(
        from = %report.from_username,
        text = %shrink(&report.text, 50),
        "Forwarded message in admin chat"
    );

    let record = correlate(ctx, &report.text).await?;
    let mut errors = ErrorList::new();

    errors.collect(
        ctx.detector
            .remove_approved_user(record.user_id)
            .await
            .map_err(|e| e.context(format!("failed to remove user {} from approved list", record.user_id))),
    );

    let response = ctx
        .detector
        .on_message(record.user_id, &record.username, &report.text)
        .await;
    let notice = render_forwarded_notice(&record.username, record.user_id, &response.check_results);
    errors.collect(
        ctx.transport
            .send_message(ctx.admin_chat_id, &notice, None)
            .await
            .map_err(|e| e.context("failed to send spam detection results to admin chat")),
    );

    if ctx.dry {
        return errors.into_result();
    }

    if let Err(e) = ctx.detector.update_spam(&report.text).await {
        errors.push(e.context(format!("failed to update spam for {:?}", shrink(&report.text, 50))));
        return errors.into_result();
    }

    errors.collect(
        ban::delete_message(ctx.transport.as_ref(), ctx.primary_chat_id, record.msg_id, ctx.dry)
            .await
            .map_err(|e| e.context(format!("failed to delete message {}", record.msg_id))),
    );

    let request = BanRequest::permanent(ctx.primary_chat_id, record.user_id).with_modes(ctx.dry, ctx.training);
    errors.collect(
        ban::ban_user_or_channel(ctx.transport.as_ref(), &request)
            .await
            .map_err(|e| e.context(format!("failed to ban user {}", record.user_id))),
    );

    if errors.is_empty() {
        info!(username = %record.username, user_id = record.user_id, "Forwarded spam handled, user banned");
    }
    errors.into_result()
}
