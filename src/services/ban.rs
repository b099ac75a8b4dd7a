//! Ban executor
//!
//! Every destructive call against the primary chat goes through here, so
//! dry mode (simulate everything) and training mode (hold back automatic
//! bans) are enforced in one place.

use std::fmt;
use std::time::Duration;
use chrono::Utc;
use tracing::info;
use crate::utils::errors::Result;
use crate::utils::logging::log_moderation_action;
use super::transport::Transport;

/// Telegram treats bans longer than 366 days as permanent
pub const PERMANENT_BAN_DURATION: Duration = Duration::from_secs(400 * 24 * 60 * 60);

/// Telegram also treats bans shorter than 30 seconds as permanent
const MIN_BAN_DURATION: Duration = Duration::from_secs(30);
const SHORT_BAN_DURATION: Duration = Duration::from_secs(60);

/// A single ban, built per action and consumed immediately
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanRequest {
    pub user_id: i64,
    /// Sender chat when the message was posted on behalf of a channel
    pub channel_id: Option<i64>,
    pub chat_id: i64,
    pub duration: Duration,
    pub dry: bool,
    pub training: bool,
}

impl BanRequest {
    pub fn permanent(chat_id: i64, user_id: i64) -> Self {
        Self {
            user_id,
            channel_id: None,
            chat_id,
            duration: PERMANENT_BAN_DURATION,
            dry: false,
            training: false,
        }
    }

    pub fn with_channel(mut self, channel_id: Option<i64>) -> Self {
        self.channel_id = channel_id;
        self
    }

    pub fn with_modes(mut self, dry: bool, training: bool) -> Self {
        self.dry = dry;
        self.training = training;
        self
    }
}

/// What the executor actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// Dry mode, nothing was sent
    DryRun,
    /// Training mode, left for an admin to confirm
    Deferred,
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutcome::Applied => write!(f, "applied"),
            ActionOutcome::DryRun => write!(f, "dry-run"),
            ActionOutcome::Deferred => write!(f, "deferred"),
        }
    }
}

/// Ban duration actually sent to Telegram
pub fn effective_duration(requested: Duration) -> Duration {
    if requested < MIN_BAN_DURATION {
        SHORT_BAN_DURATION
    } else {
        requested
    }
}

/// Ban a user, or the channel it posted as
pub async fn ban_user_or_channel(transport: &dyn Transport, request: &BanRequest) -> Result<ActionOutcome> {
    if request.training {
        log_moderation_action("ban", request.user_id, request.chat_id, "deferred");
        return Ok(ActionOutcome::Deferred);
    }
    if request.dry {
        log_moderation_action("ban", request.user_id, request.chat_id, "dry-run");
        return Ok(ActionOutcome::DryRun);
    }

    match request.channel_id {
        Some(channel_id) => {
            info!(channel_id = channel_id, chat_id = request.chat_id, "Banning channel sender");
            transport.ban_sender_chat(request.chat_id, channel_id).await?;
        }
        None => {
            let duration = effective_duration(request.duration);
            let until = Utc::now() + chrono::Duration::seconds(duration.as_secs() as i64);
            transport.ban_member(request.chat_id, request.user_id, until).await?;
        }
    }

    log_moderation_action("ban", request.user_id, request.chat_id, "applied");
    Ok(ActionOutcome::Applied)
}

/// Lift a ban; nothing to lift in training mode since no ban was issued
pub async fn unban_user(
    transport: &dyn Transport,
    chat_id: i64,
    user_id: i64,
    dry: bool,
    training: bool,
) -> Result<ActionOutcome> {
    let outcome = if training {
        ActionOutcome::Deferred
    } else if dry {
        ActionOutcome::DryRun
    } else {
        transport.unban_member(chat_id, user_id).await?;
        ActionOutcome::Applied
    };

    log_moderation_action("unban", user_id, chat_id, &outcome.to_string());
    Ok(outcome)
}

/// Delete a primary-chat message
pub async fn delete_message(transport: &dyn Transport, chat_id: i64, msg_id: i32, dry: bool) -> Result<ActionOutcome> {
    if dry {
        info!(chat_id = chat_id, msg_id = msg_id, "Dry run, message not deleted");
        return Ok(ActionOutcome::DryRun);
    }

    transport.delete_message(chat_id, msg_id).await?;
    info!(chat_id = chat_id, msg_id = msg_id, "Message deleted");
    Ok(ActionOutcome::Applied)
}
