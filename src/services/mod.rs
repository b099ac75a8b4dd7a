//! Services module
//!
//! This module contains the collaborators the moderation handlers depend on:
//! the Telegram transport, the message index, the super-user list, the spam
//! detector and the ban executor.

pub mod ban;
pub mod detector;
pub mod locator;
pub mod super_users;
pub mod transport;

// Re-export commonly used services
pub use ban::{ActionOutcome, BanRequest, PERMANENT_BAN_DURATION};
pub use detector::{Detector, SampleDetector};
pub use locator::{Locator, MemoryLocator};
pub use super_users::{SuperUserList, SuperUsers};
pub use transport::{TeloxideTransport, Transport};

use std::sync::Arc;
use teloxide::Bot;
use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Everything a moderation handler needs, passed explicitly to each of them
#[derive(Clone)]
pub struct ModerationContext {
    pub transport: Arc<dyn Transport>,
    pub locator: Arc<dyn Locator>,
    pub super_users: Arc<dyn SuperUsers>,
    pub detector: Arc<dyn Detector>,
    pub primary_chat_id: i64,
    pub admin_chat_id: i64,
    pub training: bool,
    pub dry: bool,
}

impl ModerationContext {
    /// Create a context from explicit collaborators, modes off
    pub fn new(
        transport: Arc<dyn Transport>,
        locator: Arc<dyn Locator>,
        super_users: Arc<dyn SuperUsers>,
        detector: Arc<dyn Detector>,
        primary_chat_id: i64,
        admin_chat_id: i64,
    ) -> Self {
        Self {
            transport,
            locator,
            super_users,
            detector,
            primary_chat_id,
            admin_chat_id,
            training: false,
            dry: false,
        }
    }

    pub fn with_modes(mut self, dry: bool, training: bool) -> Self {
        self.dry = dry;
        self.training = training;
        self
    }

    /// Create the production context: teloxide transport, in-memory index,
    /// file-backed sample detector
    pub async fn from_settings(bot: Bot, settings: &Settings) -> Result<Self> {
        let detector = SampleDetector::load(&settings.samples).await?;

        Ok(Self::new(
            Arc::new(TeloxideTransport::new(bot)),
            Arc::new(MemoryLocator::new(&settings.locator)),
            Arc::new(SuperUserList::new(&settings.bot.super_users)),
            Arc::new(detector),
            settings.bot.primary_chat_id,
            settings.bot.admin_chat_id,
        )
        .with_modes(settings.modes.dry, settings.modes.training))
    }
}
