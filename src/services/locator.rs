//! Message index
//!
//! Telegram strips the original sender when a message is forwarded, so every
//! primary-chat message is remembered here and looked up again by its exact
//! text when an admin forwards it into the admin chat.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use crate::config::LocatorConfig;
use crate::models::records::{MessageRecord, SpamRecord};
use crate::utils::errors::Result;
use crate::utils::helpers::shrink;

/// Lookup of primary-chat messages and their spam checks
#[async_trait]
pub trait Locator: Send + Sync {
    /// Record with exactly this text, if still indexed
    async fn message(&self, text: &str) -> Option<MessageRecord>;

    /// Spam checks recorded for the user
    async fn spam(&self, user_id: i64) -> Option<SpamRecord>;

    /// Last known username of the user
    async fn user_name_by_id(&self, user_id: i64) -> Option<String>;

    async fn add_message(&self, record: MessageRecord) -> Result<()>;

    async fn add_spam(&self, record: SpamRecord) -> Result<()>;
}

#[derive(Default)]
struct LocatorState {
    messages: HashMap<String, MessageRecord>,
    spam: HashMap<i64, SpamRecord>,
}

/// In-memory [`Locator`]
///
/// Records older than the TTL are dropped on insert, but never below
/// `min_size` entries per map, so a quiet chat keeps its recent history.
#[derive(Clone)]
pub struct MemoryLocator {
    state: Arc<RwLock<LocatorState>>,
    ttl: Duration,
    min_size: usize,
}

impl MemoryLocator {
    pub fn new(config: &LocatorConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(LocatorState::default())),
            ttl: Duration::hours(config.ttl_hours as i64),
            min_size: config.min_size,
        }
    }

    /// Number of indexed messages
    pub async fn len(&self) -> usize {
        self.state.read().await.messages.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn cleanup(state: &mut LocatorState, ttl: Duration, min_size: usize) {
        let cutoff = Utc::now() - ttl;

        if state.messages.len() > min_size {
            let before = state.messages.len();
            state.messages.retain(|_, record| record.time > cutoff);
            debug!(removed = before - state.messages.len(), "Expired messages removed from index");
        }
        if state.spam.len() > min_size {
            state.spam.retain(|_, record| record.time > cutoff);
        }
    }
}

#[async_trait]
impl Locator for MemoryLocator {
    async fn message(&self, text: &str) -> Option<MessageRecord> {
        let state = self.state.read().await;
        let found = state.messages.get(text).cloned();
        debug!(text = %shrink(text, 50), found = found.is_some(), "Message lookup");
        found
    }

    async fn spam(&self, user_id: i64) -> Option<SpamRecord> {
        self.state.read().await.spam.get(&user_id).cloned()
    }

    async fn user_name_by_id(&self, user_id: i64) -> Option<String> {
        let state = self.state.read().await;
        state
            .messages
            .values()
            .filter(|record| record.user_id == user_id && !record.username.is_empty())
            .max_by_key(|record| record.time)
            .map(|record| record.username.clone())
    }

    async fn add_message(&self, record: MessageRecord) -> Result<()> {
        let mut state = self.state.write().await;
        debug!(record = %record, "Indexing message");
        state.messages.insert(record.text.clone(), record);
        Self::cleanup(&mut state, self.ttl, self.min_size);
        Ok(())
    }

    async fn add_spam(&self, record: SpamRecord) -> Result<()> {
        let mut state = self.state.write().await;
        debug!(user_id = record.user_id, checks = record.checks.len(), "Recording spam checks");
        state.spam.insert(record.user_id, record);
        Self::cleanup(&mut state, self.ttl, self.min_size);
        Ok(())
    }
}
