//! Recording collaborators
//!
//! Every mock appends to one shared, ordered call log so tests can assert the
//! exact sequence of side effects across transport, detector and locator.
//! Any operation can be told to fail by name.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use tg_spam_admin::models::{CheckResult, DetectorResponse, Keyboard, MessageRecord, SpamRecord};
use tg_spam_admin::services::{Detector, Locator, Transport};
use tg_spam_admin::{ModerationError, Result};

/// A side effect observed by a mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SendMessage { chat_id: i64, text: String, keyboard: Option<Keyboard> },
    EditMessageText { chat_id: i64, message_id: i32, text: String, keyboard: Keyboard, markdown: bool },
    EditMessageKeyboard { chat_id: i64, message_id: i32, keyboard: Keyboard },
    DeleteMessage { chat_id: i64, message_id: i32 },
    BanMember { chat_id: i64, user_id: i64 },
    BanSenderChat { chat_id: i64, sender_chat_id: i64 },
    UnbanMember { chat_id: i64, user_id: i64 },
    AnswerCallback { query_id: String, text: Option<String> },
    OnMessage { user_id: i64, text: String },
    UpdateSpam(String),
    UpdateHam(String),
    AddApprovedUser { user_id: i64, name: String },
    RemoveApprovedUser(i64),
    AddMessage(String),
    AddSpam(i64),
}

impl Call {
    /// Short operation name, as used by `fail_on`
    pub fn name(&self) -> &'static str {
        match self {
            Call::SendMessage { .. } => "send_message",
            Call::EditMessageText { .. } => "edit_message_text",
            Call::EditMessageKeyboard { .. } => "edit_message_keyboard",
            Call::DeleteMessage { .. } => "delete_message",
            Call::BanMember { .. } => "ban_member",
            Call::BanSenderChat { .. } => "ban_sender_chat",
            Call::UnbanMember { .. } => "unban_member",
            Call::AnswerCallback { .. } => "answer_callback",
            Call::OnMessage { .. } => "on_message",
            Call::UpdateSpam(_) => "update_spam",
            Call::UpdateHam(_) => "update_ham",
            Call::AddApprovedUser { .. } => "add_approved_user",
            Call::RemoveApprovedUser(_) => "remove_approved_user",
            Call::AddMessage(_) => "add_message",
            Call::AddSpam(_) => "add_spam",
        }
    }

    /// Calls that change Telegram or learned state
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Call::OnMessage { .. })
    }
}

/// Shared call log with failure injection
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<RwLock<Vec<Call>>>,
    failures: Arc<RwLock<HashSet<&'static str>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call of the named operation fail
    pub async fn fail_on(&self, name: &'static str) {
        self.failures.write().await.insert(name);
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.read().await.clone()
    }

    pub async fn names(&self) -> Vec<&'static str> {
        self.calls.read().await.iter().map(Call::name).collect()
    }

    pub async fn mutations(&self) -> Vec<Call> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect()
    }

    pub async fn count(&self, name: &str) -> usize {
        self.calls.read().await.iter().filter(|call| call.name() == name).count()
    }

    pub async fn clear(&self) {
        self.calls.write().await.clear();
    }

    /// Record the call, then fail it if requested
    async fn record(&self, call: Call) -> Result<()> {
        let name = call.name();
        self.calls.write().await.push(call);
        if self.failures.read().await.contains(name) {
            return Err(ModerationError::Transport(format!("{} failed", name)));
        }
        Ok(())
    }
}

/// Recording [`Transport`]
pub struct MockTransport {
    log: CallLog,
    next_message_id: RwLock<i32>,
    pub last_ban_until: RwLock<Option<DateTime<Utc>>>,
}

impl MockTransport {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            next_message_id: RwLock::new(1000),
            last_ban_until: RwLock::new(None),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send_message(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>) -> Result<i32> {
        self.log
            .record(Call::SendMessage {
                chat_id,
                text: text.to_string(),
                keyboard: keyboard.cloned(),
            })
            .await?;
        let mut id = self.next_message_id.write().await;
        *id += 1;
        Ok(*id)
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        keyboard: &Keyboard,
        markdown: bool,
    ) -> Result<()> {
        self.log
            .record(Call::EditMessageText {
                chat_id,
                message_id,
                text: text.to_string(),
                keyboard: keyboard.clone(),
                markdown,
            })
            .await
    }

    async fn edit_message_keyboard(&self, chat_id: i64, message_id: i32, keyboard: &Keyboard) -> Result<()> {
        self.log
            .record(Call::EditMessageKeyboard {
                chat_id,
                message_id,
                keyboard: keyboard.clone(),
            })
            .await
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<()> {
        self.log.record(Call::DeleteMessage { chat_id, message_id }).await
    }

    async fn ban_member(&self, chat_id: i64, user_id: i64, until: DateTime<Utc>) -> Result<()> {
        *self.last_ban_until.write().await = Some(until);
        self.log.record(Call::BanMember { chat_id, user_id }).await
    }

    async fn ban_sender_chat(&self, chat_id: i64, sender_chat_id: i64) -> Result<()> {
        self.log.record(Call::BanSenderChat { chat_id, sender_chat_id }).await
    }

    async fn unban_member(&self, chat_id: i64, user_id: i64) -> Result<()> {
        self.log.record(Call::UnbanMember { chat_id, user_id }).await
    }

    async fn answer_callback(&self, query_id: &str, text: Option<&str>) -> Result<()> {
        self.log
            .record(Call::AnswerCallback {
                query_id: query_id.to_string(),
                text: text.map(str::to_string),
            })
            .await
    }
}

/// Recording [`Detector`] with a fixed verdict
pub struct MockDetector {
    log: CallLog,
    verdict: RwLock<DetectorResponse>,
}

impl MockDetector {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            verdict: RwLock::new(DetectorResponse::default()),
        }
    }

    pub async fn set_verdict(&self, spam: bool, checks: Vec<CheckResult>) {
        *self.verdict.write().await = DetectorResponse {
            spam,
            check_results: checks,
        };
    }
}

#[async_trait]
impl Detector for MockDetector {
    async fn on_message(&self, user_id: i64, _username: &str, text: &str) -> DetectorResponse {
        // classification never fails, only the record matters here
        let _ = self
            .log
            .record(Call::OnMessage {
                user_id,
                text: text.to_string(),
            })
            .await;
        self.verdict.read().await.clone()
    }

    async fn update_spam(&self, text: &str) -> Result<()> {
        self.log.record(Call::UpdateSpam(text.to_string())).await
    }

    async fn update_ham(&self, text: &str) -> Result<()> {
        self.log.record(Call::UpdateHam(text.to_string())).await
    }

    async fn add_approved_user(&self, user_id: i64, name: &str) -> Result<()> {
        self.log
            .record(Call::AddApprovedUser {
                user_id,
                name: name.to_string(),
            })
            .await
    }

    async fn remove_approved_user(&self, user_id: i64) -> Result<()> {
        self.log.record(Call::RemoveApprovedUser(user_id)).await
    }
}

/// [`Locator`] with preloaded records; writes are recorded
pub struct MockLocator {
    log: CallLog,
    messages: RwLock<HashMap<String, MessageRecord>>,
    spam: RwLock<HashMap<i64, SpamRecord>>,
}

impl MockLocator {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            messages: RwLock::new(HashMap::new()),
            spam: RwLock::new(HashMap::new()),
        }
    }

    /// Preload without recording a call
    pub async fn insert_message(&self, record: MessageRecord) {
        self.messages.write().await.insert(record.text.clone(), record);
    }

    pub async fn insert_spam(&self, record: SpamRecord) {
        self.spam.write().await.insert(record.user_id, record);
    }
}

#[async_trait]
impl Locator for MockLocator {
    async fn message(&self, text: &str) -> Option<MessageRecord> {
        self.messages.read().await.get(text).cloned()
    }

    async fn spam(&self, user_id: i64) -> Option<SpamRecord> {
        self.spam.read().await.get(&user_id).cloned()
    }

    async fn user_name_by_id(&self, user_id: i64) -> Option<String> {
        self.messages
            .read()
            .await
            .values()
            .find(|record| record.user_id == user_id)
            .map(|record| record.username.clone())
    }

    async fn add_message(&self, record: MessageRecord) -> Result<()> {
        self.log.record(Call::AddMessage(record.text.clone())).await?;
        self.insert_message(record).await;
        Ok(())
    }

    async fn add_spam(&self, record: SpamRecord) -> Result<()> {
        self.log.record(Call::AddSpam(record.user_id)).await?;
        self.insert_spam(record).await;
        Ok(())
    }
}
