//! Test context for unified test setup
//!
//! Builds a [`ModerationContext`] wired to recording mocks that share one
//! call log.

use std::sync::Arc;
use tg_spam_admin::services::{ModerationContext, SuperUserList};

use super::mocks::{Call, CallLog, MockDetector, MockLocator, MockTransport};
use super::test_data::{ADMIN_CHAT_ID, PRIMARY_CHAT_ID, SUPER_USER};

/// Mocks plus the context handed to handlers
pub struct TestContext {
    pub log: CallLog,
    pub transport: Arc<MockTransport>,
    pub locator: Arc<MockLocator>,
    pub detector: Arc<MockDetector>,
    pub ctx: ModerationContext,
}

impl TestContext {
    /// Context with dry and training modes off
    pub fn new() -> Self {
        Self::with_modes(false, false)
    }

    pub fn with_modes(dry: bool, training: bool) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let log = CallLog::new();
        let transport = Arc::new(MockTransport::new(log.clone()));
        let locator = Arc::new(MockLocator::new(log.clone()));
        let detector = Arc::new(MockDetector::new(log.clone()));

        let ctx = ModerationContext::new(
            transport.clone(),
            locator.clone(),
            Arc::new(SuperUserList::new([SUPER_USER])),
            detector.clone(),
            PRIMARY_CHAT_ID,
            ADMIN_CHAT_ID,
        )
        .with_modes(dry, training);

        Self {
            log,
            transport,
            locator,
            detector,
            ctx,
        }
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.log.calls().await
    }

    pub async fn names(&self) -> Vec<&'static str> {
        self.log.names().await
    }
}
