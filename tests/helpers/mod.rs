//! Test helpers module
//!
//! This module provides utilities and helpers for testing the moderation
//! handlers: recording mocks, a test context, test data and a mock Telegram
//! API server.

#![allow(dead_code)]

pub mod mocks;
pub mod telegram_mock;
pub mod test_context;
pub mod test_data;

pub use mocks::*;
pub use telegram_mock::*;
pub use test_context::*;
pub use test_data::*;
