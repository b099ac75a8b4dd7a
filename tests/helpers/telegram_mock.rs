//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, Request, ResponseTemplate,
};

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Bot whose requests go to this server
    pub fn bot(&self) -> Bot {
        let url = url::Url::parse(&self.server.uri()).expect("mock server uri is a valid url");
        Bot::new(test_bot_token()).set_api_url(url)
    }

    /// Respond to `method` with `ok: true` and the given result
    pub async fn mock_ok(&self, api_method: &str, result: Value) {
        Mock::given(method("POST"))
            .and(path_regex(method_path(api_method)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": result
            })))
            .mount(&self.server)
            .await;
    }

    /// Respond to `method` with a Bot API error
    pub async fn mock_error(&self, api_method: &str, description: &str) {
        Mock::given(method("POST"))
            .and(path_regex(method_path(api_method)))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": description
            })))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self, message_id: i32) {
        self.mock_ok("sendMessage", sent_message(message_id)).await;
    }

    /// Setup all moderation endpoints with default success responses
    pub async fn setup_default_mocks(&self) {
        self.mock_send_message(123).await;
        self.mock_ok("editMessageText", sent_message(123)).await;
        self.mock_ok("editMessageReplyMarkup", sent_message(123)).await;
        for api_method in [
            "deleteMessage",
            "banChatMember",
            "banChatSenderChat",
            "unbanChatMember",
            "answerCallbackQuery",
        ] {
            self.mock_ok(api_method, json!(true)).await;
        }
    }

    /// Requests received for one Bot API method
    pub async fn requests_to(&self, api_method: &str) -> Vec<Request> {
        let suffix = format!("/{}", api_method.to_lowercase());
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.url.path().to_lowercase().ends_with(&suffix))
            .collect()
    }

    /// JSON body of the only request made to a method
    pub async fn single_body(&self, api_method: &str) -> Value {
        let requests = self.requests_to(api_method).await;
        assert_eq!(requests.len(), 1, "expected exactly one {} request", api_method);
        serde_json::from_slice(&requests[0].body).expect("request body is json")
    }

    /// Verify that a specific endpoint was called
    pub async fn verify_endpoint_called(&self, api_method: &str, times: usize) {
        let matching = self.requests_to(api_method).await.len();
        assert_eq!(
            matching, times,
            "Expected {} calls to {}, but got {}",
            times, api_method, matching
        );
    }
}

/// Method names are matched case-insensitively, teloxide may lowercase them
fn method_path(api_method: &str) -> String {
    format!(r"(?i)^/bot[^/]+/{}$", api_method)
}

fn sent_message(message_id: i32) -> Value {
    json!({
        "message_id": message_id,
        "from": {
            "id": 12345,
            "is_bot": true,
            "first_name": "TestBot",
            "username": "test_bot"
        },
        "chat": {
            "id": -1009876543210_i64,
            "title": "Admin Chat",
            "type": "supergroup"
        },
        "date": 1640995200,
        "text": "Test message"
    })
}

/// Helper function to create a test bot token
pub fn test_bot_token() -> String {
    "12345:test_token".to_string()
}
