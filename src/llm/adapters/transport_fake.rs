//! Fake transport for testing
//!
//! Uses fixture strings instead of real HTTP calls and records every
//! request it receives.

use crate::llm::adapters::transport_types::{AdapterError, SyncTransport};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Request captured by `FakeTransport`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[derive(Debug, Clone)]
enum FakeReply {
    Body(String),
    Network(String),
    Status(u16, String),
}

/// Fake transport for testing (uses fixture strings)
#[derive(Debug)]
pub struct FakeTransport {
    /// Replies handed out in order; the last one repeats
    replies: Mutex<VecDeque<FakeReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    fn from_replies(replies: Vec<FakeReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `response`
    pub fn new(response: &str) -> Self {
        Self::from_replies(vec![FakeReply::Body(response.to_string())])
    }

    /// Answer with each body in turn, repeating the last
    pub fn with_sequence(responses: &[&str]) -> Self {
        Self::from_replies(
            responses
                .iter()
                .map(|r| FakeReply::Body(r.to_string()))
                .collect(),
        )
    }

    /// Fail every request with a network error
    pub fn with_error(msg: &str) -> Self {
        Self::from_replies(vec![FakeReply::Network(msg.to_string())])
    }

    /// Fail every request with an HTTP status and body
    pub fn with_status(status: u16, body: &str) -> Self {
        Self::from_replies(vec![FakeReply::Status(status, body.to_string())])
    }

    /// Queue a network failure after the currently queued replies
    pub fn then_error(self, msg: &str) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(FakeReply::Network(msg.to_string()));
        }
        self
    }

    /// Queue a body after the currently queued replies
    pub fn then_body(self, response: &str) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(FakeReply::Body(response.to_string()));
        }
        self
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Body of the most recent request
    pub fn last_body(&self) -> Option<String> {
        self.requests().last().map(|r| r.body.clone())
    }

    fn next_reply(&self) -> FakeReply {
        let mut replies = match self.replies.lock() {
            Ok(r) => r,
            Err(e) => return FakeReply::Network(e.to_string()),
        };
        if replies.len() > 1 {
            replies.pop_front().unwrap_or(FakeReply::Body(String::new()))
        } else {
            replies
                .front()
                .cloned()
                .unwrap_or(FakeReply::Body(String::new()))
        }
    }
}

impl SyncTransport for FakeTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: body.to_string(),
            });
        }

        match self.next_reply() {
            FakeReply::Body(body) => Ok(body),
            FakeReply::Network(msg) => Err(AdapterError::Network(msg)),
            FakeReply::Status(status, body) => Err(AdapterError::from_status(status, body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_transport_basic() {
        let transport = FakeTransport::new("test response");
        let result = transport.post_json("http://test", &[], "{}");
        assert_eq!(result.unwrap(), "test response");
        assert_eq!(transport.post_json("http://test", &[], "{}").unwrap(), "test response");
    }

    #[test]
    fn test_fake_transport_with_error() {
        let transport = FakeTransport::with_error("test error");
        let result = transport.post_json("http://test", &[], "{}");
        assert!(matches!(result, Err(AdapterError::Network(ref m)) if m == "test error"));
    }

    #[test]
    fn test_fake_transport_sequence_repeats_last() {
        let transport = FakeTransport::with_sequence(&["one", "two"]);
        assert_eq!(transport.post_json("u", &[], "").unwrap(), "one");
        assert_eq!(transport.post_json("u", &[], "").unwrap(), "two");
        assert_eq!(transport.post_json("u", &[], "").unwrap(), "two");
    }

    #[test]
    fn test_fake_transport_then_error() {
        let transport = FakeTransport::new("ok").then_error("down").then_body("back");
        assert!(transport.post_json("u", &[], "").is_ok());
        assert!(transport.post_json("u", &[], "").is_err());
        assert_eq!(transport.post_json("u", &[], "").unwrap(), "back");
    }

    #[test]
    fn test_fake_transport_records_requests() {
        let transport = FakeTransport::new("ok");
        transport
            .post_json("http://a", &[("X-Key", "v")], "{\"n\":1}")
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://a");
        assert_eq!(requests[0].headers, vec![("X-Key".to_string(), "v".to_string())]);
        assert_eq!(transport.last_body().unwrap(), "{\"n\":1}");
    }

    #[test]
    fn test_fake_transport_status() {
        let transport = FakeTransport::with_status(429, r#"{"error":{"message":"slow down"}}"#);
        let err = transport.post_json("u", &[], "").unwrap_err();
        assert_eq!(err.message(), "slow down");
    }
}
