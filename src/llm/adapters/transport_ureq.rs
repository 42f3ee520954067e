//! Real HTTP transport using ureq
//!
//! Blocking client. No timeout is set, so the agent defaults apply.

use crate::llm::adapters::transport_types::{AdapterError, SyncTransport};
use tracing::debug;

/// Real HTTP transport using ureq
#[derive(Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncTransport for UreqTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        debug!(url, body_len = body.len(), "POST");

        let mut request = self.agent.post(url);
        for (key, value) in headers {
            request = request.set(key, value);
        }

        // Non-2xx statuses surface as ureq::Error::Status and are mapped there
        let response = request.send_string(body)?;
        debug!(status = response.status(), "response");

        Ok(response.into_string()?)
    }
}
