//! Fixed-delay echo stub
//!
//! Placeholder responder used until the classifier backend is connected.

use super::{GatewayError, Responder};
use async_trait::async_trait;
use std::time::Duration;

/// Default simulated latency, matching the source UI's setTimeout
const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Echo responder that answers after a fixed delay and never fails
pub struct StubResponder {
    delay: Duration,
}

impl StubResponder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_DELAY,
        }
    }

    /// Override the simulated latency (tests use short or zero delays)
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for StubResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Responder for StubResponder {
    async fn respond(&self, user_text: &str) -> Result<String, GatewayError> {
        tokio::time::sleep(self.delay).await;
        Ok(format!(
            "I see you said: {user_text}. (I am currently a dummy UI, connect my brain next!)"
        ))
    }
}
