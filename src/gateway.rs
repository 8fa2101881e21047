//! Responder gateway abstraction
//!
//! Provides the replaceable seam between the conversation core and whatever
//! produces agent replies. Today that is a fixed-delay echo stub; a
//! network-backed implementation swaps in behind the same contract without
//! touching the store or the orchestration.

mod error;
mod stub;

pub use error::{GatewayError, GatewayErrorKind};
pub use stub::StubResponder;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Common interface for responders: asynchronously map user input text to
/// agent reply text. Inherently fallible even though the stub never fails -
/// the orchestration is written against the failure path.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce an agent reply for the given user input
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when the responder is unreachable or the
    /// call exceeds its deadline.
    async fn respond(&self, user_text: &str) -> Result<String, GatewayError>;
}

#[async_trait]
impl<T: Responder + ?Sized> Responder for Arc<T> {
    async fn respond(&self, user_text: &str) -> Result<String, GatewayError> {
        (**self).respond(user_text).await
    }
}

/// Logging wrapper for responders
pub struct LoggingResponder<R> {
    inner: R,
}

impl<R: Responder> LoggingResponder<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: Responder> Responder for LoggingResponder<R> {
    async fn respond(&self, user_text: &str) -> Result<String, GatewayError> {
        let start = std::time::Instant::now();
        let result = self.inner.respond(user_text).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    duration_ms = %duration.as_millis(),
                    reply_len = reply.len(),
                    "Responder call completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Responder call failed"
                );
            }
        }

        result
    }
}

/// Timeout wrapper for responders
///
/// An overdue call resolves through the failure path as
/// [`GatewayErrorKind::Timeout`], so the orchestrator always leaves
/// `Awaiting` even when the inner responder stalls.
pub struct TimeoutResponder<R> {
    inner: R,
    limit: Duration,
}

impl<R: Responder> TimeoutResponder<R> {
    pub fn new(inner: R, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl<R: Responder> Responder for TimeoutResponder<R> {
    async fn respond(&self, user_text: &str) -> Result<String, GatewayError> {
        match tokio::time::timeout(self.limit, self.inner.respond(user_text)).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::timeout(format!(
                "no response within {}ms",
                self.limit.as_millis()
            ))),
        }
    }
}
