//! Mock responders and helpers for testing
//!
//! These mocks enable exercising the full session loop without real latency.

use crate::conversation::StoreEvent;
use crate::gateway::{GatewayError, Responder};
use crate::runtime::ChatSession;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock Responder
// ============================================================================

/// Mock responder that returns queued results instantly
pub struct MockResponder {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    /// Record of all prompts received
    pub requests: Mutex<Vec<String>>,
}

impl MockResponder {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: GatewayError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded prompts
    pub fn recorded_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn respond(&self, user_text: &str) -> Result<String, GatewayError> {
        self.requests.lock().unwrap().push(user_text.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::unavailable("No mock reply queued")))
    }
}

// ============================================================================
// Gated Mock Responder (for in-flight testing)
// ============================================================================

/// Mock responder that holds its call open until released, so tests can make
/// assertions while a request is deterministically in flight
pub struct GatedResponder {
    inner: MockResponder,
    /// Notified (with a stored permit) when a call starts
    pub request_started: Arc<Notify>,
    /// The call resolves once this is notified
    pub release: Arc<Notify>,
}

impl GatedResponder {
    pub fn new() -> Self {
        Self {
            inner: MockResponder::new(),
            request_started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    pub fn queue_reply(&self, text: impl Into<String>) {
        self.inner.queue_reply(text);
    }
}

impl Default for GatedResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Responder for GatedResponder {
    async fn respond(&self, user_text: &str) -> Result<String, GatewayError> {
        self.inner
            .requests
            .lock()
            .unwrap()
            .push(user_text.to_string());
        self.request_started.notify_one();
        self.release.notified().await;
        self.inner
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::unavailable("No mock reply queued")))
    }
}

// ============================================================================
// Test Session
// ============================================================================

/// A session plus a store subscription, for awaiting state changes
pub struct TestSession {
    pub session: ChatSession,
    pub events: tokio::sync::broadcast::Receiver<StoreEvent>,
}

impl TestSession {
    pub fn start<R: Responder + 'static>(responder: R) -> Self {
        let session = ChatSession::start(responder);
        let events = session.subscribe();
        Self { session, events }
    }

    /// Wait until the store reports `busy = false`, with timeout
    pub async fn wait_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            match tokio::time::timeout(Duration::from_millis(50), self.events.recv()).await {
                Ok(Ok(StoreEvent::BusyChanged { busy: false })) => return true,
                Ok(Ok(_)) => continue,
                _ => continue,
            }
        }
        false
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{ConversationStore, Sender, GREETING};
    use crate::gateway::StubResponder;
    use crate::runtime::SessionRuntime;
    use crate::state_machine::Event;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_mock_responder() {
        let mock = MockResponder::new();
        mock.queue_reply("hello");

        let reply = mock.respond("hi").await.unwrap();
        assert_eq!(reply, "hello");

        // Second call should fail (no more replies)
        let result = mock.respond("hi again").await;
        assert!(result.is_err());

        assert_eq!(mock.recorded_requests(), vec!["hi", "hi again"]);
    }

    /// Integration test: the scripted weather scenario, end to end with the
    /// real echo stub (zero delay)
    #[tokio::test]
    async fn test_submit_appends_user_then_agent_reply() {
        let mut ts = TestSession::start(StubResponder::with_delay(Duration::ZERO));

        let seeded = ts.session.snapshot();
        assert_eq!(seeded.messages.len(), 1);
        assert_eq!(seeded.messages[0].text, GREETING);
        assert!(!seeded.busy);

        ts.session.submit("What's the weather?").await.unwrap();
        assert!(ts.wait_until_idle(Duration::from_secs(2)).await);

        let snap = ts.session.snapshot();
        assert_eq!(snap.messages.len(), 3);
        assert_eq!(snap.messages[1].sender, Sender::User);
        assert_eq!(snap.messages[1].text, "What's the weather?");
        assert_eq!(snap.messages[2].sender, Sender::Agent);
        assert!(snap.messages[2]
            .text
            .contains("I see you said: What's the weather?"));
        assert!(!snap.busy);
    }

    /// Integration test: a failed responder call appends a visible agent
    /// message, resets busy, and leaves the session usable
    #[tokio::test]
    async fn test_failure_appends_notice_and_recovers() {
        let responder = MockResponder::new();
        responder.queue_error(GatewayError::unavailable("brain offline"));
        responder.queue_reply("second time lucky");

        let mut ts = TestSession::start(responder);

        ts.session.submit("hello?").await.unwrap();
        assert!(ts.wait_until_idle(Duration::from_secs(2)).await);

        let snap = ts.session.snapshot();
        assert_eq!(snap.messages.len(), 3);
        assert_eq!(snap.messages[2].sender, Sender::Agent);
        assert!(snap.messages[2].text.contains("brain offline"));
        assert!(!snap.busy);

        // The failure is recoverable: the user may retry.
        ts.session.submit("retry").await.unwrap();
        assert!(ts.wait_until_idle(Duration::from_secs(2)).await);

        let snap = ts.session.snapshot();
        assert_eq!(snap.messages.len(), 5);
        assert_eq!(snap.messages[4].text, "second time lucky");
    }

    /// Integration test: submitting while a response is in flight is dropped
    #[tokio::test]
    async fn test_rapid_double_submit_drops_second() {
        let responder = GatedResponder::new();
        responder.queue_reply("reply about a");
        let request_started = responder.request_started.clone();
        let release = responder.release.clone();

        let mut ts = TestSession::start(responder);

        ts.session.submit("a").await.unwrap();
        tokio::time::timeout(Duration::from_secs(1), request_started.notified())
            .await
            .expect("responder call should start");

        // Second submit arrives while the first is still in flight.
        ts.session.submit("b").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snap = ts.session.snapshot();
        assert_eq!(snap.messages.len(), 2, "\"b\" must be dropped");
        assert_eq!(snap.messages[1].text, "a");
        assert!(snap.busy);

        release.notify_one();
        assert!(ts.wait_until_idle(Duration::from_secs(2)).await);

        let snap = ts.session.snapshot();
        assert_eq!(snap.messages.len(), 3);
        assert_eq!(snap.messages[2].text, "reply about a");
        let user_count = snap.messages.iter().filter(|m| m.is_user()).count();
        assert_eq!(user_count, 1);
    }

    /// Integration test: blank submissions never touch the store
    #[tokio::test]
    async fn test_blank_submissions_are_no_ops() {
        let ts = TestSession::start(MockResponder::new());

        ts.session.submit("").await.unwrap();
        ts.session.submit("   ").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snap = ts.session.snapshot();
        assert_eq!(snap.messages.len(), 1, "only the greeting");
        assert!(!snap.busy);
    }

    /// Ids stay pairwise distinct across an entire session of exchanges
    #[tokio::test]
    async fn test_ids_distinct_across_session() {
        let responder = MockResponder::new();
        responder.queue_reply("r1");
        responder.queue_reply("r2");
        responder.queue_reply("r3");

        let mut ts = TestSession::start(responder);

        for text in ["one", "two", "three"] {
            ts.session.submit(text).await.unwrap();
            assert!(ts.wait_until_idle(Duration::from_secs(2)).await);
        }

        let snap = ts.session.snapshot();
        assert_eq!(snap.messages.len(), 7);
        let mut ids: Vec<_> = snap.messages.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    /// Dropping every session handle closes the event channel and ends the
    /// runtime task, which releases its responder
    #[tokio::test]
    async fn test_dropping_session_ends_runtime() {
        struct MarkedResponder {
            _marker: Arc<()>,
        }

        #[async_trait]
        impl Responder for MarkedResponder {
            async fn respond(&self, _user_text: &str) -> Result<String, GatewayError> {
                Ok("ok".to_string())
            }
        }

        let marker = Arc::new(());
        let session = ChatSession::start(MarkedResponder {
            _marker: marker.clone(),
        });
        drop(session);

        // The runtime drops the responder (and the marker) when it stops.
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while Arc::strong_count(&marker) > 1 && tokio::time::Instant::now() < deadline {
            tokio::task::yield_now().await;
        }
        assert_eq!(Arc::strong_count(&marker), 1, "runtime task must end");
    }

    /// A resolution event with no call outstanding is dropped without
    /// killing the loop or touching the store
    #[tokio::test]
    async fn test_stale_resolution_is_dropped() {
        let store = ConversationStore::new();
        let (event_tx, event_rx) = mpsc::channel(8);
        let responder = MockResponder::new();
        responder.queue_reply("real reply");

        let runtime = SessionRuntime::new(store.clone(), responder, event_rx, event_tx.clone());
        tokio::spawn(runtime.run());

        event_tx
            .send(Event::ReplyReady {
                text: "stale".to_string(),
            })
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snap = store.snapshot();
        assert_eq!(snap.messages.len(), 1);
        assert!(!snap.busy);

        // The loop is still alive and processes a real submission.
        event_tx
            .send(Event::Submit {
                text: "hello".to_string(),
            })
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let snap = store.snapshot();
        assert_eq!(snap.messages.len(), 3);
        assert_eq!(snap.messages[2].text, "real reply");
    }
}
