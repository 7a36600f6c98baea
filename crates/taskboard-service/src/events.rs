//! Change-event fan-out.
//!
//! Every successful mutation publishes a `*_changed` signal (clients
//! re-fetch) followed by a human-readable notification. Delivery is
//! fire-and-forget: there is no acknowledgment, ordering guarantee across
//! clients, or retry.

use serde::Serialize;
use tokio::sync::broadcast;

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// An event pushed to connected clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum BoardEvent {
    /// The project collection changed; re-fetch.
    ProjectsChanged,
    /// The task collection changed; re-fetch.
    TasksChanged,
    /// The member collection changed; re-fetch.
    MembersChanged,
    /// Human-readable toast payload.
    Notification {
        message: String,
        #[serde(rename = "type")]
        kind: NoticeKind,
    },
}

/// Fan-out seam between the service and whatever realtime transport (if
/// any) the server runs with.
pub trait Notifier: Send + Sync {
    fn publish(&self, event: BoardEvent);

    fn notify(&self, message: String, kind: NoticeKind) {
        self.publish(BoardEvent::Notification { message, kind });
    }
}

/// Notifier for the plain REST variant: drops everything.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn publish(&self, _event: BoardEvent) {}
}

/// Notifier backed by a tokio broadcast channel; the SSE endpoint
/// subscribes each connected client to it.
pub struct BroadcastNotifier {
    tx: broadcast::Sender<BoardEvent>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Notifier for BroadcastNotifier {
    fn publish(&self, event: BoardEvent) {
        // Send only fails when nobody is subscribed.
        let _ = self.tx.send(event);
    }
}
