//! Port for the couple activity log.
//!
//! Defines the [`ActivityLogger`] trait for recording what couples do
//! (answers, reveals, pairing, chat, quizzes) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port keeps a machine-readable
//! record of couple activity (JSONL).

use serde_json::Value;

/// A structured activity event.
pub struct ActivityEvent {
    /// Event type identifier (e.g., "answer_submitted", "question_revealed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ActivityEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging activity events.
///
/// `log` is synchronous and infallible; a failed write must not fail the
/// request that produced the event.
pub trait ActivityLogger: Send + Sync {
    fn log(&self, event: ActivityEvent);
}

/// No-op implementation for tests and when the activity log is disabled.
pub struct NoActivityLogger;

impl ActivityLogger for NoActivityLogger {
    fn log(&self, _event: ActivityEvent) {}
}
