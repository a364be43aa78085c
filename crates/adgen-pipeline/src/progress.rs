//! Progress reporting for pipeline runs.
//!
//! Events are delivered over a bounded channel. The sender enforces stage
//! order itself: an event that would go backwards, skip a stage, or follow a
//! terminal event is dropped.

use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use adgen_models::{ProgressEvent, Stage};

/// More than the number of events a single run can produce.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 16;

/// Progress sender for one run.
pub struct ProgressSender {
    tx: Option<mpsc::Sender<ProgressEvent>>,
    last: Mutex<Option<Stage>>,
}

impl ProgressSender {
    /// Create a new progress sender.
    pub fn new(tx: mpsc::Sender<ProgressEvent>) -> Self {
        Self {
            tx: Some(tx),
            last: Mutex::new(None),
        }
    }

    /// Create a sender together with the receiving end.
    pub fn channel() -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (tx, rx) = mpsc::channel(PROGRESS_CHANNEL_CAPACITY);
        (Self::new(tx), rx)
    }

    /// Sender that discards every event but still tracks the stage.
    pub fn noop() -> Self {
        Self {
            tx: None,
            last: Mutex::new(None),
        }
    }

    /// Emit the start of `stage` with its default message.
    pub fn stage(&self, stage: Stage) -> bool {
        self.send(ProgressEvent::for_stage(stage))
    }

    /// Emit a terminal failure.
    pub fn failed(&self, message: impl Into<String>) -> bool {
        self.send(ProgressEvent::new(Stage::Failed, message))
    }

    /// Emit the cancellation tag.
    pub fn cancelled(&self) -> bool {
        self.stage(Stage::Cancelled)
    }

    /// Send an event (non-blocking). Returns whether it was accepted.
    pub fn send(&self, event: ProgressEvent) -> bool {
        {
            let mut last = match self.last.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if !Stage::is_valid_transition(*last, event.stage) {
                warn!(
                    previous = ?*last,
                    next = %event.stage,
                    "Dropping out-of-order progress event"
                );
                return false;
            }
            *last = Some(event.stage);
        }

        if let Some(tx) = &self.tx {
            // Use try_send to avoid blocking; the receiver may already be gone.
            if let Err(e) = tx.try_send(event) {
                debug!("Progress receiver unavailable: {}", e);
            }
        }
        true
    }

    /// Last stage accepted, if any.
    pub fn last_stage(&self) -> Option<Stage> {
        match self.last.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Whether a terminal event has been sent.
    pub fn is_finished(&self) -> bool {
        self.last_stage().map(|s| s.is_terminal()).unwrap_or(false)
    }
}
