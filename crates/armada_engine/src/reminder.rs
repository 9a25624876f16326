//! Outbound reminder-scheduling contract.
//!
//! The engine never delivers notifications itself; it hands a
//! (player, kind, payload, fire time) tuple to an external scheduler that
//! guarantees a later callback. Scheduling is fire-and-forget: a failure is
//! logged and never rolls back the transaction that requested it.

use thiserror::Error;

use armada_core::time::Timestamp;

use crate::store::PlayerId;

/// What the eventual notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    /// A production upgrade will have completed.
    ProductionUpgrade,
    /// A raid will have returned.
    RaidReturn,
}

/// A scheduled-callback request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Who to notify.
    pub player: PlayerId,
    /// What the notification is about.
    pub kind: ReminderKind,
    /// Kind-specific payload, opaque to the scheduler.
    pub payload: String,
    /// When the callback should fire.
    pub fire_at: Timestamp,
}

/// Scheduling failed; the engine logs this and moves on.
#[derive(Debug, Error)]
#[error("reminder scheduling failed: {0}")]
pub struct ScheduleError(pub String);

/// External collaborator that accepts reminder requests.
pub trait ReminderScheduler: Send + Sync {
    /// Request a callback at `reminder.fire_at`. Best-effort.
    fn schedule(&self, reminder: Reminder) -> Result<(), ScheduleError>;
}

/// Test double that records every scheduled reminder.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    scheduled: std::sync::Mutex<Vec<Reminder>>,
}

impl RecordingScheduler {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything scheduled so far.
    #[must_use]
    pub fn scheduled(&self) -> Vec<Reminder> {
        self.scheduled
            .lock()
            .expect("recording scheduler lock poisoned")
            .clone()
    }
}

impl ReminderScheduler for RecordingScheduler {
    fn schedule(&self, reminder: Reminder) -> Result<(), ScheduleError> {
        self.scheduled
            .lock()
            .expect("recording scheduler lock poisoned")
            .push(reminder);
        Ok(())
    }
}
