use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerMode;

/// Every timer state change produces an event. The CLI prints them;
/// a GUI shell would subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    TimerStarted {
        mode: TimerMode,
        duration_secs: u64,
        task_id: Option<String>,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A countdown reached zero; the mode flipped and the remaining
    /// time was reset for the next interval.
    TimerCompleted {
        finished_mode: TimerMode,
        next_mode: TimerMode,
        next_duration_secs: u64,
        running: bool,
        at: DateTime<Utc>,
    },
    TimerReset {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerExtended {
        added_secs: u64,
        remaining_secs: u64,
        configured_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        remaining_secs: u64,
        configured_secs: u64,
        running: bool,
        progress: f64,
        task_id: Option<String>,
        task_title: Option<String>,
        at: DateTime<Utc>,
    },
}
