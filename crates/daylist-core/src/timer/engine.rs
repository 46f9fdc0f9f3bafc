//! Focus timer implementation.
//!
//! The timer is a cooperative countdown state machine. It does not
//! use internal threads or wall-clock reads - the caller is
//! responsible for calling `tick()` once per second while the timer
//! is running, and exactly one driving loop may exist per instance.
//!
//! ## State Transitions
//!
//! ```text
//! Focus --(countdown hits 0)--> Break --(countdown hits 0)--> Focus
//! ```
//!
//! Whether the next interval starts running after a flip is the
//! `auto_continue` policy, not a fixed behavior.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::TimerEvent;

/// Configured durations never drop below one minute.
pub const MIN_DURATION_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Focus,
    Break,
}

impl TimerMode {
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Focus => "Focus",
            TimerMode::Break => "Break",
        }
    }
}

/// Durations and continuation policy, normally read from config.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimerSettings {
    pub focus_secs: u64,
    pub break_secs: u64,
    /// Start the next interval automatically after a mode flip.
    pub auto_continue: bool,
}

impl TimerSettings {
    pub fn from_minutes(focus_minutes: u64, break_minutes: u64, auto_continue: bool) -> Self {
        Self {
            focus_secs: focus_minutes.saturating_mul(60).max(MIN_DURATION_SECS),
            break_secs: break_minutes.saturating_mul(60).max(MIN_DURATION_SECS),
            auto_continue,
        }
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self::from_minutes(10, 5, false)
    }
}

/// Weak reference to the task a session is bound to, display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: String,
    pub title: String,
    pub estimated_minutes: Option<u32>,
}

/// Core focus timer.
///
/// Invariant: `0 <= remaining_secs <= configured_secs` and
/// `configured_secs >= MIN_DURATION_SECS` in every reachable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    settings: TimerSettings,
    /// Focus interval duration; adjustable, used on reset and on the
    /// flip back from a break.
    focus_secs: u64,
    mode: TimerMode,
    /// Total duration of the current countdown.
    configured_secs: u64,
    remaining_secs: u64,
    running: bool,
    task: Option<TaskRef>,
}

impl FocusTimer {
    /// Create an idle timer in Focus mode with the configured focus
    /// duration.
    pub fn new(settings: TimerSettings) -> Self {
        let focus_secs = settings.focus_secs.max(MIN_DURATION_SECS);
        Self {
            settings,
            focus_secs,
            mode: TimerMode::Focus,
            configured_secs: focus_secs,
            remaining_secs: focus_secs,
            running: false,
            task: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn configured_secs(&self) -> u64 {
        self.configured_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn task(&self) -> Option<&TaskRef> {
        self.task.as_ref()
    }

    /// 0.0 .. 1.0 progress within the current countdown.
    pub fn progress(&self) -> f64 {
        if self.configured_secs == 0 {
            return 0.0;
        }
        let elapsed = self.configured_secs.saturating_sub(self.remaining_secs);
        (elapsed as f64 / self.configured_secs as f64).clamp(0.0, 1.0)
    }

    /// Remaining time as zero-padded `MM:SS`.
    pub fn format_remaining(&self) -> String {
        format_mm_ss(self.remaining_secs)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> TimerEvent {
        TimerEvent::StateSnapshot {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            configured_secs: self.configured_secs,
            running: self.running,
            progress: self.progress(),
            task_id: self.task.as_ref().map(|t| t.id.clone()),
            task_title: self.task.as_ref().map(|t| t.title.clone()),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a focus session. Binding a task sets the focus duration
    /// from its estimate (minutes) when it has one; otherwise the
    /// configured default applies.
    pub fn start(&mut self, task: Option<TaskRef>) -> TimerEvent {
        if let Some(task) = task {
            self.focus_secs = task
                .estimated_minutes
                .map(|m| u64::from(m).saturating_mul(60))
                .filter(|&secs| secs > 0)
                .unwrap_or(self.settings.focus_secs)
                .max(MIN_DURATION_SECS);
            self.task = Some(task);
        }
        self.mode = TimerMode::Focus;
        self.configured_secs = self.focus_secs;
        self.remaining_secs = self.configured_secs;
        self.running = true;
        TimerEvent::TimerStarted {
            mode: self.mode,
            duration_secs: self.configured_secs,
            task_id: self.task.as_ref().map(|t| t.id.clone()),
            at: Utc::now(),
        }
    }

    /// Flip the running flag without touching the remaining time.
    pub fn toggle(&mut self) -> TimerEvent {
        self.running = !self.running;
        if self.running {
            TimerEvent::TimerResumed {
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            }
        } else {
            TimerEvent::TimerPaused {
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            }
        }
    }

    /// Stop and return to an idle Focus countdown at the configured
    /// focus duration.
    pub fn reset(&mut self) -> TimerEvent {
        self.running = false;
        self.mode = TimerMode::Focus;
        self.configured_secs = self.focus_secs;
        self.remaining_secs = self.configured_secs;
        TimerEvent::TimerReset {
            duration_secs: self.configured_secs,
            at: Utc::now(),
        }
    }

    /// Change the focus duration by whole minutes, floored at one
    /// minute. When idle the remaining time follows; mid-run the
    /// remaining time is only clamped down so it never exceeds the
    /// new total. Returns the new configured focus duration.
    pub fn adjust(&mut self, delta_minutes: i64) -> u64 {
        let delta = delta_minutes.saturating_mul(60);
        let next = (self.focus_secs as i64)
            .saturating_add(delta)
            .max(MIN_DURATION_SECS as i64) as u64;
        self.focus_secs = next;
        if self.mode == TimerMode::Focus {
            self.configured_secs = next;
            if self.running {
                self.remaining_secs = self.remaining_secs.min(next);
            } else {
                self.remaining_secs = next;
            }
        }
        self.focus_secs
    }

    /// Set an absolute focus duration and reset the remaining time
    /// to it immediately.
    pub fn set_custom(&mut self, minutes: u64) -> u64 {
        let secs = minutes.saturating_mul(60).max(MIN_DURATION_SECS);
        self.focus_secs = secs;
        self.configured_secs = secs;
        self.remaining_secs = secs;
        self.configured_secs
    }

    /// Add minutes to both the configured and remaining time without
    /// touching the running state; usable mid-countdown.
    pub fn extend(&mut self, minutes: u64) -> TimerEvent {
        let added = minutes.saturating_mul(60);
        self.configured_secs = self.configured_secs.saturating_add(added);
        self.remaining_secs = self.remaining_secs.saturating_add(added);
        if self.mode == TimerMode::Focus {
            self.focus_secs = self.configured_secs;
        }
        TimerEvent::TimerExtended {
            added_secs: added,
            remaining_secs: self.remaining_secs,
            configured_secs: self.configured_secs,
            at: Utc::now(),
        }
    }

    /// Advance the countdown by one second. Returns
    /// `Some(TimerCompleted)` when the interval finishes and the
    /// mode flips.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        let finished = self.mode;
        self.mode = match self.mode {
            TimerMode::Focus => TimerMode::Break,
            TimerMode::Break => TimerMode::Focus,
        };
        self.configured_secs = match self.mode {
            TimerMode::Focus => self.focus_secs,
            TimerMode::Break => self.settings.break_secs.max(MIN_DURATION_SECS),
        };
        self.remaining_secs = self.configured_secs;
        self.running = self.settings.auto_continue;
        Some(TimerEvent::TimerCompleted {
            finished_mode: finished,
            next_mode: self.mode,
            next_duration_secs: self.configured_secs,
            running: self.running,
            at: Utc::now(),
        })
    }
}

/// Zero-padded `MM:SS` rendering of a second count.
pub fn format_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
