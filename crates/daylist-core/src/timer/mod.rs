pub mod engine;

pub use engine::{FocusTimer, TaskRef, TimerMode, TimerSettings, MIN_DURATION_SECS};
