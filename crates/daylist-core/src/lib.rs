//! # Daylist Core Library
//!
//! Core business logic for daylist, a command-line client for a
//! remote personal task service. The CLI binary is a thin layer over
//! this crate.
//!
//! ## Architecture
//!
//! - **Task model**: typed task records validated at the API
//!   boundary, plus the deterministic ordering engine and the
//!   derived inbox/day views
//! - **Focus timer**: a cooperative countdown state machine that the
//!   caller ticks once per second
//! - **API client**: thin async wrapper over the service's HTTP
//!   endpoints; one request per operation, no retries
//! - **Session**: explicit bearer-token state injected into the API
//!   client
//! - **Capture**: transcript-to-task extraction through Gemini
//! - **Storage**: TOML configuration under `~/.config/daylist`
//!
//! ## Key Components
//!
//! - [`Task`]: the task record and its ordering rules
//! - [`FocusTimer`]: core timer state machine
//! - [`ApiClient`]: remote service client
//! - [`Config`]: application configuration management

pub mod api;
pub mod capture;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod task;
pub mod timer;

pub use api::types::{AuthResponse, BreakdownResponse, User};
pub use api::ApiClient;
pub use capture::{CapturedTask, GeminiClient};
pub use error::{ApiError, CaptureError, ConfigError, CoreError, ValidationError};
pub use events::TimerEvent;
pub use session::Session;
pub use storage::{Config, FocusConfig, GeminiConfig};
pub use task::{NewTask, SubTask, Task, TaskUpdate};
pub use timer::{FocusTimer, TaskRef, TimerMode, TimerSettings};
