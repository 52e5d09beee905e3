//! # Dailydoro Core Library
//!
//! This library provides the core logic for the Dailydoro Pomodoro timer and
//! daily journal. Front ends (the `dailydoro` CLI) own the tick source and the
//! rendering; everything else lives here.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a second-granular state machine driven by `tick()`
//!   calls; phase transitions are returned as values, never performed as I/O
//! - **Session Log**: append-only history of completed phases
//! - **Task List**: fixed 10-slot daily checklist
//! - **Export**: daily summary as Markdown or a print view
//! - **Storage**: JSON documents in a SQLite-backed key-value store, TOML
//!   configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Phase state machine
//! - [`Pomodoro`]: Adapter applying transitions to the log and notifier
//! - [`SessionLog`], [`TaskList`]: Persisted collections
//! - [`Database`]: Key-value persistence
//! - [`Config`]: Application configuration management

pub mod app;
pub mod error;
pub mod events;
pub mod export;
pub mod history;
pub mod notify;
pub mod reflection;
pub mod storage;
pub mod tasks;
pub mod timer;

pub use app::Pomodoro;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use export::{ExportFormat, SummaryInput};
pub use history::{SessionEntry, SessionLog};
pub use notify::{NotificationGate, NotificationRequest, Notifier, Permission};
pub use reflection::{ReflectionNote, REFLECTION_MAX_CHARS};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use tasks::{TaskEntry, TaskList, TASK_SLOTS};
pub use timer::{format_clock, Phase, PhaseDurations, TimerEngine, TimerState, Transition};
