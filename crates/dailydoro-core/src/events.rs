use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every timer state change produces an Event.
/// The CLI renders them as status lines or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Local>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Local>,
    },
    TimerReset {
        at: DateTime<Local>,
    },
    PhaseCompleted {
        completed: Phase,
        next: Phase,
        completed_cycles: u32,
        remaining_secs: u64,
        at: DateTime<Local>,
    },
    StateSnapshot {
        phase: Phase,
        remaining_secs: u64,
        nominal_secs: u64,
        completed_cycles: u32,
        is_running: bool,
        progress: f64,
        at: DateTime<Local>,
    },
}
