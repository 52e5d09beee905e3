//! Timer engine implementation.
//!
//! The timer engine is a second-granular state machine. It does not use
//! internal threads or timers - the caller owns the 1 Hz tick source and
//! calls `tick()` once per second while the engine is running.
//!
//! ## Phase cycle
//!
//! ```text
//! Focus -> ShortBreak -> Focus -> ... -> Focus (4th) -> LongBreak -> Focus
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(PhaseDurations::default());
//! engine.start(Local::now());
//! // Once per second:
//! if let Some(transition) = engine.tick(Local::now()) {
//!     // persist transition.entry, deliver transition.notification
//! }
//! ```

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::phase::{Phase, PhaseDurations};
use crate::events::Event;
use crate::history::SessionEntry;
use crate::notify::NotificationRequest;

/// Observable timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_secs: u64,
    pub completed_focus_cycles: u32,
    pub is_running: bool,
}

/// Output of a phase transition, consumed by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State after the transition.
    pub state: TimerState,
    /// Record of the phase that just completed.
    pub entry: SessionEntry,
    /// Notification announcing the new phase.
    pub notification: NotificationRequest,
}

impl Transition {
    pub fn to_event(&self) -> Event {
        Event::PhaseCompleted {
            completed: self.entry.phase,
            next: self.state.phase,
            completed_cycles: self.state.completed_focus_cycles,
            remaining_secs: self.state.remaining_secs,
            at: self.entry.end,
        }
    }
}

/// Core timer engine. Performs no I/O.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    durations: PhaseDurations,
    state: TimerState,
    /// Wall-clock time the current phase was started.
    phase_started_at: Option<DateTime<Local>>,
    /// Free-text activity label attached to logged sessions.
    activity: Option<String>,
}

impl TimerEngine {
    /// Create an engine idle at the start of a focus phase.
    pub fn new(durations: PhaseDurations) -> Self {
        Self {
            durations,
            state: TimerState {
                phase: Phase::Focus,
                remaining_secs: durations.of(Phase::Focus),
                completed_focus_cycles: 0,
                is_running: false,
            },
            phase_started_at: None,
            activity: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.state.remaining_secs
    }

    pub fn completed_cycles(&self) -> u32 {
        self.state.completed_focus_cycles
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn phase_started_at(&self) -> Option<DateTime<Local>> {
        self.phase_started_at
    }

    /// Nominal duration of the current phase.
    pub fn nominal_secs(&self) -> u64 {
        self.durations.of(self.state.phase)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        let total = self.nominal_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.state.remaining_secs as f64 / total as f64)
    }

    pub fn activity(&self) -> Option<&str> {
        self.activity.as_deref()
    }

    /// Set the activity label. Blank input clears it.
    pub fn set_activity(&mut self, label: impl Into<String>) {
        let label = label.into();
        let trimmed = label.trim();
        self.activity = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: DateTime<Local>) -> Event {
        Event::StateSnapshot {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            nominal_secs: self.nominal_secs(),
            completed_cycles: self.state.completed_focus_cycles,
            is_running: self.state.is_running,
            progress: self.progress(),
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self, now: DateTime<Local>) -> Option<Event> {
        if self.state.is_running {
            return None;
        }
        self.state.is_running = true;
        self.phase_started_at = Some(now);
        Some(Event::TimerStarted {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            at: now,
        })
    }

    pub fn pause(&mut self, now: DateTime<Local>) -> Option<Event> {
        if !self.state.is_running {
            return None;
        }
        self.state.is_running = false;
        Some(Event::TimerPaused {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_secs,
            at: now,
        })
    }

    /// Back to an idle focus phase. Completed cycles are kept.
    pub fn reset(&mut self, now: DateTime<Local>) -> Event {
        self.state.is_running = false;
        self.state.phase = Phase::Focus;
        self.state.remaining_secs = self.durations.of(Phase::Focus);
        self.phase_started_at = None;
        Event::TimerReset { at: now }
    }

    /// Advance one second. Returns the transition when the phase ends.
    pub fn tick(&mut self, now: DateTime<Local>) -> Option<Transition> {
        if !self.state.is_running {
            return None;
        }
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs > 0 {
            return None;
        }
        Some(self.transition(now))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn transition(&mut self, now: DateTime<Local>) -> Transition {
        let completed = self.state.phase;
        let started = self.phase_started_at.unwrap_or(now);

        let next = match completed {
            Phase::Focus => {
                self.state.completed_focus_cycles =
                    self.state.completed_focus_cycles.saturating_add(1);
                self.durations.break_after(self.state.completed_focus_cycles)
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Focus,
        };

        self.state.phase = next;
        self.state.remaining_secs = self.durations.of(next);
        self.phase_started_at = Some(now);

        tracing::debug!(
            completed = %completed,
            next = %next,
            cycles = self.state.completed_focus_cycles,
            "phase transition"
        );

        Transition {
            state: self.state,
            entry: SessionEntry::new(started, now, completed, self.activity.clone()),
            notification: NotificationRequest::for_next(next),
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(PhaseDurations::default())
    }
}

/// Render seconds as `MM:SS`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
