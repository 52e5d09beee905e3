mod engine;
mod phase;

pub use engine::{format_clock, TimerEngine, TimerState, Transition};
pub use phase::{Phase, PhaseDurations};
