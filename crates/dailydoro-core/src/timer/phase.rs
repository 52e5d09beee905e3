use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Human label used for the status line, history rows and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short break",
            Phase::LongBreak => "Long break",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Nominal duration of each phase plus the long-break cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub focus_secs: u64,
    pub short_break_secs: u64,
    pub long_break_secs: u64,
    /// A long break follows every N-th completed focus phase.
    pub cycles_before_long_break: u32,
}

impl PhaseDurations {
    /// Build durations from whole minutes, rejecting zero values.
    pub fn from_minutes(
        focus_min: u32,
        short_break_min: u32,
        long_break_min: u32,
        cycles_before_long_break: u32,
    ) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("focus_duration", focus_min),
            ("short_break", short_break_min),
            ("long_break", long_break_min),
            ("pomodoros_before_long_break", cycles_before_long_break),
        ] {
            if value == 0 {
                return Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    message: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(Self {
            focus_secs: u64::from(focus_min) * 60,
            short_break_secs: u64::from(short_break_min) * 60,
            long_break_secs: u64::from(long_break_min) * 60,
            cycles_before_long_break,
        })
    }

    /// Nominal countdown length for `phase`, in seconds.
    pub fn of(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Focus => self.focus_secs,
            Phase::ShortBreak => self.short_break_secs,
            Phase::LongBreak => self.long_break_secs,
        }
    }

    /// The break that follows a focus phase once `completed_cycles` focus
    /// phases have been completed.
    pub fn break_after(&self, completed_cycles: u32) -> Phase {
        let every = self.cycles_before_long_break.max(1);
        if completed_cycles != 0 && completed_cycles % every == 0 {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }
}

impl Default for PhaseDurations {
    /// 25 / 5 / 20 minutes, long break every 4th cycle.
    fn default() -> Self {
        Self {
            focus_secs: 25 * 60,
            short_break_secs: 5 * 60,
            long_break_secs: 20 * 60,
            cycles_before_long_break: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_durations() {
        let d = PhaseDurations::default();
        assert_eq!(d.of(Phase::Focus), 1500);
        assert_eq!(d.of(Phase::ShortBreak), 300);
        assert_eq!(d.of(Phase::LongBreak), 1200);
    }

    #[test]
    fn long_break_every_fourth_cycle() {
        let d = PhaseDurations::default();
        assert_eq!(d.break_after(1), Phase::ShortBreak);
        assert_eq!(d.break_after(2), Phase::ShortBreak);
        assert_eq!(d.break_after(3), Phase::ShortBreak);
        assert_eq!(d.break_after(4), Phase::LongBreak);
        assert_eq!(d.break_after(5), Phase::ShortBreak);
        assert_eq!(d.break_after(8), Phase::LongBreak);
    }

    #[test]
    fn zero_cycles_is_never_long() {
        assert_eq!(PhaseDurations::default().break_after(0), Phase::ShortBreak);
    }

    #[test]
    fn from_minutes_rejects_zero() {
        let err = PhaseDurations::from_minutes(25, 0, 20, 4).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field == "short_break"));
        assert!(PhaseDurations::from_minutes(25, 5, 20, 0).is_err());
    }

    #[test]
    fn from_minutes_converts_to_seconds() {
        let d = PhaseDurations::from_minutes(50, 10, 30, 3).unwrap();
        assert_eq!(d.focus_secs, 3000);
        assert_eq!(d.short_break_secs, 600);
        assert_eq!(d.long_break_secs, 1800);
        assert_eq!(d.break_after(3), Phase::LongBreak);
    }

    #[test]
    fn phase_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Phase::ShortBreak).unwrap(), "\"short_break\"");
        assert_eq!(Phase::LongBreak.to_string(), "Long break");
    }
}
