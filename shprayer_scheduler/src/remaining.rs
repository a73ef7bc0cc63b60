use std::fmt;

use chrono::NaiveDateTime;
use shprayer_models::ScheduleError;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Whole minutes left until an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RemainingDuration {
    minutes: i64,
}

impl RemainingDuration {
    /// Floors the gap between `now` and `target` to whole minutes. The target
    /// must be strictly after `now`.
    pub fn between(now: NaiveDateTime, target: NaiveDateTime) -> Result<Self, ScheduleError> {
        let milliseconds = (target - now).num_milliseconds();
        if milliseconds <= 0 {
            return Err(ScheduleError::InvalidDuration { milliseconds });
        }

        Ok(Self {
            minutes: milliseconds / MILLIS_PER_MINUTE,
        })
    }

    pub fn minutes(&self) -> i64 {
        self.minutes
    }
}

impl fmt::Display for RemainingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.minutes / 60, self.minutes % 60)
    }
}
