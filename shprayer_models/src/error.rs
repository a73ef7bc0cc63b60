use thiserror::Error;

use crate::time::CanonicalTime;

/// Failures of the schedule computations.
///
/// None of these are expected with well-formed provider data; callers treat
/// them as fatal except where a documented default exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Malformed time input {input:?}, expected HH:MM or HH:MM AM/PM")]
    MalformedTimeInput { input: String },

    #[error("Invalid remaining duration of {milliseconds}ms, target is not in the future")]
    InvalidDuration { milliseconds: i64 },

    #[error("Degenerate night interval, isha {isha} coincides with fajr {fajr}")]
    DegenerateInterval {
        fajr: CanonicalTime,
        isha: CanonicalTime,
    },
}
