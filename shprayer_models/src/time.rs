use std::{fmt, str::FromStr, sync::LazyLock};

use chrono::{NaiveTime, Timelike};
use regex::Regex;

use crate::error::ScheduleError;

// H:MM or HH:MM, optional :SS, optional AM/PM marker after at most one space.
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))?(?: ?([AaPp][Mm]))?$")
        .expect("Pattern is valid.")
});

/// A daily recurring hour and minute, without date or timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalTime(NaiveTime);

impl CanonicalTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Normalizes a provider time string.
    ///
    /// Accepts 24-hour `H:MM`/`HH:MM` and 12-hour `H:MM am`/`HH:MM PM`
    /// (marker is case-insensitive, the space before it is optional). A
    /// trailing `:SS` is validated and dropped. Surrounding whitespace is
    /// ignored. Parsing never consults the system locale.
    pub fn parse(input: &str) -> Result<Self, ScheduleError> {
        let malformed = || ScheduleError::MalformedTimeInput {
            input: input.to_string(),
        };

        let captures = TIME_PATTERN.captures(input.trim()).ok_or_else(malformed)?;
        let hour: u32 = captures[1].parse().map_err(|_| malformed())?;
        let minute: u32 = captures[2].parse().map_err(|_| malformed())?;

        if let Some(second) = captures.get(3) {
            let second: u32 = second.as_str().parse().map_err(|_| malformed())?;
            if second > 59 {
                return Err(malformed());
            }
        }

        let hour = match captures.get(4) {
            Some(marker) => to_24_hour(hour, marker.as_str()).ok_or_else(malformed)?,
            None => hour,
        };

        Self::from_hm(hour, minute).ok_or_else(malformed)
    }

    /// Parses an optional field, falling back to `default` when the value is
    /// absent, blank or malformed.
    pub fn parse_or_default(input: Option<&str>, default: CanonicalTime) -> Self {
        match input.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => default,
            Some(raw) => Self::parse(raw).unwrap_or_else(|err| {
                log::warn!("{err}. Falling back to {default}");
                default
            }),
        }
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl From<NaiveTime> for CanonicalTime {
    fn from(inner: NaiveTime) -> Self {
        let normalized_time = inner
            .with_second(0)
            .and_then(|time| time.with_nanosecond(0))
            .expect("Will never fail.");
        Self(normalized_time)
    }
}

impl FromStr for CanonicalTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CanonicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

fn to_24_hour(hour: u32, marker: &str) -> Option<u32> {
    if !(1..=12).contains(&hour) {
        return None;
    }

    let is_pm = marker.eq_ignore_ascii_case("pm");
    match (hour, is_pm) {
        (12, false) => Some(0),
        (12, true) => Some(12),
        (hour, false) => Some(hour),
        (hour, true) => Some(hour + 12),
    }
}
