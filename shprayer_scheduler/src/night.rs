use std::num::NonZeroU32;

use chrono::{NaiveDate, TimeDelta};
use shprayer_models::{CanonicalTime, ScheduleError};

const THIRDS: NonZeroU32 = NonZeroU32::new(3).unwrap();

/// Start of the last third of the night between isha and the following fajr.
pub fn last_third_start(
    fajr: CanonicalTime,
    isha: CanonicalTime,
    on: NaiveDate,
) -> Result<CanonicalTime, ScheduleError> {
    night_point_before_fajr(fajr, isha, on, THIRDS)
}

/// The point `1 / divisor` of the night before fajr, truncated to the minute.
///
/// Both times are pinned to `on`. An isha later than fajr on that date belongs
/// to the previous evening and is moved back a day.
pub fn night_point_before_fajr(
    fajr: CanonicalTime,
    isha: CanonicalTime,
    on: NaiveDate,
    divisor: NonZeroU32,
) -> Result<CanonicalTime, ScheduleError> {
    let fajr_at = on.and_time(fajr.time());
    let mut isha_at = on.and_time(isha.time());
    if isha_at > fajr_at {
        isha_at = isha_at
            .checked_sub_signed(TimeDelta::days(1))
            .expect("Not realistic to overflow");
    }

    let night = fajr_at - isha_at;
    if night.is_zero() {
        return Err(ScheduleError::DegenerateInterval { fajr, isha });
    }

    let divisor = i32::try_from(divisor.get()).unwrap_or(i32::MAX);
    let point = fajr_at - night / divisor;

    Ok(CanonicalTime::from(point.time()))
}
