use chrono::{NaiveDateTime, TimeDelta};
use shprayer_models::{CanonicalTime, PrayerName, PrayerSchedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingPrayer {
    pub name: PrayerName,
    pub time: CanonicalTime,
    /// The concrete occurrence, today or tomorrow.
    pub at: NaiveDateTime,
}

/// Pins a daily time to its next occurrence after `now`.
///
/// Only hour and minute of `now` take part in the comparison, so a time equal
/// to the current minute is considered passed and resolves to tomorrow.
pub fn resolve_occurrence(time: CanonicalTime, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date();
    let target_date = if is_later_today(time, now) {
        today
    } else {
        today
            .checked_add_signed(TimeDelta::days(1))
            .expect("Not realistic to overflow")
    };

    target_date.and_time(time.time())
}

/// Picks the earliest prayer still ahead today. Ties go to the prayer listed
/// first. When everything has passed, the first listed prayer is taken for
/// tomorrow.
pub fn next_prayer(schedule: &PrayerSchedule, now: NaiveDateTime) -> UpcomingPrayer {
    let (name, time) = schedule
        .entries()
        .filter(|(_, time)| is_later_today(*time, now))
        .min_by_key(|(_, time)| *time)
        .unwrap_or_else(|| {
            let first = PrayerName::DISPLAY_ORDER[0];
            (first, schedule.get(first))
        });

    UpcomingPrayer {
        name,
        time,
        at: resolve_occurrence(time, now),
    }
}

fn is_later_today(time: CanonicalTime, now: NaiveDateTime) -> bool {
    time > CanonicalTime::from(now.time())
}
