use std::fmt::{Display, Write};

use async_trait::async_trait;
use chrono::Local;
use colored::Colorize;
use shprayer_models::PrayerSchedule;
use shprayer_scheduler::{Announcement, AnnouncementChannel};

/// Prints a line prefixed with the local time.
pub fn line(message: impl Display) {
    println!("{}", timestamped(message));
}

fn timestamped(message: impl Display) -> String {
    let timestamp = format!("[{}]", Local::now().format("%Y-%m-%d %H:%M:%S"));
    format!("{} {}", timestamp.bright_black(), message)
}

pub fn schedule_table(schedule: &PrayerSchedule) -> String {
    let mut table = format!("{}", "📅 Prayer Times for Today:".bold());
    for (name, time) in schedule.entries() {
        let _ = write!(table, "\n  {name:<7}: {time}");
    }
    table
}

pub fn announcement_line(announcement: &Announcement) -> String {
    format!(
        "🕒 {} prayer in {}",
        announcement.prayer.as_str().to_uppercase().cyan(),
        announcement.remaining
    )
}

pub struct ConsoleChannel;

#[async_trait]
impl AnnouncementChannel for ConsoleChannel {
    async fn announce(&self, announcement: &Announcement) -> anyhow::Result<()> {
        line(announcement_line(announcement));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use shprayer_models::{CanonicalTime, PrayerName};
    use shprayer_scheduler::RemainingDuration;

    use super::*;

    fn hm(hour: u32, minute: u32) -> CanonicalTime {
        CanonicalTime::from_hm(hour, minute).unwrap()
    }

    #[test]
    fn schedule_table_lists_prayers_in_display_order() {
        colored::control::set_override(false);
        let schedule =
            PrayerSchedule::new(hm(4, 9), hm(12, 53), hm(16, 30), hm(19, 52), hm(21, 22), hm(5, 54));

        let table = schedule_table(&schedule);

        assert_eq!(
            table,
            "📅 Prayer Times for Today:\n  fajr   : 04:09\n  dhuhr  : 12:53\n  asr    : 16:30\n  maghrib: 19:52\n  isha   : 21:22\n  sunrise: 05:54"
        );
    }

    #[test]
    fn announcement_line_shows_upper_case_name_and_remaining_time() {
        colored::control::set_override(false);
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let remaining = RemainingDuration::between(
            day.and_hms_opt(11, 0, 0).unwrap(),
            day.and_hms_opt(12, 53, 0).unwrap(),
        )
        .unwrap();
        let announcement = Announcement {
            prayer: PrayerName::Dhuhr,
            time: hm(12, 53),
            remaining,
        };

        assert_eq!(announcement_line(&announcement), "🕒 DHUHR prayer in 1h 53m");
    }

    #[test]
    fn timestamp_prefixes_the_message() {
        colored::control::set_override(false);

        let output = timestamped("hello");

        assert!(output.starts_with('['));
        assert!(output.ends_with("] hello"));
        assert_eq!(output.len(), "[2025-06-01 12:00:00] hello".len());
    }
}
