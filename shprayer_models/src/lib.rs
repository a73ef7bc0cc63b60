pub mod error;
pub mod prayer;
pub mod settings;
pub mod time;

pub use error::ScheduleError;
pub use prayer::{PrayerName, PrayerSchedule, RawPrayerTimes, default_sunrise};
pub use time::CanonicalTime;
