use std::fmt;

use serde::Deserialize;

use crate::{error::ScheduleError, time::CanonicalTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrayerName {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    Sunrise,
}

impl PrayerName {
    /// Display order of a schedule. Not chronological: sunrise comes last.
    pub const DISPLAY_ORDER: [PrayerName; 6] = [
        PrayerName::Fajr,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
        PrayerName::Sunrise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "fajr",
            PrayerName::Dhuhr => "dhuhr",
            PrayerName::Asr => "asr",
            PrayerName::Maghrib => "maghrib",
            PrayerName::Isha => "isha",
            PrayerName::Sunrise => "sunrise",
        }
    }
}

impl fmt::Display for PrayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Prayer times as the provider reports them, before normalization.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPrayerTimes {
    pub fajr: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
    #[serde(default)]
    pub shurooq: Option<String>,
}

/// Today's prayer times. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerSchedule {
    fajr: CanonicalTime,
    dhuhr: CanonicalTime,
    asr: CanonicalTime,
    maghrib: CanonicalTime,
    isha: CanonicalTime,
    sunrise: CanonicalTime,
}

pub fn default_sunrise() -> CanonicalTime {
    CanonicalTime::from_hm(5, 44).expect("This is always in bounds.")
}

impl PrayerSchedule {
    pub fn new(
        fajr: CanonicalTime,
        dhuhr: CanonicalTime,
        asr: CanonicalTime,
        maghrib: CanonicalTime,
        isha: CanonicalTime,
        sunrise: CanonicalTime,
    ) -> Self {
        Self {
            fajr,
            dhuhr,
            asr,
            maghrib,
            isha,
            sunrise,
        }
    }

    /// Normalizes provider data. The five prayers are mandatory, a missing or
    /// unreadable sunrise falls back to [`default_sunrise`].
    pub fn from_raw(raw: &RawPrayerTimes) -> Result<Self, ScheduleError> {
        Ok(Self {
            fajr: CanonicalTime::parse(&raw.fajr)?,
            dhuhr: CanonicalTime::parse(&raw.dhuhr)?,
            asr: CanonicalTime::parse(&raw.asr)?,
            maghrib: CanonicalTime::parse(&raw.maghrib)?,
            isha: CanonicalTime::parse(&raw.isha)?,
            sunrise: CanonicalTime::parse_or_default(raw.shurooq.as_deref(), default_sunrise()),
        })
    }

    pub fn get(&self, name: PrayerName) -> CanonicalTime {
        match name {
            PrayerName::Fajr => self.fajr,
            PrayerName::Dhuhr => self.dhuhr,
            PrayerName::Asr => self.asr,
            PrayerName::Maghrib => self.maghrib,
            PrayerName::Isha => self.isha,
            PrayerName::Sunrise => self.sunrise,
        }
    }

    pub fn fajr(&self) -> CanonicalTime {
        self.fajr
    }

    pub fn isha(&self) -> CanonicalTime {
        self.isha
    }

    /// Entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = (PrayerName, CanonicalTime)> + '_ {
        PrayerName::DISPLAY_ORDER
            .into_iter()
            .map(|name| (name, self.get(name)))
    }
}
