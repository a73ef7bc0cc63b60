use std::time::Duration;

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AnnouncementSettings {
    pub interval_minutes: u64,
}

impl Default for AnnouncementSettings {
    fn default() -> Self {
        Self {
            interval_minutes: 10,
        }
    }
}

impl AnnouncementSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.max(1) * 60)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SpeechSettings {
    pub enabled: bool,
    pub command: String,
    pub voice: String,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "festival".to_string(),
            voice: "voice_mb_us2".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ProviderSettings {
    pub location_url: String,
    pub times_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            location_url: "http://ip-api.com/json".to_string(),
            times_url: "https://muslimsalat.com".to_string(),
            api_key: "API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Fixed location. When both fields are set the IP lookup is skipped.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LocationSettings {
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub announcement: AnnouncementSettings,
    pub speech: SpeechSettings,
    pub provider: ProviderSettings,
    pub location: LocationSettings,
}
