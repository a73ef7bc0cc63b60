use async_trait::async_trait;
use shprayer_models::{CanonicalTime, PrayerName};

use crate::RemainingDuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Announcement {
    pub prayer: PrayerName,
    pub time: CanonicalTime,
    pub remaining: RemainingDuration,
}

impl Announcement {
    pub fn message(&self) -> String {
        format!("{} prayer in {}", self.prayer, self.remaining)
    }
}

/// Receives every announcement the cycle produces. Errors are logged by the
/// cycle and otherwise ignored.
#[async_trait]
pub trait AnnouncementChannel: Send + Sync + 'static {
    async fn announce(&self, announcement: &Announcement) -> anyhow::Result<()>;
}
