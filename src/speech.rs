use std::process::Stdio;

use anyhow::Context;
use async_trait::async_trait;
use shprayer_models::settings::SpeechSettings;
use shprayer_scheduler::{Announcement, AnnouncementChannel};
use tokio::{io::AsyncWriteExt, process::Command, task};

/// Speaks announcements through `festival --pipe`. Playback is not awaited.
pub struct SpeechChannel {
    command: String,
    voice: String,
}

impl SpeechChannel {
    pub fn new(settings: &SpeechSettings) -> Self {
        Self {
            command: settings.command.clone(),
            voice: settings.voice.clone(),
        }
    }
}

#[async_trait]
impl AnnouncementChannel for SpeechChannel {
    async fn announce(&self, announcement: &Announcement) -> anyhow::Result<()> {
        let script = festival_script(&self.voice, &announcement.message());

        let mut child = Command::new(&self.command)
            .arg("--pipe")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.command))?;

        let mut stdin = child.stdin.take().context("Speech process has no stdin")?;
        stdin.write_all(script.as_bytes()).await?;
        drop(stdin);

        let command = self.command.clone();
        task::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    log::warn!("{command} exited with {status}");
                }
                Err(error) => log::warn!("Failed to wait for {command}. [error = {error}]"),
                Ok(_) => {}
            }
        });

        Ok(())
    }
}

fn festival_script(voice: &str, text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("({voice})\n(SayText \"{escaped}\")\n")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use shprayer_models::{CanonicalTime, PrayerName};
    use shprayer_scheduler::RemainingDuration;

    use super::*;

    #[test]
    fn script_selects_voice_and_says_text() {
        let script = festival_script("voice_mb_us2", "isha prayer in 0h 5m");

        assert_eq!(
            script,
            "(voice_mb_us2)\n(SayText \"isha prayer in 0h 5m\")\n"
        );
    }

    #[test]
    fn script_escapes_quotes() {
        let script = festival_script("voice_kal_diphone", r#"say "hi" \ bye"#);

        assert_eq!(
            script,
            "(voice_kal_diphone)\n(SayText \"say \\\"hi\\\" \\\\ bye\")\n"
        );
    }

    #[tokio::test]
    async fn missing_speech_program_is_reported() {
        let channel = SpeechChannel::new(&SpeechSettings {
            enabled: true,
            command: "shprayer-test-no-such-program".to_string(),
            voice: "voice_mb_us2".to_string(),
        });
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let announcement = Announcement {
            prayer: PrayerName::Isha,
            time: CanonicalTime::from_hm(19, 30).unwrap(),
            remaining: RemainingDuration::between(
                day.and_hms_opt(19, 25, 0).unwrap(),
                day.and_hms_opt(19, 30, 0).unwrap(),
            )
            .unwrap(),
        };

        let result = channel.announce(&announcement).await;

        assert!(result.is_err());
    }
}
