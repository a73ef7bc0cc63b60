mod appsettings;
mod console;
mod provider;
mod speech;
mod terminal;

use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use colored::Colorize;
use shprayer_models::PrayerSchedule;
use shprayer_scheduler::{AnnouncementChannel, AnnouncementCycle, LocalClock, last_third_start};
use tokio::io::BufReader;

use console::ConsoleChannel;
use provider::HttpScheduleProvider;
use speech::SpeechChannel;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "shprayer=info".to_string());
    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&log_filter)
        .init();

    let settings = appsettings::load().context("Failed to load settings")?;
    log::debug!("Loaded settings {:?}", settings);

    console::line("🔃 Starting SHPrayer CLI".yellow());

    let provider = HttpScheduleProvider::new(settings.provider.clone())?;
    let location = provider.locate(&settings.location).await;
    console::line(format!("📍 Location: {location}"));

    let raw_times = match provider.fetch_prayer_times(&location).await {
        Ok(raw_times) => raw_times,
        Err(error) => {
            console::line("Failed to fetch prayer times".red());
            log::error!("Failed to fetch prayer times for {location}. [error = {error}]");
            std::process::exit(1);
        }
    };
    let schedule = Arc::new(
        PrayerSchedule::from_raw(&raw_times).context("Provider returned unusable prayer times")?,
    );

    println!("{}", console::schedule_table(&schedule));

    let last_third = last_third_start(schedule.fajr(), schedule.isha(), Local::now().date_naive())?;
    console::line(format!("🌙 Last third of the night starts at {last_third}"));
    console::line(format!("\n🔧 Version: {}", env!("CARGO_PKG_VERSION")));

    let console_channel: Arc<dyn AnnouncementChannel> = Arc::new(ConsoleChannel);
    let mut channels = vec![console_channel];
    if settings.speech.enabled {
        channels.push(Arc::new(SpeechChannel::new(&settings.speech)));
    }

    let mut cycle = AnnouncementCycle::start(
        schedule,
        settings.announcement.interval(),
        Arc::new(LocalClock),
        channels,
    );

    let outcome = tokio::select! {
        result = cycle.finished() => result.context("Announcement cycle failed"),
        result = terminal::wait_for_exit(BufReader::new(tokio::io::stdin())) => {
            result.context("Failed to read terminal input")
        }
        result = tokio::signal::ctrl_c() => result.context("Failed to listen for Ctrl-C"),
    };

    let stopped = cycle.stop().await;
    console::line("🛑 Exiting Prayer CLI".red());

    // The blocking stdin read cannot be cancelled, so exit without waiting
    // for the runtime to shut down.
    if let Err(error) = outcome.and(stopped) {
        log::error!("{error:#}");
        std::process::exit(1);
    }
    std::process::exit(0)
}
