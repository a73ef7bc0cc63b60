use std::{sync::Arc, time::Duration};

use shprayer_models::{PrayerSchedule, ScheduleError};
use tokio::{
    task::{self, JoinHandle},
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{
    Clock, RemainingDuration,
    delivery::{Announcement, AnnouncementChannel},
    next_prayer::next_prayer,
};

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Running,
    Stopped,
}

enum CycleHandle {
    Running {
        task: JoinHandle<Result<(), ScheduleError>>,
        cancellation_token: CancellationToken,
    },
    Stopped,
}

struct CycleContext {
    schedule: Arc<PrayerSchedule>,
    period: Duration,
    clock: Arc<dyn Clock>,
    channels: Vec<Arc<dyn AnnouncementChannel>>,
}

/// Periodically announces the next prayer until stopped.
pub struct AnnouncementCycle {
    handle: CycleHandle,
}

impl AnnouncementCycle {
    /// Enters the running state. The first announcement goes out right away,
    /// the following ones every `period`.
    pub fn start(
        schedule: Arc<PrayerSchedule>,
        period: Duration,
        clock: Arc<dyn Clock>,
        channels: Vec<Arc<dyn AnnouncementChannel>>,
    ) -> Self {
        let cancellation_token = CancellationToken::new();
        let task_cancellation_token = cancellation_token.child_token();
        let context = CycleContext {
            schedule,
            period,
            clock,
            channels,
        };

        log::info!("Starting announcement cycle. [period = {:?}]", period);
        let task = task::spawn(async move { run_cycle(context, task_cancellation_token).await });

        Self {
            handle: CycleHandle::Running {
                task,
                cancellation_token,
            },
        }
    }

    pub fn state(&self) -> CycleState {
        match self.handle {
            CycleHandle::Running { .. } => CycleState::Running,
            CycleHandle::Stopped => CycleState::Stopped,
        }
    }

    /// Resolves when the cycle ends by itself, which only happens on a
    /// schedule computation failure. Resolves immediately once stopped.
    pub async fn finished(&mut self) -> anyhow::Result<()> {
        let result = match &mut self.handle {
            CycleHandle::Running { task, .. } => task.await,
            CycleHandle::Stopped => return Ok(()),
        };

        self.handle = CycleHandle::Stopped;
        result??;
        Ok(())
    }

    /// Cancels the pending tick and waits for the cycle task. The cycle does
    /// not resume afterwards; stopping twice is a no-op.
    pub async fn stop(&mut self) -> anyhow::Result<()> {
        match std::mem::replace(&mut self.handle, CycleHandle::Stopped) {
            CycleHandle::Running {
                task,
                cancellation_token,
            } => {
                cancellation_token.cancel();
                task.await??;
                log::info!("Announcement cycle stopped");
                Ok(())
            }
            CycleHandle::Stopped => Ok(()),
        }
    }
}

impl Drop for AnnouncementCycle {
    fn drop(&mut self) {
        if let CycleHandle::Running {
            cancellation_token, ..
        } = &self.handle
        {
            cancellation_token.cancel();
        }
    }
}

async fn run_cycle(
    context: CycleContext,
    cancellation_token: CancellationToken,
) -> Result<(), ScheduleError> {
    let mut ticks = time::interval(context.period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancellation_token.cancelled() => {
                log::debug!("Announcement cycle was cancelled.");
                return Ok(());
            }
            _ = ticks.tick() => {
                announce_next_prayer(&context).await?;
            }
        }
    }
}

async fn announce_next_prayer(context: &CycleContext) -> Result<(), ScheduleError> {
    let now = context.clock.now();
    let upcoming = next_prayer(&context.schedule, now);
    let remaining = RemainingDuration::between(now, upcoming.at)?;

    let announcement = Announcement {
        prayer: upcoming.name,
        time: upcoming.time,
        remaining,
    };

    log::debug!("Announcing {:?}", announcement);
    for channel in &context.channels {
        if let Err(error) = channel.announce(&announcement).await {
            log::warn!(
                "Announcement channel failed. [prayer = {}, error = {:#}]",
                announcement.prayer,
                error
            );
        }
    }

    Ok(())
}
