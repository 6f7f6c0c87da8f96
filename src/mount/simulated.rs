//! Simulated mount that models motion time with a sleep

use super::Mount;
use async_trait::async_trait;
use scope_shared::{defaults, Command};
use std::time::Duration;
use tracing::debug;

/// How long each simulated action takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDurations {
    /// gohome, goflatscreen and pointing
    pub motion: Duration,
    /// tracking mode changes
    pub tracking: Duration,
}

impl ActionDurations {
    /// Simulated duration of `command`'s action
    pub fn for_command(&self, command: Command) -> Duration {
        match command {
            Command::GoHome | Command::GoFlatscreen | Command::Pointing => self.motion,
            Command::Tracking => self.tracking,
            Command::Status | Command::Invalid => Duration::ZERO,
        }
    }
}

impl Default for ActionDurations {
    fn default() -> Self {
        Self {
            motion: Duration::from_secs(defaults::MOTION_SECS),
            tracking: Duration::from_secs(defaults::TRACKING_SECS),
        }
    }
}

/// Mount stand-in that sleeps for the configured duration
#[derive(Debug, Clone)]
pub struct SimulatedMount {
    durations: ActionDurations,
}

impl SimulatedMount {
    pub fn new(durations: ActionDurations) -> Self {
        Self { durations }
    }
}

#[async_trait]
impl Mount for SimulatedMount {
    async fn perform(&self, command: Command) {
        let duration = self.durations.for_command(command);
        debug!("[MOUNT] Simulating {} for {:?}", command, duration);
        tokio::time::sleep(duration).await;
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
