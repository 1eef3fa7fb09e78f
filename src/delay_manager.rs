use std::thread;
use std::time::Duration;
use log::info;

use crate::config::RunConfig;

/// Fixed pauses between requests.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    profile_delay: Duration,
    page_delay: Duration,
}

impl Pacing {
    pub fn new(profile_delay: Duration, page_delay: Duration) -> Self {
        Pacing { profile_delay, page_delay }
    }

    pub fn from_config(run: &RunConfig) -> Self {
        Pacing::new(run.profile_delay, run.page_delay)
    }

    pub fn none() -> Self {
        Pacing::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn profile_delay(&self) {
        pause(self.profile_delay, "Profile Delay");
    }

    pub fn page_delay(&self) {
        pause(self.page_delay, "Page Delay");
    }
}

fn pause(delay: Duration, label: &str) {
    if delay.is_zero() {
        return;
    }
    info!("Waiting for {:.1} seconds ({})...", delay.as_secs_f32(), label);
    thread::sleep(delay);
}
