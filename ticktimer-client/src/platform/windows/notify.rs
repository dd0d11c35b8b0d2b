use ticktimer_shared::TimerDuration;
use tracing::{debug, info};

/// Completion notices on Windows are written to the log only.
#[derive(Debug, Default)]
pub struct Notifier;

impl Notifier {
    pub fn new() -> Self {
        Self
    }

    pub async fn show_completed(&mut self, duration: TimerDuration) {
        info!("[TIMER] {duration} countdown finished (Windows)");
    }

    pub async fn close(&mut self) {
        debug!("[TIMER NOTIFICATION CLOSED] (Windows)");
    }
}
