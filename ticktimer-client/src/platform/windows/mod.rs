use std::sync::Arc;

use ticktimer_shared::TimerDuration;
use tokio::sync::Mutex;

use super::Platform;
use crate::alarm::ToneBackend;

pub mod notify;
pub mod tone;

/// Windows implementation of the cross-platform interface.
pub struct WindowsPlatform {
    notifier: Arc<Mutex<notify::Notifier>>,
}

impl WindowsPlatform {
    pub fn new() -> Self {
        Self {
            notifier: Arc::new(Mutex::new(notify::Notifier::new())),
        }
    }
}

impl Default for WindowsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Platform for WindowsPlatform {
    fn native_tone(&self) -> Arc<dyn ToneBackend> {
        Arc::new(tone::WinBeep)
    }

    async fn notify_completed(&self, duration: TimerDuration) {
        self.notifier.lock().await.show_completed(duration).await;
    }

    async fn hide_notification(&self) {
        self.notifier.lock().await.close().await;
    }
}
