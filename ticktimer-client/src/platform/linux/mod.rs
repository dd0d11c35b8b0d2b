pub mod notify;

use std::sync::Arc;

use ticktimer_shared::TimerDuration;
use tokio::sync::Mutex;

use super::Platform;
use crate::alarm::ToneBackend;

/// Implementation for Linux and other freedesktop-style systems.
pub struct LinuxPlatform {
    notifier: Arc<Mutex<notify::Notifier>>, // single notifier instance
}

impl LinuxPlatform {
    pub fn new() -> Self {
        Self {
            notifier: Arc::new(Mutex::new(notify::Notifier::new())),
        }
    }
}

impl Default for LinuxPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Platform for LinuxPlatform {
    fn native_tone(&self) -> Arc<dyn ToneBackend> {
        #[cfg(feature = "rodio")]
        {
            Arc::new(crate::alarm::RodioTone)
        }
        #[cfg(not(feature = "rodio"))]
        {
            Arc::new(crate::alarm::TerminalBell)
        }
    }

    async fn notify_completed(&self, duration: TimerDuration) {
        self.notifier.lock().await.show_completed(duration).await;
    }

    async fn hide_notification(&self) {
        self.notifier.lock().await.close().await;
    }
}
