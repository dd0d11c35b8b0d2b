#[cfg(not(target_os = "windows"))]
pub mod linux;
#[cfg(target_os = "windows")]
pub mod windows;

use std::sync::Arc;

use async_trait::async_trait;
use ticktimer_shared::TimerDuration;

use crate::alarm::{Silent, TerminalBell, ToneBackend};
use crate::config::ToneKind;

/// Cross-platform interface for the OS-level side effects of the timer.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Best tone primitive this platform offers.
    fn native_tone(&self) -> Arc<dyn ToneBackend>;
    async fn notify_completed(&self, duration: TimerDuration);
    async fn hide_notification(&self);
}

/// Pick the tone backend for the configured kind.
pub fn tone_backend(platform: &dyn Platform, kind: ToneKind) -> Arc<dyn ToneBackend> {
    match kind {
        ToneKind::Auto => platform.native_tone(),
        ToneKind::Bell => Arc::new(TerminalBell),
        ToneKind::Silent => Arc::new(Silent),
    }
}

/// Detect the current platform and return an implementation.
pub fn detect() -> Arc<dyn Platform> {
    #[cfg(target_os = "windows")]
    {
        Arc::new(windows::WindowsPlatform::new())
    }
    #[cfg(not(target_os = "windows"))]
    {
        Arc::new(linux::LinuxPlatform::new())
    }
}
