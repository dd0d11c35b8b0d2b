use std::sync::Arc;
use std::time::Duration;

use ticktimer_shared::{
    CountdownController, Preset, RunId, Snapshot, StartOutcome, TickResult, TimerError,
};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::alarm::{self, AlarmPattern, ToneBackend};
use crate::config::TimerConfig;
use crate::platform::{self, Platform};

/// Updates pushed to the presentation layer, in the order the controller
/// changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    Updated(Snapshot),
    Completed { alarm: bool },
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub tick_interval: Duration,
    pub alarm: AlarmPattern,
    pub desktop_notification: bool,
    pub alarm_enabled: bool,
}

impl SessionSettings {
    pub fn from_config(cfg: &TimerConfig) -> Self {
        Self {
            tick_interval: cfg.tick_interval(),
            alarm: cfg.alarm.pattern(),
            desktop_notification: cfg.desktop_notification,
            alarm_enabled: cfg.alarm_enabled,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            alarm: AlarmPattern::default(),
            desktop_notification: true,
            alarm_enabled: true,
        }
    }
}

struct Ticker {
    run: RunId,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns the single countdown and its background tick task.
///
/// User commands lock the controller briefly and return; ticking happens
/// on a spawned task that reports through the event channel. Events are sent
/// while the controller lock is held, so a tick can never be reported after
/// the pause or reset that followed it.
#[derive(Clone)]
pub struct TimerSession {
    controller: Arc<Mutex<CountdownController>>,
    ticker: Arc<Mutex<Option<Ticker>>>,
    events: mpsc::UnboundedSender<TimerEvent>,
    platform: Arc<dyn Platform>,
    tone: Arc<dyn ToneBackend>,
    settings: SessionSettings,
}

impl TimerSession {
    pub fn new(
        platform: Arc<dyn Platform>,
        tone: Arc<dyn ToneBackend>,
        settings: SessionSettings,
        events: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        let mut controller = CountdownController::new();
        controller.set_alarm_enabled(settings.alarm_enabled);
        Self {
            controller: Arc::new(Mutex::new(controller)),
            ticker: Arc::new(Mutex::new(None)),
            events,
            platform,
            tone,
            settings,
        }
    }

    /// Session wired to the detected platform per the config.
    pub fn from_config(cfg: &TimerConfig, events: mpsc::UnboundedSender<TimerEvent>) -> Self {
        let plat = platform::detect();
        let tone = platform::tone_backend(plat.as_ref(), cfg.alarm.backend);
        info!(tone = tone.name(), "alarm backend selected");
        Self::new(plat, tone, SessionSettings::from_config(cfg), events)
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.controller.lock().await.snapshot()
    }

    pub async fn set_duration(
        &self,
        hours: u32,
        minutes: u32,
        seconds: u32,
    ) -> Result<(), TimerError> {
        let mut c = self.controller.lock().await;
        let d = c.set_duration(hours, minutes, seconds)?;
        debug!(duration=%d, "duration set");
        self.emit(TimerEvent::Updated(c.snapshot()));
        Ok(())
    }

    pub async fn set_duration_text(
        &self,
        hours: &str,
        minutes: &str,
        seconds: &str,
    ) -> Result<(), TimerError> {
        let mut c = self.controller.lock().await;
        let d = c.set_duration_text(hours, minutes, seconds)?;
        debug!(duration=%d, "duration set");
        self.emit(TimerEvent::Updated(c.snapshot()));
        Ok(())
    }

    pub async fn apply_preset(&self, preset: &Preset) -> Result<(), TimerError> {
        let mut c = self.controller.lock().await;
        let d = c.apply_preset(preset)?;
        debug!(preset = %preset.label, duration=%d, "preset applied");
        self.emit(TimerEvent::Updated(c.snapshot()));
        Ok(())
    }

    pub async fn set_alarm_enabled(&self, enabled: bool) {
        let mut c = self.controller.lock().await;
        c.set_alarm_enabled(enabled);
        info!(enabled, "alarm toggled");
        self.emit(TimerEvent::Updated(c.snapshot()));
    }

    /// Starts a run. Zero duration is reported as `InvalidInput` and leaves
    /// the timer untouched; starting while running does nothing.
    pub async fn start(&self) -> Result<(), TimerError> {
        let run = {
            let mut c = self.controller.lock().await;
            let run = match c.start()? {
                StartOutcome::Started { run } => run,
                StartOutcome::AlreadyRunning => {
                    debug!("start ignored; already running");
                    return Ok(());
                }
            };
            info!(run, remaining = c.remaining_secs(), "timer started");
            self.emit(TimerEvent::Updated(c.snapshot()));
            run
        };
        self.platform.hide_notification().await;
        self.spawn_ticker(run).await;
        Ok(())
    }

    pub async fn pause(&self) {
        {
            let mut c = self.controller.lock().await;
            if !c.pause() {
                debug!("pause ignored; not running");
                return;
            }
            info!(remaining = c.remaining_secs(), "timer paused");
            self.emit(TimerEvent::Updated(c.snapshot()));
        }
        self.stop_ticker().await;
    }

    pub async fn reset(&self) {
        {
            let mut c = self.controller.lock().await;
            c.reset();
            info!("timer reset");
            self.emit(TimerEvent::Updated(c.snapshot()));
        }
        self.stop_ticker().await;
        self.platform.hide_notification().await;
    }

    /// Stops the tick task and waits briefly for it to exit.
    pub async fn shutdown(&self) {
        let ticker = self.ticker.lock().await.take();
        if let Some(t) = ticker {
            t.cancel.cancel();
            let _ = tokio::time::timeout(Duration::from_secs(3), t.handle).await;
        }
    }

    async fn stop_ticker(&self) {
        // Not joined: the task may be waiting on the controller lock, and the
        // run id check discards any tick it still delivers.
        if let Some(t) = self.ticker.lock().await.take() {
            debug!(run = t.run, "stopping tick task");
            t.cancel.cancel();
        }
    }

    async fn spawn_ticker(&self, run: RunId) {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let session = self.clone();
        let handle = tokio::spawn(async move {
            session.tick_loop(run, task_cancel).await;
        });
        let previous = self.ticker.lock().await.replace(Ticker {
            run,
            cancel,
            handle,
        });
        if let Some(old) = previous {
            old.cancel.cancel();
        }
    }

    async fn tick_loop(&self, run: RunId, cancel: CancellationToken) {
        let interval = self.settings.tick_interval;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(run, "tick task: cancelled");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }

            let result = {
                let mut c = self.controller.lock().await;
                let result = c.tick_run(run);
                if result != TickResult::Ignored {
                    self.emit(TimerEvent::Updated(c.snapshot()));
                }
                if let TickResult::Completed { alarm: sound } = result {
                    self.emit(TimerEvent::Completed { alarm: sound });
                }
                (result, c.duration())
            };
            match result {
                (TickResult::Ticked { remaining }, _) => {
                    debug!(run, remaining, "tick");
                }
                (TickResult::Completed { alarm: sound }, duration) => {
                    info!(run, alarm = sound, "timer completed");
                    if sound {
                        alarm::sound_alarm(self.tone.clone(), self.settings.alarm);
                    }
                    if self.settings.desktop_notification {
                        self.platform.notify_completed(duration).await;
                    }
                    break;
                }
                (TickResult::Ignored, _) => {
                    debug!(run, "tick task: run superseded; exiting");
                    break;
                }
            }
        }
    }

    fn emit(&self, event: TimerEvent) {
        if let Err(e) = self.events.send(event) {
            warn!(error=%e, "timer event dropped; no listener");
        }
    }
}
