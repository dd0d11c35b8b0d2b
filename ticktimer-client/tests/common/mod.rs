#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ticktimer_client::AppError;
use ticktimer_client::alarm::{AlarmPattern, Silent, ToneBackend};
use ticktimer_client::app::session::{SessionSettings, TimerEvent, TimerSession};
use ticktimer_client::platform::Platform;
use ticktimer_shared::{Snapshot, TimerDuration};
use tokio::sync::mpsc;

/// Records every tone instead of playing it.
pub struct RecordingTone {
    tx: mpsc::UnboundedSender<u32>,
}

impl ToneBackend for RecordingTone {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn play_tone(&self, frequency_hz: u32, _duration: Duration) -> Result<(), AppError> {
        let _ = self.tx.send(frequency_hz);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakePlatform {
    pub completed: Mutex<Vec<TimerDuration>>,
    pub hidden: AtomicUsize,
}

impl FakePlatform {
    pub fn completed(&self) -> Vec<TimerDuration> {
        self.completed.lock().unwrap().clone()
    }

    pub fn hidden(&self) -> usize {
        self.hidden.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Platform for FakePlatform {
    fn native_tone(&self) -> Arc<dyn ToneBackend> {
        Arc::new(Silent)
    }

    async fn notify_completed(&self, duration: TimerDuration) {
        self.completed.lock().unwrap().push(duration);
    }

    async fn hide_notification(&self) {
        self.hidden.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Harness {
    pub session: TimerSession,
    pub events: mpsc::UnboundedReceiver<TimerEvent>,
    pub tones: mpsc::UnboundedReceiver<u32>,
    pub platform: Arc<FakePlatform>,
}

impl Harness {
    pub fn new(alarm_enabled: bool) -> Self {
        Self::with_interval(alarm_enabled, Duration::from_secs(1))
    }

    pub fn with_interval(alarm_enabled: bool, tick_interval: Duration) -> Self {
        let (tone_tx, tones) = mpsc::unbounded_channel();
        let (tx, events) = mpsc::unbounded_channel();
        let platform = Arc::new(FakePlatform::default());
        let settings = SessionSettings {
            tick_interval,
            alarm: AlarmPattern {
                tone: Duration::ZERO,
                gap: Duration::ZERO,
                ..AlarmPattern::default()
            },
            desktop_notification: true,
            alarm_enabled,
        };
        let session = TimerSession::new(
            platform.clone(),
            Arc::new(RecordingTone { tx: tone_tx }),
            settings,
            tx,
        );
        Self {
            session,
            events,
            tones,
            platform,
        }
    }

    pub async fn next_event(&mut self) -> TimerEvent {
        self.events.recv().await.expect("event channel closed")
    }

    pub async fn next_update(&mut self) -> Snapshot {
        match self.next_event().await {
            TimerEvent::Updated(snap) => snap,
            other => panic!("expected snapshot update, got {other:?}"),
        }
    }

    /// Everything queued so far, without waiting.
    pub fn drain(&mut self) -> Vec<TimerEvent> {
        let mut out = Vec::new();
        while let Ok(ev) = self.events.try_recv() {
            out.push(ev);
        }
        out
    }

    pub fn assert_quiet(&mut self) {
        if let Ok(ev) = self.events.try_recv() {
            panic!("unexpected event {ev:?}");
        }
    }
}
