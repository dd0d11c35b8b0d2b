//! Alarm tones.
//!
//! A [`ToneBackend`] plays one tone and blocks for its length. The alarm
//! pattern (three tones with short gaps by default) is driven on a blocking
//! worker so it never holds up the tick task or user commands.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmPattern {
    pub frequency_hz: u32,
    pub tone: Duration,
    pub gap: Duration,
    pub repeats: u32,
}

impl Default for AlarmPattern {
    fn default() -> Self {
        Self {
            frequency_hz: 1000,
            tone: Duration::from_millis(500),
            gap: Duration::from_millis(300),
            repeats: 3,
        }
    }
}

/// Platform "play tone" capability.
pub trait ToneBackend: Send + Sync {
    fn name(&self) -> &'static str;
    /// Plays a tone, returning once it has finished.
    fn play_tone(&self, frequency_hz: u32, duration: Duration) -> Result<(), AppError>;
}

/// Rings the terminal bell and waits out the tone length. The bell has no
/// pitch, so the frequency is ignored.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl ToneBackend for TerminalBell {
    fn name(&self) -> &'static str {
        "bell"
    }

    fn play_tone(&self, _frequency_hz: u32, duration: Duration) -> Result<(), AppError> {
        let mut out = std::io::stdout().lock();
        out.write_all(b"\x07")?;
        out.flush()?;
        drop(out);
        std::thread::sleep(duration);
        Ok(())
    }
}

/// For targets without any audio; the visual readout still shows completion.
#[derive(Debug, Default)]
pub struct Silent;

impl ToneBackend for Silent {
    fn name(&self) -> &'static str {
        "silent"
    }

    fn play_tone(&self, frequency_hz: u32, duration: Duration) -> Result<(), AppError> {
        debug!(frequency_hz, ?duration, "silent tone");
        Ok(())
    }
}

#[cfg(feature = "rodio")]
#[derive(Debug, Default)]
pub struct RodioTone;

#[cfg(feature = "rodio")]
impl ToneBackend for RodioTone {
    fn name(&self) -> &'static str {
        "rodio"
    }

    fn play_tone(&self, frequency_hz: u32, duration: Duration) -> Result<(), AppError> {
        use rodio::source::SineWave;
        use rodio::{OutputStream, Sink, Source};

        let (_stream, handle) =
            OutputStream::try_default().map_err(|e| AppError::Audio(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| AppError::Audio(e.to_string()))?;
        sink.append(
            SineWave::new(frequency_hz as f32)
                .take_duration(duration)
                .amplify(0.20),
        );
        sink.sleep_until_end();
        Ok(())
    }
}

/// Plays the whole pattern on the calling thread.
pub fn play_pattern(backend: &dyn ToneBackend, pattern: &AlarmPattern) -> Result<(), AppError> {
    for i in 0..pattern.repeats {
        backend.play_tone(pattern.frequency_hz, pattern.tone)?;
        if i + 1 < pattern.repeats {
            std::thread::sleep(pattern.gap);
        }
    }
    Ok(())
}

/// Fire-and-forget alarm on the blocking pool. Failures are logged only.
pub fn sound_alarm(
    backend: Arc<dyn ToneBackend>,
    pattern: AlarmPattern,
) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        debug!(backend = backend.name(), ?pattern, "alarm: playing");
        if let Err(e) = play_pattern(backend.as_ref(), &pattern) {
            warn!(error=%e, backend = backend.name(), "alarm: tone playback failed");
        }
    })
}
