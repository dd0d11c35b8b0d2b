use std::time::Duration;

use windows_sys::Win32::System::Diagnostics::Debug::Beep;

use crate::AppError;
use crate::alarm::ToneBackend;

/// Kernel32 `Beep`; synchronous for the length of the tone.
#[derive(Debug, Default)]
pub struct WinBeep;

impl ToneBackend for WinBeep {
    fn name(&self) -> &'static str {
        "beep"
    }

    fn play_tone(&self, frequency_hz: u32, duration: Duration) -> Result<(), AppError> {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        // SAFETY: Beep takes plain integers and has no pointer arguments.
        let ok = unsafe { Beep(frequency_hz, millis) };
        if ok == 0 {
            return Err(AppError::Audio(format!(
                "Beep({frequency_hz}, {millis}) failed: {}",
                std::io::Error::last_os_error()
            )));
        }
        Ok(())
    }
}
