//! Countdown state machine.
//!
//! ```text
//!            start()                 tick() reaches 0
//!  Idle ──────────────► Running ─────────────────────► Completed
//!   ▲                    │   ▲                             │
//!   │          pause()   │   │ start()                     │
//!   │                    ▼   │                             │
//!   │                   Paused                             │
//!   │                                                      │
//!   └──────────────── reset() from any state ──────────────┘
//! ```
//!
//! The controller is synchronous and owns no timers. Whoever drives it
//! calls [`CountdownController::tick_run`] roughly once per second and acts
//! on the returned [`TickResult`].

use crate::domain::{TimerDuration, TimerState, format_hms};
use crate::{Preset, TimerError};

/// Identifies one run, issued by every successful [`start`](CountdownController::start).
pub type RunId = u64;

const ZERO_DURATION: &str = "please enter a valid time greater than 0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { run: RunId },
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// One second elapsed; the run continues.
    Ticked { remaining: u64 },
    /// The run just reached zero. Returned once per run; `alarm` is the
    /// alarm flag as read at that moment.
    Completed { alarm: bool },
    /// Not running, or the tick belongs to a superseded run.
    Ignored,
}

/// Everything a front end needs to draw the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub display: String,
    pub status: &'static str,
    pub state: TimerState,
    pub remaining_secs: u64,
    pub duration: TimerDuration,
    pub alarm_enabled: bool,
    pub can_start: bool,
    pub can_pause: bool,
}

#[derive(Debug)]
pub struct CountdownController {
    duration: TimerDuration,
    remaining: u64,
    state: TimerState,
    alarm_enabled: bool,
    /// Seconds shown on the readout. Follows the last edit or tick.
    display_secs: u64,
    run: RunId,
}

impl Default for CountdownController {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownController {
    pub fn new() -> Self {
        Self {
            duration: TimerDuration::ZERO,
            remaining: 0,
            state: TimerState::Idle,
            alarm_enabled: true,
            display_secs: 0,
            run: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn duration(&self) -> TimerDuration {
        self.duration
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining
    }

    pub fn alarm_enabled(&self) -> bool {
        self.alarm_enabled
    }

    /// Run id of the most recent successful start.
    pub fn current_run(&self) -> RunId {
        self.run
    }

    /// Stores a new duration without touching the state. Edits made while
    /// running only affect the next start.
    pub fn set_duration(
        &mut self,
        hours: u32,
        minutes: u32,
        seconds: u32,
    ) -> Result<TimerDuration, TimerError> {
        let duration = TimerDuration::from_hms(hours, minutes, seconds)?;
        self.store_duration(duration);
        Ok(duration)
    }

    pub fn set_duration_text(
        &mut self,
        hours: &str,
        minutes: &str,
        seconds: &str,
    ) -> Result<TimerDuration, TimerError> {
        let duration = TimerDuration::from_fields(hours, minutes, seconds)?;
        self.store_duration(duration);
        Ok(duration)
    }

    pub fn apply_preset(&mut self, preset: &Preset) -> Result<TimerDuration, TimerError> {
        self.set_duration(preset.hours, preset.minutes, preset.seconds)
    }

    fn store_duration(&mut self, duration: TimerDuration) {
        self.duration = duration;
        if self.state != TimerState::Running {
            self.display_secs = duration.as_secs();
        }
    }

    /// Starts a run from the full stored duration.
    ///
    /// A paused run is not resumed: remaining time is always reloaded from
    /// the duration.
    pub fn start(&mut self) -> Result<StartOutcome, TimerError> {
        if self.state == TimerState::Running {
            return Ok(StartOutcome::AlreadyRunning);
        }
        if self.duration.is_zero() {
            return Err(TimerError::invalid(ZERO_DURATION));
        }
        self.remaining = self.duration.as_secs();
        self.display_secs = self.remaining;
        self.state = TimerState::Running;
        self.run = self.run.wrapping_add(1);
        Ok(StartOutcome::Started { run: self.run })
    }

    pub fn tick(&mut self) -> TickResult {
        if self.state != TimerState::Running {
            return TickResult::Ignored;
        }
        self.remaining = self.remaining.saturating_sub(1);
        self.display_secs = self.remaining;
        if self.remaining == 0 {
            self.state = TimerState::Completed;
            return TickResult::Completed {
                alarm: self.alarm_enabled,
            };
        }
        TickResult::Ticked {
            remaining: self.remaining,
        }
    }

    /// [`tick`](Self::tick) for the given run only; ticks from an earlier
    /// run are dropped.
    pub fn tick_run(&mut self, run: RunId) -> TickResult {
        if run != self.run {
            return TickResult::Ignored;
        }
        self.tick()
    }

    /// Returns whether the timer was running.
    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.state = TimerState::Paused;
        true
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining = 0;
        self.duration = TimerDuration::ZERO;
        self.display_secs = 0;
    }

    pub fn set_alarm_enabled(&mut self, enabled: bool) {
        self.alarm_enabled = enabled;
    }

    pub fn snapshot(&self) -> Snapshot {
        let running = self.state == TimerState::Running;
        Snapshot {
            display: format_hms(self.display_secs),
            status: self.state.status_text(),
            state: self.state,
            remaining_secs: self.remaining,
            duration: self.duration,
            alarm_enabled: self.alarm_enabled,
            can_start: !running,
            can_pause: running,
        }
    }
}
