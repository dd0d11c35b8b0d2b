use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TimerError;

pub const MAX_HOURS: u32 = 23;
pub const MAX_MINUTES: u32 = 59;
pub const MAX_SECONDS: u32 = 59;

const NOT_A_NUMBER: &str = "please enter valid numbers";

/// Requested countdown length in whole seconds.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerDuration(u64);

impl TimerDuration {
    pub const ZERO: TimerDuration = TimerDuration(0);

    pub fn from_secs(secs: u64) -> Self {
        TimerDuration(secs)
    }

    /// Build a duration from the three input fields, rejecting components
    /// outside of what the readout can show.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Result<Self, TimerError> {
        if hours > MAX_HOURS {
            return Err(TimerError::invalid(format!(
                "hours must be between 0 and {MAX_HOURS}, got {hours}"
            )));
        }
        if minutes > MAX_MINUTES {
            return Err(TimerError::invalid(format!(
                "minutes must be between 0 and {MAX_MINUTES}, got {minutes}"
            )));
        }
        if seconds > MAX_SECONDS {
            return Err(TimerError::invalid(format!(
                "seconds must be between 0 and {MAX_SECONDS}, got {seconds}"
            )));
        }
        Ok(TimerDuration(
            u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds),
        ))
    }

    /// Same as [`from_hms`](Self::from_hms) for raw text fields. Blank fields
    /// count as zero.
    pub fn from_fields(hours: &str, minutes: &str, seconds: &str) -> Result<Self, TimerError> {
        Self::from_hms(
            parse_field(hours)?,
            parse_field(minutes)?,
            parse_field(seconds)?,
        )
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn hours(&self) -> u64 {
        self.0 / 3600
    }

    pub fn minutes(&self) -> u64 {
        (self.0 % 3600) / 60
    }

    pub fn seconds(&self) -> u64 {
        self.0 % 60
    }
}

impl fmt::Display for TimerDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hms(self.0))
    }
}

/// Parses `SS`, `MM:SS` or `HH:MM:SS`.
impl FromStr for TimerDuration {
    type Err = TimerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            [sec] => Self::from_fields("0", "0", sec),
            [min, sec] => Self::from_fields("0", min, sec),
            [hr, min, sec] => Self::from_fields(hr, min, sec),
            _ => Err(TimerError::invalid(format!(
                "expected HH:MM:SS, MM:SS or SS, got {s:?}"
            ))),
        }
    }
}

fn parse_field(raw: &str) -> Result<u32, TimerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| TimerError::invalid(NOT_A_NUMBER))
}

/// Format seconds as fixed-width `HH:MM:SS`; hours grow past two digits.
pub fn format_hms(total_secs: u64) -> String {
    let mut out = String::with_capacity(8);
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let _ = write!(out, "{hours:02}:{minutes:02}:{seconds:02}");
    out
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

impl TimerState {
    /// Status line shown under the readout.
    pub fn status_text(&self) -> &'static str {
        match self {
            TimerState::Idle => "Ready",
            TimerState::Running => "Timer running...",
            TimerState::Paused => "Timer paused",
            TimerState::Completed => "Timer completed!",
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_text())
    }
}

/// Named duration shortcut; applying one never starts the timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub label: String,
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
}

impl Preset {
    pub fn new(label: impl Into<String>, hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            label: label.into(),
            hours,
            minutes,
            seconds,
        }
    }

    pub fn duration(&self) -> Result<TimerDuration, TimerError> {
        TimerDuration::from_hms(self.hours, self.minutes, self.seconds)
    }

    fn matches(&self, name: &str) -> bool {
        squash(&self.label) == squash(name)
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new("1 min", 0, 1, 0),
        Preset::new("5 min", 0, 5, 0),
        Preset::new("10 min", 0, 10, 0),
        Preset::new("15 min", 0, 15, 0),
        Preset::new("30 min", 0, 30, 0),
    ]
}

/// Looks a preset up by label, ignoring case and whitespace, so `5min`
/// finds `5 min`.
pub fn find_preset<'a>(presets: &'a [Preset], name: &str) -> Option<&'a Preset> {
    presets.iter().find(|p| p.matches(name))
}
