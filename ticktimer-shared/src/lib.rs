pub mod controller;
pub mod domain;
pub mod error;

pub use controller::{CountdownController, RunId, Snapshot, StartOutcome, TickResult};
pub use domain::{Preset, TimerDuration, TimerState, default_presets, find_preset, format_hms};
pub use error::TimerError;
