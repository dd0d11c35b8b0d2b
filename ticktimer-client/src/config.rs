use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use ticktimer_shared::{Preset, default_presets};
use tracing::debug;

use crate::AppError;
use crate::alarm::AlarmPattern;

pub const ENV_CONFIG: &str = "TICKTIMER_CONFIG";

/// Frequency range accepted by the Windows `Beep` call.
const MIN_FREQUENCY_HZ: u32 = 37;
const MAX_FREQUENCY_HZ: u32 = 32_767;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Initial state of the alarm toggle
    #[serde(default = "default_true")]
    pub alarm_enabled: bool,
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub alarm: AlarmConfig,
    /// Show a desktop notification when a run completes
    #[serde(default = "default_true")]
    pub desktop_notification: bool,
    #[serde(default = "default_presets")]
    pub presets: Vec<Preset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmConfig {
    #[serde(default)]
    pub backend: ToneKind,
    #[serde(default = "default_frequency")]
    pub frequency_hz: u32,
    #[serde(default = "default_tone_ms")]
    pub tone_ms: u64,
    #[serde(default = "default_gap_ms")]
    pub gap_ms: u64,
    #[serde(default = "default_repeats")]
    pub repeats: u32,
}

/// Which tone primitive plays the alarm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ToneKind {
    /// Best available on this platform
    #[default]
    Auto,
    /// Terminal bell
    Bell,
    Silent,
}

fn default_true() -> bool {
    true
}

fn default_tick_interval() -> u64 {
    1000
}

fn default_frequency() -> u32 {
    1000
}

fn default_tone_ms() -> u64 {
    500
}

fn default_gap_ms() -> u64 {
    300
}

fn default_repeats() -> u32 {
    3
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            backend: ToneKind::Auto,
            frequency_hz: default_frequency(),
            tone_ms: default_tone_ms(),
            gap_ms: default_gap_ms(),
            repeats: default_repeats(),
        }
    }
}

impl AlarmConfig {
    pub fn pattern(&self) -> AlarmPattern {
        AlarmPattern {
            frequency_hz: self.frequency_hz,
            tone: Duration::from_millis(self.tone_ms),
            gap: Duration::from_millis(self.gap_ms),
            repeats: self.repeats,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            alarm_enabled: true,
            tick_interval_ms: default_tick_interval(),
            alarm: AlarmConfig::default(),
            desktop_notification: true,
            presets: default_presets(),
        }
    }
}

impl TimerConfig {
    /// Resolve the config path and load it. A missing file is only an
    /// error when the path was given explicitly.
    pub fn find_and_load(cli_value: Option<PathBuf>) -> Result<(PathBuf, Self), AppError> {
        let explicit = cli_value.is_some() || std::env::var_os(ENV_CONFIG).is_some();
        let path = resolve_config_path(cli_value)?;
        if !explicit && !path.exists() {
            debug!(path=?path, "no config file; using defaults");
            return Ok((path, Self::default()));
        }
        let cfg = load_config(&path)?;
        Ok((path, cfg))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.tick_interval_ms == 0 {
            return Err(AppError::Config("tick_interval_ms must be positive".into()));
        }
        if !(MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ).contains(&self.alarm.frequency_hz) {
            return Err(AppError::Config(format!(
                "alarm.frequency_hz must be within {MIN_FREQUENCY_HZ}..={MAX_FREQUENCY_HZ}"
            )));
        }
        for preset in &self.presets {
            preset.duration().map_err(|e| {
                AppError::Config(format!("preset {:?}: {e}", preset.label))
            })?;
        }
        Ok(())
    }
}

pub fn resolve_config_path(cli_value: Option<PathBuf>) -> Result<PathBuf, AppError> {
    if let Some(p) = cli_value {
        return Ok(p);
    }
    if let Ok(p) = std::env::var(ENV_CONFIG) {
        return Ok(PathBuf::from(p));
    }
    default_config_path().ok_or_else(|| AppError::Config("could not determine config dir".into()))
}

pub fn default_config_path() -> Option<PathBuf> {
    let pd = ProjectDirs::from("dev", "ticktimer", "ticktimer")?;
    Some(pd.config_dir().join("timer.yaml"))
}

pub fn load_config(path: &Path) -> Result<TimerConfig, AppError> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("read {} failed: {e}", path.display())))?;
    let cfg: TimerConfig = serde_yaml::from_str(&data)
        .map_err(|e| AppError::Config(format!("parse {} failed: {e}", path.display())))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn save_config(path: &Path, cfg: &TimerConfig) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::Config(format!("create {} failed: {e}", parent.display())))?;
    }
    let data = serde_yaml::to_string(cfg)
        .map_err(|e| AppError::Config(format!("serialize config failed: {e}")))?;
    std::fs::write(path, data)
        .map_err(|e| AppError::Config(format!("write {} failed: {e}", path.display())))
}

/// Writes the default config, refusing to clobber an existing file unless
/// `force` is set.
pub fn init_config(cli_value: Option<PathBuf>, force: bool) -> Result<PathBuf, AppError> {
    let path = resolve_config_path(cli_value)?;
    if path.exists() && !force {
        return Err(AppError::Config(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }
    save_config(&path, &TimerConfig::default())?;
    Ok(path)
}
