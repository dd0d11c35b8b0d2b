use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ToneKind;

const HELP_EPILOG: &str = r#"Config resolution order:
  1) --config/-c PATH
  2) $TICKTIMER_CONFIG
  3) XDG default: ~/.config/ticktimer/timer.yaml (defaults are used if missing)

Console commands while running:
  start | pause | reset | set H M S | set HH:MM:SS | preset NAME
  alarm on|off | status | presets | help | quit
"#;

#[derive(Debug, Parser)]
#[command(
    name = "ticktimer",
    version,
    about = "Countdown timer with an audible alarm",
    long_about = None,
    after_long_help = HELP_EPILOG,
)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Optional subcommand. Without one, runs the interactive timer.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive console timer
    Run(RunArgs),
    /// List the configured presets
    Presets,
    /// Play the alarm pattern once and exit
    Beep {
        /// Tone backend to use instead of the configured one
        #[arg(long, value_enum)]
        backend: Option<ToneKind>,
    },
    /// Write a config file with default values
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Default, Clone, Args)]
pub struct RunArgs {
    /// Initial hours (0-23)
    #[arg(long, conflicts_with = "preset")]
    pub hours: Option<u32>,
    /// Initial minutes (0-59)
    #[arg(long, conflicts_with = "preset")]
    pub minutes: Option<u32>,
    /// Initial seconds (0-59)
    #[arg(long, conflicts_with = "preset")]
    pub seconds: Option<u32>,
    /// Initial duration from a preset label, e.g. "5 min"
    #[arg(long)]
    pub preset: Option<String>,
    /// Start with the alarm sound turned off
    #[arg(long)]
    pub no_alarm: bool,
    /// Start counting down right away
    #[arg(long)]
    pub start: bool,
}

impl RunArgs {
    /// Explicit `--hours/--minutes/--seconds`, with missing fields as zero.
    pub fn initial_hms(&self) -> Option<(u32, u32, u32)> {
        if self.hours.is_none() && self.minutes.is_none() && self.seconds.is_none() {
            return None;
        }
        Some((
            self.hours.unwrap_or(0),
            self.minutes.unwrap_or(0),
            self.seconds.unwrap_or(0),
        ))
    }
}
