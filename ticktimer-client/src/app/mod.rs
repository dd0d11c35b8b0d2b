pub mod console;
pub mod session;

use std::path::PathBuf;
use std::time::Duration;

use ticktimer_shared::{Preset, find_preset};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::config::TimerConfig;
use crate::{AppError, shutdown_signal};
use session::TimerSession;

/// Entry point for the interactive console timer.
pub async fn run(config_path: Option<PathBuf>, args: RunArgs) -> Result<(), AppError> {
    let (cfg_path, cfg) = TimerConfig::find_and_load(config_path)?;
    info!(path=?cfg_path, "loaded config");

    let (tx, rx) = mpsc::unbounded_channel();
    let session = TimerSession::from_config(&cfg, tx);
    let mut out = console::Renderer::new(std::io::stdout());
    for msg in apply_run_args(&session, &cfg.presets, &args).await {
        out.warning(&msg)?;
    }

    let cancel = tokio_util::sync::CancellationToken::new();
    let console_session = session.clone();
    let presets = cfg.presets.clone();
    let cancel_child = cancel.child_token();
    let input = console::spawn_stdin_reader();
    let mut handle = tokio::spawn(async move {
        console::run_console(console_session, rx, input, presets, cancel_child, &mut out).await
    });

    let result = tokio::select! {
        _ = shutdown_signal() => {
            info!("shutdown signal received; stopping console");
            cancel.cancel();
            None
        }
        res = &mut handle => Some(res),
    };

    let result = match result {
        Some(res) => res,
        None => match tokio::time::timeout(Duration::from_secs(3), handle).await {
            Ok(res) => res,
            Err(_) => {
                warn!("console did not stop in time");
                Ok(Ok(()))
            }
        },
    };
    session.shutdown().await;

    match result {
        Ok(inner) => inner,
        Err(e) => Err(AppError::Io(std::io::Error::other(e))),
    }
}

/// Applies `--hours/--minutes/--seconds`, `--preset`, `--no-alarm` and
/// `--start` before the console takes over.
///
/// Bad values are not fatal: each one is logged and returned as a warning
/// for the console, and the timer keeps whatever state it had.
pub async fn apply_run_args(
    session: &TimerSession,
    presets: &[Preset],
    args: &RunArgs,
) -> Vec<String> {
    let mut warnings = Vec::new();
    if args.no_alarm {
        session.set_alarm_enabled(false).await;
    }
    let duration = if let Some((h, m, s)) = args.initial_hms() {
        session.set_duration(h, m, s).await
    } else if let Some(name) = &args.preset {
        match find_preset(presets, name) {
            Some(preset) => session.apply_preset(preset).await,
            None => {
                warnings.push(format!("no preset named {name:?}"));
                Ok(())
            }
        }
    } else {
        Ok(())
    };
    if let Err(e) = duration {
        warnings.push(e.to_string());
    }
    if args.start
        && let Err(e) = session.start().await
    {
        warnings.push(e.to_string());
    }
    for msg in &warnings {
        warn!(warning = %msg, "ignoring startup option");
    }
    warnings
}
