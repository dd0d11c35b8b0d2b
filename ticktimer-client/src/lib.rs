use tracing::info;

pub mod alarm;
pub mod app;
pub mod cli;
pub mod config;
pub mod platform;

pub use cli::{Cli, Command, RunArgs};
pub use config::{TimerConfig, load_config, resolve_config_path};
use ticktimer_shared::TimerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Timer(#[from] TimerError),
    #[error("audio error: {0}")]
    Audio(String),
}

fn init_tracing() {
    // Logs go to stderr; stdout carries the readout.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    init_tracing();

    match cli.command {
        None => app::run(cli.config, RunArgs::default()).await,
        Some(Command::Run(args)) => app::run(cli.config, args).await,
        Some(Command::Presets) => {
            let (_, cfg) = TimerConfig::find_and_load(cli.config)?;
            for p in &cfg.presets {
                println!("{:<10} {}", p.label, p.duration()?);
            }
            Ok(())
        }
        Some(Command::Beep { backend }) => {
            let (_, cfg) = TimerConfig::find_and_load(cli.config)?;
            let plat = platform::detect();
            let tone = platform::tone_backend(plat.as_ref(), backend.unwrap_or(cfg.alarm.backend));
            let pattern = cfg.alarm.pattern();
            info!(backend = tone.name(), ?pattern, "playing alarm pattern");
            tokio::task::spawn_blocking(move || alarm::play_pattern(tone.as_ref(), &pattern))
                .await
                .map_err(|e| AppError::Audio(e.to_string()))?
        }
        Some(Command::InitConfig { force }) => {
            let path = config::init_config(cli.config, force)?;
            info!(path=?path, "wrote default config");
            println!("{}", path.display());
            Ok(())
        }
    }
}

pub(crate) async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let (Ok(mut sigint), Ok(mut sigterm)) = (
            signal(SignalKind::interrupt()),
            signal(SignalKind::terminate()),
        ) else {
            tracing::warn!("shutdown: could not install signal handlers");
            std::future::pending::<()>().await;
            return;
        };
        tokio::select! {
            _ = sigint.recv() => {
                info!("shutdown: received SIGINT");
            }
            _ = sigterm.recv() => {
                info!("shutdown: received SIGTERM");
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown: received Ctrl+C");
    }
}
