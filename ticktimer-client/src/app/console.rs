//! Line-oriented terminal front end.
//!
//! Reads commands from a line channel fed by stdin and draws the readout on
//! stdout. Tick updates rewrite the current line in place; everything else
//! is printed on its own line.

use std::io::{BufRead, Write};
use std::str::FromStr;

use ticktimer_shared::{Preset, Snapshot, TimerDuration, find_preset};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::session::{TimerEvent, TimerSession};
use crate::AppError;

const HELP: &str = "commands: start | pause | reset | set H M S | set HH:MM:SS | \
preset NAME | alarm on|off | status | presets | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Start,
    Pause,
    Reset,
    /// Raw hour/minute/second fields, validated by the controller.
    Set {
        hours: String,
        minutes: String,
        seconds: String,
    },
    Preset(String),
    Alarm(bool),
    Status,
    Presets,
    Help,
    Quit,
}

impl FromStr for UserCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err("empty command".into());
        };
        let rest: Vec<&str> = words.collect();
        let cmd = match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("start" | "s", []) => UserCommand::Start,
            ("pause" | "p", []) => UserCommand::Pause,
            ("reset" | "r", []) => UserCommand::Reset,
            ("set", [h, m, s]) => UserCommand::Set {
                hours: h.to_string(),
                minutes: m.to_string(),
                seconds: s.to_string(),
            },
            ("set", [hms]) => {
                let d = TimerDuration::from_str(hms).map_err(|e| e.to_string())?;
                UserCommand::Set {
                    hours: d.hours().to_string(),
                    minutes: d.minutes().to_string(),
                    seconds: d.seconds().to_string(),
                }
            }
            ("preset", name) if !name.is_empty() => UserCommand::Preset(name.join(" ")),
            ("alarm", [flag]) => match flag.to_ascii_lowercase().as_str() {
                "on" | "true" | "1" => UserCommand::Alarm(true),
                "off" | "false" | "0" => UserCommand::Alarm(false),
                other => return Err(format!("alarm expects on|off, got {other:?}")),
            },
            ("status", []) => UserCommand::Status,
            ("presets", []) => UserCommand::Presets,
            ("help" | "?", []) => UserCommand::Help,
            ("quit" | "q" | "exit", []) => UserCommand::Quit,
            _ => return Err(format!("unrecognized command {:?}; try 'help'", line.trim())),
        };
        Ok(cmd)
    }
}

/// Draws snapshots and messages onto a writer.
pub struct Renderer<W: Write> {
    out: W,
    /// A tick line is on screen without a trailing newline.
    inline: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, inline: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn snapshot(&mut self, snap: &Snapshot) -> std::io::Result<()> {
        let alarm = if snap.alarm_enabled { "on" } else { "off" };
        write!(
            self.out,
            "\r{}  {:<17} [alarm {alarm}]",
            snap.display, snap.status
        )?;
        self.inline = true;
        self.out.flush()
    }

    pub fn line(&mut self, msg: &str) -> std::io::Result<()> {
        self.finish()?;
        writeln!(self.out, "{msg}")?;
        self.out.flush()
    }

    /// Ends a pending tick line.
    pub fn finish(&mut self) -> std::io::Result<()> {
        if self.inline {
            writeln!(self.out)?;
            self.inline = false;
        }
        self.out.flush()
    }

    pub fn warning(&mut self, msg: &str) -> std::io::Result<()> {
        self.line(&format!("Warning: {msg}"))
    }

    pub fn event(&mut self, event: &TimerEvent) -> std::io::Result<()> {
        match event {
            TimerEvent::Updated(snap) => self.snapshot(snap),
            TimerEvent::Completed { alarm: true } => self.line("Time is up!"),
            TimerEvent::Completed { alarm: false } => self.line("Time is up! (alarm muted)"),
        }
    }

    pub fn presets(&mut self, presets: &[Preset]) -> std::io::Result<()> {
        for p in presets {
            let d = p
                .duration()
                .map(|d| d.to_string())
                .unwrap_or_else(|e| e.to_string());
            self.line(&format!("  {:<10} {d}", p.label))?;
        }
        Ok(())
    }
}

/// Applies one command. `Ok(false)` asks the caller to stop.
pub async fn dispatch<W: Write>(
    session: &TimerSession,
    presets: &[Preset],
    cmd: UserCommand,
    out: &mut Renderer<W>,
) -> std::io::Result<bool> {
    debug!(?cmd, "console command");
    let result = match cmd {
        UserCommand::Start => session.start().await,
        UserCommand::Pause => {
            session.pause().await;
            Ok(())
        }
        UserCommand::Reset => {
            session.reset().await;
            Ok(())
        }
        UserCommand::Set {
            hours,
            minutes,
            seconds,
        } => session.set_duration_text(&hours, &minutes, &seconds).await,
        UserCommand::Preset(name) => match find_preset(presets, &name) {
            Some(p) => session.apply_preset(p).await,
            None => {
                out.warning(&format!("no preset named {name:?}"))?;
                Ok(())
            }
        },
        UserCommand::Alarm(on) => {
            session.set_alarm_enabled(on).await;
            Ok(())
        }
        UserCommand::Status => {
            let snap = session.snapshot().await;
            out.snapshot(&snap)?;
            Ok(())
        }
        UserCommand::Presets => {
            out.presets(presets)?;
            Ok(())
        }
        UserCommand::Help => {
            out.line(HELP)?;
            Ok(())
        }
        UserCommand::Quit => return Ok(false),
    };
    if let Err(e) = result {
        out.warning(&e.to_string())?;
    }
    Ok(true)
}

/// Forwards stdin lines from a plain OS thread so a pending read never
/// holds up runtime shutdown. The thread is not joined.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    let spawned = std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        warn!(error=%e, "console: stdin read failed");
                        break;
                    }
                };
                if tx.blocking_send(line).is_err() {
                    break;
                }
            }
            debug!("console: stdin reader exiting");
        });
    if let Err(e) = spawned {
        warn!(error=%e, "console: could not spawn stdin reader; input disabled");
    }
    rx
}

/// Runs until `quit`, end of input, or cancellation.
pub async fn run_console<W: Write>(
    session: TimerSession,
    mut events: mpsc::UnboundedReceiver<TimerEvent>,
    mut input: mpsc::Receiver<String>,
    presets: Vec<Preset>,
    cancel: CancellationToken,
    out: &mut Renderer<W>,
) -> Result<(), AppError> {
    out.line(HELP)?;
    out.snapshot(&session.snapshot().await)?;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            ev = events.recv() => {
                let Some(ev) = ev else { break };
                out.event(&ev)?;
            }
            line = input.recv() => {
                let Some(line) = line else {
                    debug!("console: stdin closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<UserCommand>() {
                    Ok(cmd) => {
                        if !dispatch(&session, &presets, cmd, out).await? {
                            break;
                        }
                    }
                    Err(msg) => out.warning(&msg)?,
                }
            }
        }
    }
    out.finish()?;
    Ok(())
}
