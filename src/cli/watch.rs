//! Watch command implementation

use crate::cli::{load_config_with_overrides, WatchArgs};
use crate::config::{OverlapPolicy, PanelConfig};
use crate::dashboard::{render_dashboard, DashboardController, ViewState};
use colored::Colorize;
use std::io::{BufRead, Write};
use tokio::sync::mpsc;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Keyboard commands read from stdin, one per line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchCommand {
    Refresh,
    Quit,
}

/// Parse one stdin line. An empty line means refresh.
pub fn parse_command(line: &str) -> Option<WatchCommand> {
    match line.trim().to_lowercase().as_str() {
        "" | "r" | "refresh" => Some(WatchCommand::Refresh),
        "q" | "quit" | "exit" => Some(WatchCommand::Quit),
        _ => None,
    }
}

/// Merge watch-specific flags into the loaded configuration
pub fn apply_watch_overrides(mut config: PanelConfig, args: &WatchArgs) -> PanelConfig {
    if let Some(interval) = args.interval {
        config.poll.interval_ms = interval;
    }
    if args.skip_overlap {
        config.poll.overlap = OverlapPolicy::Skip;
    }
    config
}

fn draw(state: &ViewState) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}{}", CLEAR_SCREEN, render_dashboard(state))?;
    writeln!(stdout)?;
    writeln!(stdout)?;
    writeln!(
        stdout,
        "{}",
        "Enter or 'r' to refresh, 'q' to quit".dimmed()
    )?;
    stdout.flush()
}

/// Read stdin lines on a dedicated thread.
///
/// A blocking thread rather than `tokio::io::stdin`, so a pending read never
/// holds up runtime shutdown. The channel closes on EOF.
fn spawn_command_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
    });
    rx
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}

/// Main watch command handler
///
/// Redraws the dashboard on every state change until the user quits or a
/// shutdown signal arrives. The periodic timer is stopped on the way out.
pub async fn run_watch(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = apply_watch_overrides(load_config_with_overrides(&args.connection)?, &args);
    config.validate()?;
    crate::logging::init_tracing(&config.logging)?;

    tracing::info!(
        base_url = %config.api.base_url,
        interval_ms = config.poll.interval_ms,
        "Starting control panel"
    );

    let controller = DashboardController::from_config(&config)?;
    let mut updates = controller.subscribe();
    draw(&controller.snapshot())?;
    controller.start();

    let mut commands = spawn_command_reader();
    let mut stdin_open = true;
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                draw(&state)?;
            }
            line = commands.recv(), if stdin_open => match line {
                Some(line) => match parse_command(&line) {
                    Some(WatchCommand::Refresh) => {
                        controller.request_refresh();
                    }
                    Some(WatchCommand::Quit) => break,
                    None => tracing::debug!(input = %line, "Unknown command"),
                },
                None => {
                    tracing::debug!("Stdin closed, keyboard commands disabled");
                    stdin_open = false;
                }
            },
        }
    }

    controller.stop();
    Ok(())
}
