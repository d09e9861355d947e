use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const APP_NAME: &str = "rebase-plan";

static INIT: OnceLock<()> = OnceLock::new();
static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Route tracing events to the log file. stdout carries the plan and stderr
/// the diagnostic, so nothing is ever logged to either.
pub fn init() -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    init_inner()?;
    let _ = INIT.set(());
    Ok(())
}

fn init_inner() -> Result<()> {
    let log_path = determine_log_path()?;
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory at {}", parent.display()))?;
    }

    let (directory, file_name) = split_path(&log_path)?;
    let file_appender = rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}

fn determine_log_path() -> Result<PathBuf> {
    let state_home = std::env::var("XDG_STATE_HOME").ok();
    if let Some(path) = log_path_for(state_home.as_deref(), home::home_dir()) {
        return Ok(path);
    }

    // Fallback to current directory if home cannot be determined
    Ok(std::env::current_dir()?.join(format!("{APP_NAME}.log")))
}

/// `$XDG_STATE_HOME/rebase-plan/rebase-plan.log`, else the XDG default under home.
fn log_path_for(state_home: Option<&str>, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    let file_name = format!("{APP_NAME}.log");

    if let Some(state_home) = state_home
        && !state_home.is_empty()
    {
        return Some(PathBuf::from(state_home).join(APP_NAME).join(file_name));
    }

    home_dir.map(|home| {
        home.join(".local")
            .join("state")
            .join(APP_NAME)
            .join(file_name)
    })
}

fn split_path(path: &Path) -> Result<(PathBuf, &str)> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid log file name"))?;

    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok((dir, file_name))
}
