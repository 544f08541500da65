use crate::utils::APP_NAME;
use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Route tracing output to a log file; the terminal belongs to the UI.
///
/// Logging is optional: when the file or the filter cannot be set up the
/// app keeps running without it. Returns the log file path on success.
pub fn init(level: &str) -> Option<PathBuf> {
    match try_init(level) {
        Ok(path) => Some(path),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {:#}", e);
            None
        }
    }
}

fn try_init(level: &str) -> Result<PathBuf> {
    let mut dir = dirs::data_local_dir().context("Could not find data directory")?;
    dir.push(APP_NAME);
    let (file, path) = open_log_file(&dir)?;

    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("Invalid log_level '{}'", level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(path)
}

/// Open `<dir>/pomodial.log` for appending, creating `dir` if needed
fn open_log_file(dir: &Path) -> Result<(File, PathBuf)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join(format!("{}.log", APP_NAME));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    Ok((file, path))
}
