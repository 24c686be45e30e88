//! File logging with one live log per run.
//!
//! Each run writes `latest.log`. At the next start it is renamed to
//! `gymdesk-<stamp>.log`, stamped with its last write time, and only the
//! newest [`KEEP_ARCHIVES`] of those are kept.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use simplelog::{Config, LevelFilter, WriteLogger};
use thiserror::Error;

pub const LATEST: &str = "latest.log";
pub const KEEP_ARCHIVES: usize = 25;

const ARCHIVE_PREFIX: &str = "gymdesk-";

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("log file: {0}")]
    Io(#[from] io::Error),
    #[error("logger already set: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Rotate the previous run's log in `dir`, then log at Debug to a fresh
/// `latest.log`. Panics are routed into the log as well.
pub fn init(dir: &Path) -> Result<PathBuf, LogInitError> {
    fs::create_dir_all(dir)?;
    let archived = rotate(dir, KEEP_ARCHIVES)?;

    let path = dir.join(LATEST);
    WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(&path)?)?;
    std::panic::set_hook(Box::new(|info| log::error!("panic: {info}")));

    if let Some(archived) = archived {
        log::debug!("previous log kept as {}", archived.display());
    }
    Ok(path)
}

/// Archive `latest.log` in `dir`, if any, and prune archives down to `keep`.
///
/// Returns where the previous log went. A missing `dir` is not an error.
pub fn rotate(dir: &Path, keep: usize) -> io::Result<Option<PathBuf>> {
    let latest = dir.join(LATEST);
    let archived = match fs::metadata(&latest) {
        Ok(meta) => {
            let written: DateTime<Local> = meta.modified()?.into();
            let target = free_name(dir, &written.format("%Y%m%d-%H%M%S").to_string());
            fs::rename(&latest, &target)?;
            Some(target)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };

    prune(dir, keep)?;
    Ok(archived)
}

/// `gymdesk-<stamp>.log`, with a counter when two runs share a second.
fn free_name(dir: &Path, stamp: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{ARCHIVE_PREFIX}{stamp}.log"));
    let mut n = 1;
    while candidate.exists() {
        candidate = dir.join(format!("{ARCHIVE_PREFIX}{stamp}.{n}.log"));
        n += 1;
    }
    candidate
}

/// Stamps sort chronologically by name, so the oldest archives come first.
fn prune(dir: &Path, keep: usize) -> io::Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    let mut archives: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
        .collect();
    archives.sort();

    let excess = archives.len().saturating_sub(keep);
    for name in &archives[..excess] {
        fs::remove_file(dir.join(name))?;
    }
    Ok(())
}
