use thiserror::Error;

use crate::settings::SettingsError;
use crate::store::StoreError;

/// Errors that end the dashboard.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Terminal(#[from] gymtable::Error),
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("store: {0}")]
    Store(#[from] StoreError),
    #[error("no home directory to keep settings and logs in")]
    NoDataDir,
}
