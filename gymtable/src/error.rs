use thiserror::Error;

/// Errors surfaced by the terminal layer.
///
/// Rendering itself never fails: malformed columns and missing fields
/// degrade to non-sortable headers and empty cells.
#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("terminal too small: need {needed_width}x{needed_height}, have {width}x{height}")]
    TooSmall {
        width: u16,
        height: u16,
        needed_width: u16,
        needed_height: u16,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
