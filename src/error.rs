use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors raised while loading Unicode data or interpreting user input.
///
/// Classification itself never fails; every error originates at the I/O
/// boundary or in argument parsing.
#[derive(Debug, Error)]
pub enum Error {
    /// A data file exists but could not be read.
    #[error("could not read {}: {source}", path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A required data file is not present in the cache directory.
    #[error("missing data file {}", .0.display())]
    MissingFile(PathBuf),
    /// A Unicode version string is not of the form `major.minor.patch`.
    #[error("invalid Unicode version {0:?}")]
    InvalidVersion(String),
    /// A codepoint argument is not a hexadecimal value within the codespace.
    #[error("invalid codepoint {0:?}")]
    InvalidCodepoint(String),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
