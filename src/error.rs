use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use symphonia::core::errors::Error as SymphoniaError;

/// Failures that end the run.
///
/// The message only names the path; the underlying cause is reachable
/// through [`std::error::Error::source`] so callers can print the chain.
#[derive(Debug, thiserror::Error)]
pub enum LengthError {
    /// The file or directory exists but could not be opened or read.
    #[error("{}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The decoder failed in a way that does not mean "not audio".
    #[error("{}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: SymphoniaError,
    },
}

impl LengthError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        LengthError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<walkdir::Error> for LengthError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        LengthError::Io {
            path,
            source: err.into(),
        }
    }
}

/// A path that could not be measured but does not stop the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Problem {
    NotFound(PathBuf),
    IsDirectory(PathBuf),
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::NotFound(path) => write!(f, "{}: no such file", path.display()),
            Problem::IsDirectory(path) => write!(f, "{}: is a directory", path.display()),
        }
    }
}
