// Counter file persistence

use crate::errors::CounterError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The single persisted integer this service advances.
///
/// Stored as UTF-8 decimal text. Reads tolerate surrounding whitespace;
/// writes emit the digits with no trailing newline.
#[derive(Debug, Clone)]
pub struct CounterFile {
    path: PathBuf,
}

impl CounterFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the current value. A missing file and non-numeric
    /// content are distinct errors; neither mutates anything.
    pub fn read(&self) -> Result<u64, CounterError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CounterError::NotFound {
                path: self.path.clone(),
            },
            _ => CounterError::Io {
                action: "read",
                path: self.path.clone(),
                source: e,
            },
        })?;

        let trimmed = raw.trim();
        trimmed.parse::<u64>().map_err(|_| CounterError::Parse {
            path: self.path.clone(),
            content: trimmed.to_string(),
        })
    }

    /// Overwrite the file with `value` as decimal text. Creates the file if
    /// it does not exist.
    pub fn write(&self, value: u64) -> Result<(), CounterError> {
        fs::write(&self.path, value.to_string()).map_err(|e| CounterError::Io {
            action: "write",
            path: self.path.clone(),
            source: e,
        })
    }
}
