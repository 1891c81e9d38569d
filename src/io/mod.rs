pub mod audit_log;
pub mod config_io;
pub mod data_dir;
pub mod error_log;
pub mod lock;
pub mod task_store;
pub mod user_store;

pub use audit_log::AuditLog;
pub use data_dir::{DataDir, sanitize_username};
pub use lock::DataLock;
pub use task_store::TaskStore;
pub use user_store::UserStore;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::parse::RecordError;

/// Error type for the file stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("user already exists: {0}")]
    AlreadyExists(String),
    #[error("corrupt store {path} (line {line}): {source}")]
    CorruptStore {
        path: PathBuf,
        line: usize,
        source: RecordError,
    },
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse taskbook.toml: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Lock(#[from] lock::LockError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Non-blank lines of an append-only file with their 1-based line numbers.
/// A missing file has no lines; lines that are not valid UTF-8 are skipped.
pub(crate) fn read_record_lines(path: &Path) -> Result<Vec<(usize, String)>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;

    let mut lines = Vec::new();
    for (idx, raw) in bytes.split(|b| *b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        match std::str::from_utf8(raw) {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => lines.push((idx + 1, line.to_string())),
            Err(e) => warn!(path = %path.display(), line = idx + 1, "skipping undecodable line: {}", e),
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_record_lines_skips_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.txt");
        fs::write(&path, b"alice|pw\r\n\xff\xfe|junk\n\nbob|pw2\n").unwrap();

        let lines = read_record_lines(&path).unwrap();
        assert_eq!(
            lines,
            vec![(1, "alice|pw".to_string()), (4, "bob|pw2".to_string())]
        );
    }

    #[test]
    fn test_read_record_lines_missing_file() {
        let tmp = TempDir::new().unwrap();
        assert!(read_record_lines(&tmp.path().join("nope.txt")).unwrap().is_empty());
    }
}
