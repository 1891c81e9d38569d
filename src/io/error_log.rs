use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::warn;

use crate::model::task::now_seconds;
use crate::parse::format_timestamp;

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append a free-text diagnostic line to the fallback error log.
/// Errors are swallowed; the only trace left is a `warn!` event.
pub fn log_failure(path: &Path, message: &str) {
    if let Err(e) = log_failure_inner(path, message) {
        warn!(path = %path.display(), "could not write to error log: {}", e);
    }
}

fn log_failure_inner(path: &Path, message: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}: {}", format_timestamp(now_seconds()), message)
}
