//! Size-rotating line writer for the trace file.
//!
//! Backups are numbered: `newsdesk-otlp.json.1` is the most recent,
//! `newsdesk-otlp.json.2` the one before it. Older files are dropped.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotate once the live file grows past this many bytes.
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Number of rotated files kept next to the live one.
pub const MAX_BACKUP_FILES: usize = 2;

/// Thread-safe append-only writer that rotates by size.
///
/// The file handle is opened lazily on the first write, so constructing a
/// writer for a path that cannot be opened yet never fails.
pub struct RotatingWriter {
    path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<File>>,
}

impl RotatingWriter {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limit(path, MAX_FILE_SIZE_BYTES)
    }

    pub const fn with_limit(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is too big.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error from rotation, opening or writing,
    /// or an `Other` error if the lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *guard = None;
            self.rotate()?;
        }

        let file = match guard.as_mut() {
            Some(file) => file,
            None => guard.insert(OpenOptions::new().create(true).append(true).open(&self.path)?),
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.max_bytes)
    }

    /// Shifts `.1 → .2`, drops whatever falls off the end, then moves the
    /// live file to `.1`.
    fn rotate(&self) -> io::Result<()> {
        let oldest = backup_path(&self.path, MAX_BACKUP_FILES);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..MAX_BACKUP_FILES).rev() {
            let from = backup_path(&self.path, index);
            if from.exists() {
                fs::rename(&from, backup_path(&self.path, index + 1))?;
            }
        }

        if self.path.exists() {
            fs::rename(&self.path, backup_path(&self.path, 1))?;
        }
        Ok(())
    }
}

fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

impl std::fmt::Debug for RotatingWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn appends_lines_without_rotating_below_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingWriter::with_limit(path.clone(), 1024);

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
        assert!(!backup_path(&path, 1).exists());
    }

    #[test]
    fn keeps_only_two_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingWriter::with_limit(path.clone(), 4);

        for line in ["first-line", "second-line", "third-line", "fourth-line"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "fourth-line\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 1)).unwrap(), "third-line\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 2)).unwrap(), "second-line\n");
        assert!(!backup_path(&path, 3).exists());
    }
}
