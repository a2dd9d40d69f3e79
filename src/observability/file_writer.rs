//! Size-rotating line writer for trace output.
//!
//! The active file is renamed to `<name>.<timestamp>` once it grows past the
//! size limit, and only the newest backups are kept. Timestamps come from
//! `chrono` in a sortable `YYYYmmddTHHMMSS.fff` form, so backups order by name.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Size after which the file is rotated before the next write.
    pub max_bytes: u64,
    /// Number of rotated files to keep.
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Appends lines to a file, rotating it by size.
///
/// The file is opened lazily on the first write and shared behind a mutex, so
/// one writer can serve an exporter called from any thread.
pub struct RotatingWriter {
    path: PathBuf,
    policy: RotationPolicy,
    file: Mutex<Option<File>>,
}

impl RotatingWriter {
    /// Creates a writer for `path`. Nothing is touched until the first write.
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            file: Mutex::new(None),
        }
    }

    /// Path of the active file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` and a newline, rotating first if the file is too big.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing, or an error if
    /// a previous writer panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("trace writer lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }

        if let Some(handle) = file.as_mut() {
            writeln!(handle, "{line}")?;
            handle.flush()?;
        }
        Ok(())
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.policy.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = Local::now().format("%Y%m%dT%H%M%S%.3f");
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{stamp}"));

        fs::rename(&self.path, &backup)?;
        self.prune_backups()
    }

    /// Rotated files, newest first.
    pub fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let Some(dir) = self.path.parent() else {
            return Ok(vec![]);
        };
        let Some(name) = self.path.file_name().and_then(|n| n.to_str()) else {
            return Ok(vec![]);
        };
        let prefix = format!("{name}.");

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .collect();

        backups.sort_unstable_by(|a, b| b.cmp(a));
        Ok(backups)
    }

    fn prune_backups(&self) -> io::Result<()> {
        for stale in self.backups()?.iter().skip(self.policy.max_backups) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingWriter")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> RotationPolicy {
        RotationPolicy {
            max_bytes: 8,
            max_backups: 2,
        }
    }

    #[test]
    fn appends_lines_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingWriter::new(path.clone(), RotationPolicy::default());
        assert!(!path.exists());

        writer.write_line("{}").unwrap();
        writer.write_line("[]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n[]\n");
    }

    #[test]
    fn rotates_once_file_exceeds_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingWriter::new(path.clone(), small());

        writer.write_line("0123456789").unwrap();
        writer.write_line("next").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "next\n");
        let backups = writer.backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "0123456789\n");
    }

    #[test]
    fn keeps_only_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        for stamp in ["20240101T000000.000", "20240102T000000.000", "20240103T000000.000"] {
            fs::write(dir.path().join(format!("trace.json.{stamp}")), "old\n").unwrap();
        }
        fs::write(dir.path().join("unrelated.json"), "keep\n").unwrap();

        let writer = RotatingWriter::new(path.clone(), small());
        fs::write(&path, "0123456789\n").unwrap();
        writer.write_line("fresh").unwrap();

        let backups = writer.backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert!(!dir.path().join("trace.json.20240101T000000.000").exists());
        assert!(!dir.path().join("trace.json.20240102T000000.000").exists());
        assert!(dir.path().join("unrelated.json").exists());
    }
}
