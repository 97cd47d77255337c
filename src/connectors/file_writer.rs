//! Append-only CSV archive files. Each archiver opens its file
//! once at bootstrap, writing a header line only if the file did not already
//! exist, and appends one timestamp-prefixed row per record thereafter.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::Local;
use parking_lot::Mutex;
use tracing::warn;

pub struct ArchiveFile {
    label: &'static str,
    file: Mutex<File>,
}

impl ArchiveFile {
    pub fn open(label: &'static str, path: impl AsRef<Path>, header: &str) -> std::io::Result<Self> {
        let path = path.as_ref();
        let is_new = !path.exists();
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if is_new {
            writeln!(file, "{header}")?;
        }
        Ok(Self {
            label,
            file: Mutex::new(file),
        })
    }

    /// Appends `body` prefixed with an `HH:MM:SS.mmm` timestamp.
    pub fn append_line(&self, body: &str) {
        let timestamp = Local::now().format("%H:%M:%S%.3f");
        let mut file = self.file.lock();
        if let Err(err) = writeln!(file, "{timestamp}, {body}") {
            warn!(label = self.label, %err, "failed to append archive row");
        }
    }
}
