//! JSONL file writer for couple activity events.
//!
//! Each [`ActivityEvent`] becomes one JSON line carrying its `type` and a
//! millisecond `timestamp`. Lines are appended with a single write each, so
//! the file is readable while the server runs and never truncated.

use chrono::{DateTime, SecondsFormat, Utc};
use couplequest_application::ports::activity_logger::{ActivityEvent, ActivityLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

pub struct JsonlActivityLogger {
    file: Mutex<File>,
    path: PathBuf,
}

impl JsonlActivityLogger {
    /// Open (or create) the log at `path`, creating parent directories.
    ///
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create activity log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Self {
                file: Mutex::new(file),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Could not open activity log {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The line written for `event`. Object payloads are flattened into the
/// record; anything else goes under `data`.
fn activity_record(event: ActivityEvent, at: DateTime<Utc>) -> Value {
    let mut record = match event.payload {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    record.insert("type".to_string(), Value::from(event.event_type));
    record.insert(
        "timestamp".to_string(),
        Value::from(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    Value::Object(record)
}

impl ActivityLogger for JsonlActivityLogger {
    fn log(&self, event: ActivityEvent) {
        let mut line = activity_record(event, Utc::now()).to_string();
        line.push('\n');

        let Ok(mut file) = self.file.lock() else {
            warn!("Activity log {} is poisoned, dropping event", self.path.display());
            return;
        };
        if let Err(e) = file.write_all(line.as_bytes()) {
            warn!("Failed to write activity log {}: {}", self.path.display(), e);
        }
    }
}
