//! JSON snapshot of the whole store.
//!
//! The snapshot is written to a sibling temp file and renamed into place,
//! so a crash mid-write leaves the previous snapshot intact.

use couplequest_domain::{
    Couple, DailyQuestion, Message, Profile, Question, QuizResult, Response,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Current on-disk format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to access snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
}

/// Every table of the store, as plain lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u32,
    pub couples: Vec<Couple>,
    pub daily_questions: Vec<DailyQuestion>,
    pub responses: Vec<Response>,
    pub questions: Vec<Question>,
    pub profiles: Vec<Profile>,
    pub messages: Vec<Message>,
    pub quizzes: Vec<QuizResult>,
}

/// Location of a snapshot on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. `Ok(None)` when the file does not exist yet.
    pub async fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };

        let snapshot: Snapshot =
            serde_json::from_slice(&bytes).map_err(|source| SnapshotError::Parse {
                path: self.path.clone(),
                source,
            })?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }

        debug!(
            "Loaded snapshot {} ({} couples, {} daily questions)",
            self.path.display(),
            snapshot.couples.len(),
            snapshot.daily_questions.len()
        );
        Ok(Some(snapshot))
    }

    /// Replace the snapshot on disk with `snapshot`.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }

        let json = serde_json::to_vec_pretty(snapshot).map_err(|source| SnapshotError::Parse {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| self.io_error(source))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
