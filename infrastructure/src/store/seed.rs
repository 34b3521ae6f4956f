//! Question catalog seeding from TOML.
//!
//! A seed file is a list of `[[questions]]` tables:
//!
//! ```toml
//! [[questions]]
//! text = "What's your favorite Christmas memory with me?"
//! category = "memories"
//! depth = "light"
//! module = "daily"
//! occasion = "christmas"
//! ```

use couplequest_domain::{Occasion, Question, QuestionId, QuestionModule};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_QUESTIONS: &str = include_str!("default_questions.toml");

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed file {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}

/// A catalog entry before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedQuestion {
    pub text: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_depth")]
    pub depth: String,
    pub module: QuestionModule,
    #[serde(default)]
    pub occasion: Option<Occasion>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_category() -> String {
    "general".to_string()
}

fn default_depth() -> String {
    "light".to_string()
}

fn default_active() -> bool {
    true
}

impl SeedQuestion {
    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            text: self.text,
            category: self.category,
            depth: self.depth,
            module: self.module,
            occasion: self.occasion,
            active: self.active,
        }
    }
}

#[derive(Deserialize)]
struct SeedFile {
    #[serde(default)]
    questions: Vec<SeedQuestion>,
}

fn parse(content: &str, origin: &str) -> Result<Vec<SeedQuestion>, SeedError> {
    toml::from_str::<SeedFile>(content)
        .map(|f| f.questions)
        .map_err(|source| SeedError::Parse {
            origin: origin.to_string(),
            source,
        })
}

/// The catalog shipped with the binary.
pub fn builtin_questions() -> Result<Vec<SeedQuestion>, SeedError> {
    parse(BUILTIN_QUESTIONS, "<builtin>")
}

/// Read a seed file from disk.
pub fn load_seed_file(path: &Path) -> Result<Vec<SeedQuestion>, SeedError> {
    let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, &path.display().to_string())
}
