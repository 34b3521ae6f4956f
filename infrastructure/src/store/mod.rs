//! Persistence adapters
//!
//! [`InMemoryStore`] implements every persistence port of the application
//! layer. Its state can be flushed to a JSON [`Snapshot`] file and reloaded
//! at startup; the question catalog is seeded from TOML.

mod memory;
mod seed;
mod snapshot;

pub use memory::InMemoryStore;
pub use seed::{SeedError, SeedQuestion, builtin_questions, load_seed_file};
pub use snapshot::{SNAPSHOT_VERSION, Snapshot, SnapshotError, SnapshotFile};
