//! Storage layer (key-value substrate plus typed record store).

pub mod backend;
pub mod record_store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use record_store::RecordStore;

/// Collection keys as constants.
///
/// These match the keys the browser build used, so a data directory can be
/// seeded from an exported local-storage dump.
pub mod collections {
    /// Exercise catalog
    pub const EXERCISES: &str = "fitness_exercises";
    /// Completed workout sessions (append-only log)
    pub const SESSIONS: &str = "fitness_sessions";
    /// Named workout templates
    pub const SAVED_WORKOUTS: &str = "fitness_saved_workouts";
}
