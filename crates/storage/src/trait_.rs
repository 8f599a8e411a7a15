//! Storage trait abstractions.

use async_trait::async_trait;
use lift_core::{EntityId, RecordRoutine, RoutineTemplate};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store refused the data
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Source of routine templates.
#[async_trait]
pub trait RoutineProvider: Send + Sync {
    /// Save a routine, assigning ids to new entities. Returns the stored form.
    async fn save_routine(&mut self, routine: &RoutineTemplate) -> Result<RoutineTemplate>;

    /// Load a routine by ID, items in order.
    async fn load_routine(&self, id: EntityId) -> Result<Option<RoutineTemplate>>;

    /// List all routines.
    async fn list_routines(&self) -> Result<Vec<RoutineTemplate>>;
}

/// Persistence for finished workouts.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Persist a record graph.
    ///
    /// Parents are created before children, so every unassigned key in the
    /// graph is resolved in the returned copy.
    async fn save_workout(&mut self, record: &RecordRoutine) -> Result<RecordRoutine>;

    /// Load a workout by ID.
    async fn load_workout(&self, id: EntityId) -> Result<Option<RecordRoutine>>;

    /// List all workouts, oldest first.
    async fn list_workouts(&self) -> Result<Vec<RecordRoutine>>;
}
