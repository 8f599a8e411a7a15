//! Lift core data models.
//!
//! This crate defines the routine templates a workout is started from and
//! the record graph a finished workout is persisted as.

#![warn(missing_docs)]

// Core identities
mod id;

// Templates and history
mod routine;
mod record;

// Re-exports
pub use id::*;

pub use routine::{Exercise, PlannedSet, RoutineItem, RoutineItemKind, RoutineTemplate, SuperSet};
pub use record::{RecordExercise, RecordItem, RecordRoutine, RecordSet, RecordSuperSet};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
