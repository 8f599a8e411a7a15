//! Record model - the persisted history of a finished workout.
//!
//! The graph mirrors the routine's shape but carries what was actually
//! performed. Keys start out [`RecordKey::Unassigned`] and are filled in by
//! the store.

use serde::{Deserialize, Serialize};
use crate::id::{EntityId, RecordKey};
use crate::Time;

/// A completed workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRoutine {
    /// Record identifier
    #[serde(default)]
    pub id: RecordKey,

    /// Routine this workout ran
    pub routine_id: EntityId,

    /// Routine name at the time of the workout
    #[serde(default)]
    pub routine_name: String,

    /// When the workout started
    pub started_at: Time,

    /// When the workout ended
    pub ended_at: Option<Time>,

    /// Elapsed whole seconds as counted by the session clock
    #[serde(default)]
    pub duration_seconds: u64,

    /// Overall notes
    #[serde(default)]
    pub notes: String,

    /// Subjective feeling, 1-5
    #[serde(default)]
    pub feeling: u8,

    /// Performed items in routine order
    #[serde(default)]
    pub items: Vec<RecordItem>,
}

impl RecordRoutine {
    /// Iterate over the recorded exercises.
    pub fn exercises(&self) -> impl Iterator<Item = &RecordExercise> {
        self.items.iter().filter_map(|item| item.record_exercise.as_ref())
    }

    /// Total number of recorded sets.
    pub fn set_count(&self) -> usize {
        self.exercises().map(|e| e.record_sets.len()).sum()
    }
}

/// Either a recorded exercise or a recorded superset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordItem {
    /// Item identifier
    #[serde(default)]
    pub id: RecordKey,

    /// Owning record
    #[serde(default)]
    pub record_routine_id: RecordKey,

    /// Recorded exercise row, when this item is an exercise
    #[serde(default)]
    pub record_exercise_id: Option<RecordKey>,

    /// Recorded superset row, when this item is a superset
    #[serde(default)]
    pub record_super_set_id: Option<RecordKey>,

    /// Rest taken after this item, in seconds
    #[serde(default)]
    pub actual_rest_time: u32,

    /// Position in the record
    pub order_index: u32,

    /// The recorded exercise
    #[serde(default)]
    pub record_exercise: Option<RecordExercise>,

    /// The recorded superset
    #[serde(default)]
    pub record_super_set: Option<RecordSuperSet>,
}

/// A recorded superset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSuperSet {
    /// Row identifier
    #[serde(default)]
    pub id: RecordKey,

    /// Owning record
    #[serde(default)]
    pub record_routine_id: RecordKey,

    /// Superset that was performed
    pub super_set_id: EntityId,

    /// Start of the superset
    pub started_at: Time,

    /// End of the superset
    pub ended_at: Time,

    /// Rest taken, in seconds
    #[serde(default)]
    pub actual_rest_time: u32,

    /// Position in the record
    pub order_index: u32,
}

/// A recorded exercise with its sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordExercise {
    /// Row identifier
    #[serde(default)]
    pub id: RecordKey,

    /// Owning record
    #[serde(default)]
    pub record_routine_id: RecordKey,

    /// Exercise that was performed
    pub exercise_id: EntityId,

    /// Exercise name at the time of the workout
    #[serde(default)]
    pub exercise_name: String,

    /// Start of the exercise
    pub started_at: Time,

    /// End of the exercise
    pub ended_at: Time,

    /// Rest taken, in seconds
    #[serde(default)]
    pub actual_rest_time: u32,

    /// Free-text notes
    #[serde(default)]
    pub notes: String,

    /// Position in the record
    pub order_index: u32,

    /// Performed sets
    #[serde(default)]
    pub record_sets: Vec<RecordSet>,
}

/// A recorded set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Row identifier
    #[serde(default)]
    pub id: RecordKey,

    /// Owning exercise row
    #[serde(default)]
    pub record_exercise_id: RecordKey,

    /// Planned set, `None` for a synthesized default set
    #[serde(default)]
    pub set_id: Option<EntityId>,

    /// Repetitions performed
    pub actual_reps: u32,

    /// Weight used in kg
    pub actual_weight: f64,

    /// Duration in seconds
    pub actual_duration: u32,

    /// Whether the set was marked done
    #[serde(default)]
    pub completed: bool,

    /// When the set was completed
    pub completed_at: Time,

    /// Position within the exercise
    pub order_index: u32,
}
