//! Session engine errors.

use crate::SessionState;

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors raised by the session engine.
///
/// Everything except [`SessionError::Storage`] is a contract violation by the
/// caller; the session is left unchanged when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Operation not allowed in the current lifecycle state
    #[error("cannot {operation} while the session is {state}")]
    InvalidState {
        /// Rejected operation
        operation: &'static str,
        /// State at the time of the call
        state: SessionState,
    },

    /// Exercise index outside the session
    #[error("exercise {index} out of range (session has {len} exercises)")]
    ExerciseOutOfRange {
        /// Requested index
        index: usize,
        /// Number of exercises
        len: usize,
    },

    /// Set index outside the exercise
    #[error("set {set} out of range for exercise {exercise} ({len} sets)")]
    SetOutOfRange {
        /// Exercise index
        exercise: usize,
        /// Requested set index
        set: usize,
        /// Number of sets in the exercise
        len: usize,
    },

    /// Advance requested on the last exercise
    #[error("no exercise after index {index}")]
    NoRemainingExercises {
        /// Current exercise index
        index: usize,
    },

    /// Record requested before the session was completed
    #[error("session is {state}, records can only be built once it is completed")]
    NotCompleted {
        /// State at the time of the call
        state: SessionState,
    },

    /// Start requested on a session without exercises
    #[error("session has no exercises to run")]
    EmptySession,

    /// Feeling rating outside 1-5
    #[error("feeling rating {0} is outside 1-5")]
    InvalidFeeling(u8),

    /// The workout store rejected the record
    #[error("save failed: {0}")]
    Storage(#[from] lift_storage::StorageError),
}
