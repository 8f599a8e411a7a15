//! Live session model.

use std::sync::Arc;
use lift_core::{EntityId, RoutineTemplate, SessionId, Time};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SessionError};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Initialized, clock not running
    NotStarted,
    /// Clock running, sets being tracked
    InProgress,
    /// Finished, ready to be recorded
    Completed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not started"),
            SessionState::InProgress => write!(f, "in progress"),
            SessionState::Completed => write!(f, "completed"),
        }
    }
}

/// Reps, weight and duration of a set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetValues {
    /// Repetitions
    pub reps: u32,
    /// Weight in kg
    pub weight: f64,
    /// Duration in seconds; zero for rep-based sets
    pub duration: u32,
}

/// Tracking slot for one set.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSet {
    pub(crate) planned_set_id: Option<EntityId>,
    pub(crate) planned: SetValues,
    pub(crate) actual: SetValues,
    pub(crate) completed: bool,
}

impl SessionSet {
    /// Planned set this slot tracks, `None` when synthesized.
    pub fn planned_set_id(&self) -> Option<EntityId> {
        self.planned_set_id
    }

    /// Values the routine planned.
    pub fn planned(&self) -> SetValues {
        self.planned
    }

    /// Values as performed.
    pub fn actual(&self) -> SetValues {
        self.actual
    }

    /// Repetitions performed
    pub fn actual_reps(&self) -> u32 {
        self.actual.reps
    }

    /// Weight used
    pub fn actual_weight(&self) -> f64 {
        self.actual.weight
    }

    /// Duration held
    pub fn actual_duration(&self) -> u32 {
        self.actual.duration
    }

    /// Whether this is a timed set.
    pub fn is_timed(&self) -> bool {
        self.actual.duration > 0
    }

    /// Whether the set was marked done.
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Tracking unit for one routine exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionExercise {
    pub(crate) exercise_id: EntityId,
    pub(crate) name: String,
    pub(crate) sets: Vec<SessionSet>,
    pub(crate) started_at: Option<Time>,
    pub(crate) ended_at: Option<Time>,
    pub(crate) rest_time: u32,
    pub(crate) notes: String,
}

impl SessionExercise {
    /// Catalog exercise id
    pub fn exercise_id(&self) -> EntityId {
        self.exercise_id
    }

    /// Exercise name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tracked sets in order
    pub fn sets(&self) -> &[SessionSet] {
        &self.sets
    }

    /// When the user reached this exercise
    pub fn started_at(&self) -> Option<Time> {
        self.started_at
    }

    /// When the user left this exercise
    pub fn ended_at(&self) -> Option<Time> {
        self.ended_at
    }

    /// Configured rest time in seconds
    pub fn rest_time(&self) -> u32 {
        self.rest_time
    }

    /// Free-text notes
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// True when every set is completed; vacuously true without sets.
    pub fn is_complete(&self) -> bool {
        self.sets.iter().all(|set| set.completed)
    }

    pub(crate) fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|set| set.completed).count()
    }

    /// Stamp `ended_at` unless already stamped. Returns whether it stamped.
    pub(crate) fn close(&mut self, now: Time) -> bool {
        if self.ended_at.is_some() {
            return false;
        }
        self.ended_at = Some(now);
        true
    }
}

/// A live workout derived from a routine.
///
/// Owned by a single caller; see [`crate::SessionHandle`] for the
/// lock-guarded form driven by the clock.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) id: SessionId,
    pub(crate) routine: Arc<RoutineTemplate>,
    pub(crate) state: SessionState,
    pub(crate) started_at: Option<Time>,
    pub(crate) ended_at: Option<Time>,
    pub(crate) exercises: Vec<SessionExercise>,
    pub(crate) current_exercise_index: usize,
    pub(crate) elapsed_seconds: u64,
    pub(crate) notes: String,
    pub(crate) feeling: u8,
    pub(crate) skipped_items: usize,
}

impl Session {
    /// Default feeling rating
    pub const DEFAULT_FEELING: u8 = 3;

    /// Session identifier
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Routine this session was initialized from
    pub fn routine(&self) -> &RoutineTemplate {
        &self.routine
    }

    /// Lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// When the session was started
    pub fn started_at(&self) -> Option<Time> {
        self.started_at
    }

    /// When the session was completed
    pub fn ended_at(&self) -> Option<Time> {
        self.ended_at
    }

    /// Tracked exercises in routine order
    pub fn exercises(&self) -> &[SessionExercise] {
        &self.exercises
    }

    /// Tracked exercise at `index`.
    pub fn exercise(&self, index: usize) -> Result<&SessionExercise> {
        self.exercises.get(index).ok_or(SessionError::ExerciseOutOfRange {
            index,
            len: self.exercises.len(),
        })
    }

    /// Index of the exercise the user is on
    pub fn current_exercise_index(&self) -> usize {
        self.current_exercise_index
    }

    /// Exercise the user is on, `None` only for an empty session.
    pub fn current_exercise(&self) -> Option<&SessionExercise> {
        self.exercises.get(self.current_exercise_index)
    }

    /// Overall notes
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Feeling rating, 1-5
    pub fn feeling(&self) -> u8 {
        self.feeling
    }

    /// Routine items that were not expanded into exercises
    pub fn skipped_items(&self) -> usize {
        self.skipped_items
    }

    /// Replace the overall notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Rate how the workout felt.
    pub fn set_feeling(&mut self, rating: u8) -> Result<()> {
        if !(1..=5).contains(&rating) {
            return Err(SessionError::InvalidFeeling(rating));
        }
        self.feeling = rating;
        Ok(())
    }

    /// Replace the notes of one exercise.
    pub fn set_exercise_notes(&mut self, index: usize, notes: impl Into<String>) -> Result<()> {
        let exercise = self.exercise_mut(index)?;
        exercise.notes = notes.into();
        debug!(exercise = index, "exercise notes updated");
        Ok(())
    }

    pub(crate) fn exercise_mut(&mut self, index: usize) -> Result<&mut SessionExercise> {
        let len = self.exercises.len();
        self.exercises
            .get_mut(index)
            .ok_or(SessionError::ExerciseOutOfRange { index, len })
    }

    pub(crate) fn set_mut(&mut self, exercise: usize, set: usize) -> Result<&mut SessionSet> {
        let sets = &mut self.exercise_mut(exercise)?.sets;
        let len = sets.len();
        sets.get_mut(set)
            .ok_or(SessionError::SetOutOfRange { exercise, set, len })
    }

    pub(crate) fn require_state(&self, operation: &'static str, allowed: &[SessionState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}
