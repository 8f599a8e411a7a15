//! Set and exercise completion tracking.

use tracing::debug;

use crate::error::Result;
use crate::{Session, SessionState};

const MUTABLE: &[SessionState] = &[SessionState::NotStarted, SessionState::InProgress];

impl Session {
    /// Flip the completed flag of one set. Returns the new flag.
    pub fn toggle_set_completed(&mut self, exercise: usize, set: usize) -> Result<bool> {
        self.require_state("toggle a set", MUTABLE)?;
        let slot = self.set_mut(exercise, set)?;
        slot.completed = !slot.completed;
        let completed = slot.completed;
        debug!(exercise, set, completed, "set toggled");
        Ok(completed)
    }

    /// Overwrite the repetitions performed in one set.
    pub fn set_actual_reps(&mut self, exercise: usize, set: usize, reps: u32) -> Result<()> {
        self.require_state("update a set", MUTABLE)?;
        self.set_mut(exercise, set)?.actual.reps = reps;
        debug!(exercise, set, reps, "actual reps updated");
        Ok(())
    }

    /// Overwrite the weight used in one set.
    pub fn set_actual_weight(&mut self, exercise: usize, set: usize, weight: f64) -> Result<()> {
        self.require_state("update a set", MUTABLE)?;
        self.set_mut(exercise, set)?.actual.weight = weight;
        debug!(exercise, set, weight, "actual weight updated");
        Ok(())
    }

    /// Overwrite the duration held in one set, in seconds.
    pub fn set_actual_duration(&mut self, exercise: usize, set: usize, duration: u32) -> Result<()> {
        self.require_state("update a set", MUTABLE)?;
        self.set_mut(exercise, set)?.actual.duration = duration;
        debug!(exercise, set, duration, "actual duration updated");
        Ok(())
    }

    /// Whether every set of the exercise is completed.
    ///
    /// This is the completion gate: navigation affordances should consult it
    /// (or [`Session::can_advance`]) rather than inspecting sets themselves.
    pub fn is_exercise_complete(&self, exercise: usize) -> Result<bool> {
        Ok(self.exercise(exercise)?.is_complete())
    }

    /// Completed sets across the session.
    pub fn completed_set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.completed_sets()).sum()
    }

    /// All sets across the session.
    pub fn total_set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Share of completed sets, rounded to a whole percent.
    pub fn session_progress_percent(&self) -> u8 {
        let total = self.total_set_count();
        if total == 0 {
            return 0;
        }
        let completed = self.completed_set_count();
        (completed as f64 * 100.0 / total as f64).round() as u8
    }
}
