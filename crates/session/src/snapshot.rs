//! Read-only projection of a session for rendering.

use lift_core::SessionId;
use serde::Serialize;

use crate::{Session, SessionExercise, SessionState, SetValues};

/// What the presentation layer needs to draw a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Session identifier
    pub session_id: SessionId,
    /// Routine name
    pub routine_name: String,
    /// Lifecycle state
    pub state: SessionState,
    /// Index of the current exercise
    pub current_exercise_index: usize,
    /// Number of exercises
    pub exercise_count: usize,
    /// Current exercise, absent for an empty session
    pub current_exercise: Option<ExerciseView>,
    /// Completed share of all sets, 0-100
    pub progress_percent: u8,
    /// Elapsed whole seconds
    pub elapsed_seconds: u64,
    /// Elapsed time formatted for display
    pub elapsed_display: String,
    /// Whether "next exercise" is available
    pub can_advance: bool,
    /// Whether the current exercise is the last one
    pub is_last_exercise: bool,
}

/// One exercise as rendered.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseView {
    /// Exercise name
    pub name: String,
    /// Rest time in seconds
    pub rest_time: u32,
    /// Notes
    pub notes: String,
    /// Whether all sets are done
    pub complete: bool,
    /// Whether any set is timed
    pub timed: bool,
    /// Sets in order
    pub sets: Vec<SetView>,
}

/// One set as rendered.
#[derive(Debug, Clone, Serialize)]
pub struct SetView {
    /// Planned values
    pub planned: SetValues,
    /// Values as performed
    pub actual: SetValues,
    /// Done flag
    pub completed: bool,
}

impl From<&SessionExercise> for ExerciseView {
    fn from(exercise: &SessionExercise) -> Self {
        Self {
            name: exercise.name.clone(),
            rest_time: exercise.rest_time,
            notes: exercise.notes.clone(),
            complete: exercise.is_complete(),
            timed: exercise.sets.iter().any(|set| set.planned.duration > 0),
            sets: exercise
                .sets
                .iter()
                .map(|set| SetView {
                    planned: set.planned,
                    actual: set.actual,
                    completed: set.completed,
                })
                .collect(),
        }
    }
}

impl Session {
    /// Take a consistent read-only snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            routine_name: self.routine.name.clone(),
            state: self.state,
            current_exercise_index: self.current_exercise_index,
            exercise_count: self.exercises.len(),
            current_exercise: self.current_exercise().map(ExerciseView::from),
            progress_percent: self.session_progress_percent(),
            elapsed_seconds: self.elapsed_seconds,
            elapsed_display: self.elapsed_display(),
            can_advance: self.can_advance(),
            is_last_exercise: self.is_last_exercise(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use lift_core::{Exercise, RoutineTemplate};
    use super::*;

    #[test]
    fn test_snapshot_reflects_session() {
        let routine = RoutineTemplate::new(1, "Core")
            .with_exercise(Exercise::new(1, "Plank").with_set(0, 0.0, 60), 30)
            .with_exercise(Exercise::new(2, "Crunch"), 30);
        let mut session = Session::new(Arc::new(routine));
        session.start(chrono::Utc::now()).unwrap();
        session.toggle_set_completed(0, 0).unwrap();
        session.tick();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.routine_name, "Core");
        assert_eq!(snapshot.state, SessionState::InProgress);
        assert_eq!(snapshot.exercise_count, 2);
        assert_eq!(snapshot.progress_percent, 50);
        assert_eq!(snapshot.elapsed_display, "00:01");
        assert!(snapshot.can_advance);
        assert!(!snapshot.is_last_exercise);

        let plank = snapshot.current_exercise.unwrap();
        assert!(plank.timed);
        assert!(plank.complete);
        assert_eq!(plank.sets[0].planned.duration, 60);
    }

    #[test]
    fn test_snapshot_of_empty_session() {
        let session = Session::new(Arc::new(RoutineTemplate::new(1, "Empty")));
        let snapshot = session.snapshot();
        assert!(snapshot.current_exercise.is_none());
        assert!(!snapshot.can_advance);
    }
}
