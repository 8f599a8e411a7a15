//! Folds a completed session into a persistable record graph.

use lift_core::{RecordExercise, RecordItem, RecordKey, RecordRoutine, RecordSet, Time};
use tracing::debug;

use crate::error::{Result, SessionError};
use crate::{Session, SessionExercise, SessionState};

impl Session {
    /// Build the record graph for a completed session.
    ///
    /// Exercises the user never reached are given the session's interval so
    /// every recorded exercise has a start and an end. `now` fills any end
    /// that is still missing. All keys are left [`RecordKey::Unassigned`].
    pub fn build_record(&self, now: Time) -> Result<RecordRoutine> {
        if self.state != SessionState::Completed {
            return Err(SessionError::NotCompleted { state: self.state });
        }

        let session_start = self.started_at.unwrap_or(now);
        let session_end = self.ended_at.unwrap_or(now);

        let items: Vec<RecordItem> = self
            .exercises
            .iter()
            .enumerate()
            .map(|(index, exercise)| {
                let order_index = index as u32;
                RecordItem {
                    id: RecordKey::Unassigned,
                    record_routine_id: RecordKey::Unassigned,
                    record_exercise_id: Some(RecordKey::Unassigned),
                    record_super_set_id: None,
                    actual_rest_time: exercise.rest_time,
                    order_index,
                    record_exercise: Some(record_exercise(exercise, order_index, session_start, session_end)),
                    record_super_set: None,
                }
            })
            .collect();

        debug!(session = %self.id, items = items.len(), "built workout record");

        Ok(RecordRoutine {
            id: RecordKey::Unassigned,
            routine_id: self.routine.id,
            routine_name: self.routine.name.clone(),
            started_at: session_start,
            ended_at: Some(session_end),
            duration_seconds: self.elapsed_seconds,
            notes: self.notes.clone(),
            feeling: self.feeling,
            items,
        })
    }
}

fn record_exercise(
    exercise: &SessionExercise,
    order_index: u32,
    session_start: Time,
    session_end: Time,
) -> RecordExercise {
    let started_at = exercise.started_at.unwrap_or(session_start);
    let ended_at = exercise.ended_at.unwrap_or(session_end);

    let record_sets = exercise
        .sets
        .iter()
        .enumerate()
        .map(|(index, set)| RecordSet {
            id: RecordKey::Unassigned,
            record_exercise_id: RecordKey::Unassigned,
            set_id: set.planned_set_id,
            actual_reps: set.actual.reps,
            actual_weight: set.actual.weight,
            actual_duration: set.actual.duration,
            completed: set.completed,
            completed_at: ended_at,
            order_index: index as u32,
        })
        .collect();

    RecordExercise {
        id: RecordKey::Unassigned,
        record_routine_id: RecordKey::Unassigned,
        exercise_id: exercise.exercise_id,
        exercise_name: exercise.name.clone(),
        started_at,
        ended_at,
        actual_rest_time: exercise.rest_time,
        notes: exercise.notes.clone(),
        order_index,
        record_sets,
    }
}
