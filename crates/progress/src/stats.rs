//! Workout statistics over recorded history.

use std::collections::HashMap;
use lift_core::{EntityId, RecordRoutine};
use serde::Serialize;

/// Number of workouts listed as recent.
pub const RECENT_WORKOUTS: usize = 5;

/// Aggregate statistics for the home view.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkoutStats {
    /// Workouts recorded
    pub total_workouts: usize,
    /// Whole minutes trained
    pub total_minutes: u64,
    /// Exercises recorded across all workouts
    pub total_exercises: usize,
    /// Exercise recorded most often
    pub most_frequent_exercise: Option<Frequency>,
    /// Routine run most often
    pub most_frequent_routine: Option<Frequency>,
    /// Latest workouts, newest first
    pub recent_workouts: Vec<RecordRoutine>,
}

/// A name and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frequency {
    /// Display name
    pub name: String,
    /// Occurrences
    pub count: usize,
}

impl WorkoutStats {
    /// Compute statistics for `workouts`.
    pub fn from_workouts(workouts: &[RecordRoutine]) -> Self {
        let total_seconds: u64 = workouts.iter().map(|w| w.duration_seconds).sum();

        let mut exercises: HashMap<EntityId, (String, usize)> = HashMap::new();
        let mut routines: HashMap<EntityId, (String, usize)> = HashMap::new();
        let mut total_exercises = 0;

        for workout in workouts {
            let entry = routines
                .entry(workout.routine_id)
                .or_insert_with(|| (workout.routine_name.clone(), 0));
            entry.1 += 1;

            for exercise in workout.exercises() {
                total_exercises += 1;
                let entry = exercises
                    .entry(exercise.exercise_id)
                    .or_insert_with(|| (exercise.exercise_name.clone(), 0));
                entry.1 += 1;
            }
        }

        let mut recent: Vec<RecordRoutine> = workouts.to_vec();
        recent.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        recent.truncate(RECENT_WORKOUTS);

        Self {
            total_workouts: workouts.len(),
            total_minutes: total_seconds / 60,
            total_exercises,
            most_frequent_exercise: most_frequent(exercises),
            most_frequent_routine: most_frequent(routines),
            recent_workouts: recent,
        }
    }
}

/// Highest count wins; ties go to the lowest id so results are stable.
fn most_frequent(counts: HashMap<EntityId, (String, usize)>) -> Option<Frequency> {
    counts
        .into_iter()
        .max_by(|(id_a, (_, a)), (id_b, (_, b))| a.cmp(b).then(id_b.cmp(id_a)))
        .map(|(_, (name, count))| Frequency { name, count })
}
