//! Expands a routine template into a live session.

use std::sync::Arc;
use lift_core::{Exercise, RoutineItemKind, RoutineTemplate, SessionId};
use tracing::{debug, warn};

use crate::{Session, SessionConfig, SessionExercise, SessionSet, SessionState, SetValues};

/// Builds `NotStarted` sessions from routines.
///
/// Initialization has no side effects, so a caller may build a session for
/// every routine the user browses and discard all but the one started.
#[derive(Debug, Clone, Default)]
pub struct SessionInitializer {
    config: SessionConfig,
}

impl SessionInitializer {
    /// Create an initializer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Expand `routine` into a new session.
    ///
    /// Superset items are not executable and are skipped with a warning.
    pub fn initialize(&self, routine: Arc<RoutineTemplate>) -> Session {
        let mut exercises = Vec::with_capacity(routine.items.len());
        let mut skipped_items = 0;

        for item in &routine.items {
            match &item.kind {
                RoutineItemKind::Exercise(exercise) => {
                    exercises.push(self.expand_exercise(exercise, item.rest_time));
                }
                RoutineItemKind::SuperSet(superset) => {
                    warn!(
                        routine = routine.id,
                        superset = superset.id,
                        "superset execution is not supported, skipping item {}",
                        item.order_index
                    );
                    skipped_items += 1;
                }
            }
        }

        debug!(
            routine = routine.id,
            exercises = exercises.len(),
            "initialized session"
        );

        Session {
            id: SessionId::new(),
            routine,
            state: SessionState::NotStarted,
            started_at: None,
            ended_at: None,
            exercises,
            current_exercise_index: 0,
            elapsed_seconds: 0,
            notes: String::new(),
            feeling: Session::DEFAULT_FEELING,
            skipped_items,
        }
    }

    fn expand_exercise(&self, exercise: &Exercise, rest_time: u32) -> SessionExercise {
        let mut sets: Vec<SessionSet> = exercise
            .sets
            .iter()
            .map(|planned| {
                let values = SetValues {
                    reps: planned.reps,
                    weight: planned.weight,
                    duration: planned.duration,
                };
                SessionSet {
                    planned_set_id: Some(planned.id),
                    planned: values,
                    actual: values,
                    completed: false,
                }
            })
            .collect();

        if sets.is_empty() {
            sets.push(SessionSet {
                planned_set_id: None,
                planned: self.config.default_set,
                actual: self.config.default_set,
                completed: false,
            });
        }

        SessionExercise {
            exercise_id: exercise.id,
            name: exercise.name.clone(),
            sets,
            started_at: None,
            ended_at: None,
            rest_time,
            notes: String::new(),
        }
    }
}

impl Session {
    /// Initialize a session from `routine` with the default configuration.
    pub fn new(routine: Arc<RoutineTemplate>) -> Self {
        SessionInitializer::new().initialize(routine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lift_core::SuperSet;

    fn push_day() -> Arc<RoutineTemplate> {
        Arc::new(
            RoutineTemplate::new(1, "Push Day")
                .with_exercise(
                    Exercise::new(10, "Bench Press")
                        .with_set(10, 50.0, 0)
                        .with_set(10, 50.0, 0)
                        .with_set(10, 50.0, 0),
                    90,
                )
                .with_exercise(Exercise::new(11, "Push Ups"), 60),
        )
    }

    #[test]
    fn test_initialize_push_day() {
        let session = Session::new(push_day());

        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(session.exercises().len(), 2);
        assert_eq!(session.current_exercise_index(), 0);
        assert!(session.started_at().is_none());

        let bench = &session.exercises()[0];
        assert_eq!(bench.sets().len(), 3);
        assert_eq!(bench.rest_time(), 90);
        assert!(bench.sets().iter().all(|s| s.actual_reps() == 10 && s.actual_weight() == 50.0));
        assert!(bench.sets().iter().all(|s| !s.is_completed()));
        assert!(bench.started_at().is_none());

        let push_ups = &session.exercises()[1];
        assert_eq!(push_ups.sets().len(), 1);
        let synthesized = &push_ups.sets()[0];
        assert_eq!(synthesized.planned_set_id(), None);
        assert_eq!(synthesized.actual_reps(), 10);
        assert_eq!(synthesized.actual_weight(), 0.0);
        assert_eq!(synthesized.actual_duration(), 0);
    }

    #[test]
    fn test_set_counts_match_routine() {
        let routine = Arc::new(
            RoutineTemplate::new(2, "Mixed")
                .with_exercise(Exercise::new(1, "A").with_set(5, 10.0, 0).with_set(5, 10.0, 0), 0)
                .with_exercise(Exercise::new(2, "B"), 0)
                .with_exercise(Exercise::new(3, "C").with_set(0, 0.0, 45), 0)
                .with_exercise(Exercise::new(4, "D"), 0),
        );

        let session = Session::new(routine.clone());
        let expected: usize = routine
            .items
            .iter()
            .filter_map(|item| item.exercise())
            .map(|e| e.sets.len().max(1))
            .sum();
        let total: usize = session.exercises().iter().map(|e| e.sets().len()).sum();

        assert_eq!(session.exercises().len(), 4);
        assert_eq!(total, expected);
        assert!(session.exercises()[2].sets()[0].is_timed());
    }

    #[test]
    fn test_superset_items_are_skipped() {
        let routine = Arc::new(
            RoutineTemplate::new(3, "Arms")
                .with_exercise(Exercise::new(1, "Curl"), 60)
                .with_superset(SuperSet {
                    id: 8,
                    name: "Tri/Bi".to_string(),
                    primary_exercise: Exercise::new(2, "Pushdown"),
                    secondary_exercise: Exercise::new(3, "Hammer Curl"),
                    rest_time: 90,
                }),
        );

        let session = Session::new(routine);

        assert_eq!(session.exercises().len(), 1);
        assert_eq!(session.skipped_items(), 1);
    }

    #[test]
    fn test_custom_default_set() {
        let mut config = SessionConfig::default();
        config.default_set.reps = 12;
        let session = SessionInitializer::new()
            .with_config(config)
            .initialize(push_day());

        assert_eq!(session.exercises()[1].sets()[0].actual_reps(), 12);
    }

    #[test]
    fn test_initialize_is_repeatable() {
        let routine = push_day();
        let first = Session::new(routine.clone());
        let second = Session::new(routine);

        assert_ne!(first.id(), second.id());
        assert_eq!(first.exercises(), second.exercises());
    }
}
