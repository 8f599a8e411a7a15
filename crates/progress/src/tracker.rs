//! Workout history tracking service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lift_core::{EntityId, RecordRoutine};
use lift_storage::{Result, WorkoutStore};

use crate::WorkoutStats;

/// Workout history service.
#[async_trait]
pub trait HistoryTracker: Send + Sync {
    /// Aggregate statistics over all recorded workouts.
    async fn stats(&self) -> Result<WorkoutStats>;

    /// Workouts of one routine, newest first.
    async fn routine_history(&self, routine_id: EntityId) -> Result<Vec<RecordRoutine>>;

    /// Take a history snapshot.
    async fn snapshot(&self) -> Result<HistorySnapshot>;
}

/// History at a point in time.
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    /// When snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Statistics at that time
    pub stats: WorkoutStats,

    /// Share of recorded sets marked completed, 0-100
    pub completion_percent: u8,
}

/// History tracker reading straight from a workout store.
pub struct BasicHistoryTracker<S: WorkoutStore> {
    storage: std::sync::Arc<S>,
}

impl<S: WorkoutStore> BasicHistoryTracker<S> {
    /// Create a new history tracker.
    pub fn new(storage: S) -> Self {
        Self {
            storage: std::sync::Arc::new(storage),
        }
    }

    /// Share of completed sets across `workouts`.
    fn completion_percent(workouts: &[RecordRoutine]) -> u8 {
        let mut total = 0usize;
        let mut completed = 0usize;
        for workout in workouts {
            for exercise in workout.exercises() {
                total += exercise.record_sets.len();
                completed += exercise.record_sets.iter().filter(|s| s.completed).count();
            }
        }

        if total > 0 {
            (completed as f64 * 100.0 / total as f64).round() as u8
        } else {
            0
        }
    }
}

#[async_trait]
impl<S: WorkoutStore + 'static> HistoryTracker for BasicHistoryTracker<S> {
    async fn stats(&self) -> Result<WorkoutStats> {
        let workouts = self.storage.list_workouts().await?;
        Ok(WorkoutStats::from_workouts(&workouts))
    }

    async fn routine_history(&self, routine_id: EntityId) -> Result<Vec<RecordRoutine>> {
        let mut workouts: Vec<RecordRoutine> = self
            .storage
            .list_workouts()
            .await?
            .into_iter()
            .filter(|w| w.routine_id == routine_id)
            .collect();
        workouts.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(workouts)
    }

    async fn snapshot(&self) -> Result<HistorySnapshot> {
        let workouts = self.storage.list_workouts().await?;

        Ok(HistorySnapshot {
            timestamp: Utc::now(),
            stats: WorkoutStats::from_workouts(&workouts),
            completion_percent: Self::completion_percent(&workouts),
        })
    }
}
