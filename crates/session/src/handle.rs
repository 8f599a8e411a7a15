//! Session handle - the owned, lock-guarded session plus its clock.

use std::sync::Arc;
use chrono::Utc;
use lift_core::{RecordRoutine, RoutineTemplate, SessionId};
use lift_storage::WorkoutStore;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::Result;
use crate::{Session, SessionClock, SessionConfig, SessionInitializer, SessionSnapshot};

/// The presentation layer's single handle on a live session.
///
/// Every command takes the session lock, so clock ticks and user commands
/// never overlap. Renderers pull [`SessionSnapshot`]s instead of reading the
/// session directly.
#[derive(Debug)]
pub struct SessionHandle {
    id: SessionId,
    session: Arc<Mutex<Session>>,
    clock: SessionClock,
}

impl SessionHandle {
    /// Wrap an initialized session.
    pub fn new(session: Session, config: &SessionConfig) -> Self {
        Self {
            id: session.id(),
            session: Arc::new(Mutex::new(session)),
            clock: SessionClock::new(config.tick_interval),
        }
    }

    /// Initialize a session from `routine` and wrap it.
    pub fn from_routine(routine: Arc<RoutineTemplate>, config: SessionConfig) -> Self {
        let session = SessionInitializer::new()
            .with_config(config.clone())
            .initialize(routine);
        Self::new(session, &config)
    }

    /// Session identifier
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Start the session and its clock.
    pub async fn start(&mut self) -> Result<()> {
        let mut session = self.session.lock().await;
        session.start(Utc::now())?;
        self.clock.start(self.session.clone());
        Ok(())
    }

    /// Flip one set's completed flag.
    pub async fn toggle_set_completed(&self, exercise: usize, set: usize) -> Result<bool> {
        self.session.lock().await.toggle_set_completed(exercise, set)
    }

    /// Overwrite the repetitions performed in one set.
    pub async fn set_actual_reps(&self, exercise: usize, set: usize, reps: u32) -> Result<()> {
        self.session.lock().await.set_actual_reps(exercise, set, reps)
    }

    /// Overwrite the weight used in one set.
    pub async fn set_actual_weight(&self, exercise: usize, set: usize, weight: f64) -> Result<()> {
        self.session.lock().await.set_actual_weight(exercise, set, weight)
    }

    /// Overwrite the duration held in one set.
    pub async fn set_actual_duration(&self, exercise: usize, set: usize, duration: u32) -> Result<()> {
        self.session.lock().await.set_actual_duration(exercise, set, duration)
    }

    /// Replace one exercise's notes.
    pub async fn set_exercise_notes(&self, exercise: usize, notes: impl Into<String>) -> Result<()> {
        self.session.lock().await.set_exercise_notes(exercise, notes)
    }

    /// Replace the overall notes.
    pub async fn set_notes(&self, notes: impl Into<String>) {
        self.session.lock().await.set_notes(notes);
    }

    /// Rate the workout, 1-5.
    pub async fn set_feeling(&self, rating: u8) -> Result<()> {
        self.session.lock().await.set_feeling(rating)
    }

    /// Whether every set of the exercise is done.
    pub async fn is_exercise_complete(&self, exercise: usize) -> Result<bool> {
        self.session.lock().await.is_exercise_complete(exercise)
    }

    /// Completed share of all sets.
    pub async fn session_progress_percent(&self) -> u8 {
        self.session.lock().await.session_progress_percent()
    }

    /// Move to the next exercise without consulting the completion gate.
    pub async fn advance_to_next_exercise(&self) -> Result<usize> {
        self.session.lock().await.advance_to_next_exercise(Utc::now())
    }

    /// Finish the session and stop its clock.
    pub async fn complete(&mut self) -> Result<()> {
        let mut session = self.session.lock().await;
        session.complete(Utc::now())?;
        self.clock.stop();
        Ok(())
    }

    /// Read-only view for rendering.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Build the record graph of the completed session.
    pub async fn build_record(&self) -> Result<RecordRoutine> {
        self.session.lock().await.build_record(Utc::now())
    }

    /// Build the record and hand it to `store` once.
    ///
    /// On failure the error is returned as is and the session is untouched,
    /// so the caller can offer a retry.
    pub async fn save<S: WorkoutStore + ?Sized>(&self, store: &mut S) -> Result<RecordRoutine> {
        let record = self.build_record().await?;
        match store.save_workout(&record).await {
            Ok(saved) => {
                info!(session = %self.id, record = %saved.id, "workout saved");
                Ok(saved)
            }
            Err(e) => {
                warn!(session = %self.id, "failed to save workout: {}", e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use async_trait::async_trait;
    use lift_core::{EntityId, Exercise, RecordKey};
    use lift_storage::StorageError;
    use crate::{SessionError, SessionState};
    use super::*;

    struct FlakyStore {
        fail_next: bool,
        saved: Vec<RecordRoutine>,
    }

    #[async_trait]
    impl WorkoutStore for FlakyStore {
        async fn save_workout(&mut self, record: &RecordRoutine) -> lift_storage::Result<RecordRoutine> {
            if self.fail_next {
                self.fail_next = false;
                return Err(StorageError::Other("backend unavailable".to_string()));
            }
            let mut saved = record.clone();
            saved.id = RecordKey::Assigned(self.saved.len() as EntityId + 1);
            self.saved.push(saved.clone());
            Ok(saved)
        }

        async fn load_workout(&self, _id: EntityId) -> lift_storage::Result<Option<RecordRoutine>> {
            Ok(None)
        }

        async fn list_workouts(&self) -> lift_storage::Result<Vec<RecordRoutine>> {
            Ok(self.saved.clone())
        }
    }

    fn handle() -> SessionHandle {
        let routine = RoutineTemplate::new(1, "Pull Day")
            .with_exercise(Exercise::new(1, "Pull Up").with_set(8, 0.0, 0).with_set(8, 0.0, 0), 90)
            .with_exercise(Exercise::new(2, "Row"), 60);
        SessionHandle::from_routine(Arc::new(routine), SessionConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_runs_a_workout() {
        let mut handle = handle();
        handle.start().await.unwrap();

        tokio::time::sleep(Duration::from_millis(61_500)).await;
        assert_eq!(handle.snapshot().await.elapsed_seconds, 61);

        handle.toggle_set_completed(0, 0).await.unwrap();
        handle.toggle_set_completed(0, 1).await.unwrap();
        assert!(handle.is_exercise_complete(0).await.unwrap());
        assert!(handle.snapshot().await.can_advance);
        assert_eq!(handle.advance_to_next_exercise().await.unwrap(), 1);

        handle.set_actual_reps(1, 0, 12).await.unwrap();
        handle.toggle_set_completed(1, 0).await.unwrap();
        assert_eq!(handle.session_progress_percent().await, 100);

        handle.complete().await.unwrap();
        tokio::time::sleep(Duration::from_secs(20)).await;

        let snapshot = handle.snapshot().await;
        assert_eq!(snapshot.state, SessionState::Completed);
        assert_eq!(snapshot.elapsed_seconds, 61);

        let record = handle.build_record().await.unwrap();
        assert_eq!(record.duration_seconds, 61);
        assert_eq!(record.items[1].record_exercise.as_ref().unwrap().record_sets[0].actual_reps, 12);
    }

    #[tokio::test]
    async fn test_save_failure_leaves_session_intact() {
        let mut handle = handle();
        handle.start().await.unwrap();
        handle.toggle_set_completed(0, 0).await.unwrap();
        handle.complete().await.unwrap();
        handle.set_feeling(5).await.unwrap();

        let mut store = FlakyStore { fail_next: true, saved: Vec::new() };
        let err = handle.save(&mut store).await.unwrap_err();
        assert!(matches!(err, SessionError::Storage(StorageError::Other(_))));
        assert_eq!(handle.snapshot().await.state, SessionState::Completed);

        let saved = handle.save(&mut store).await.unwrap();
        assert_eq!(saved.id, RecordKey::Assigned(1));
        assert_eq!(saved.feeling, 5);
        assert_eq!(store.saved.len(), 1);
    }

    #[tokio::test]
    async fn test_save_requires_completion() {
        let mut handle = handle();
        handle.start().await.unwrap();
        let mut store = FlakyStore { fail_next: false, saved: Vec::new() };
        assert!(matches!(
            handle.save(&mut store).await,
            Err(SessionError::NotCompleted { .. })
        ));
        assert!(store.saved.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_feeling() {
        let handle = handle();
        assert!(matches!(handle.set_feeling(0).await, Err(SessionError::InvalidFeeling(0))));
        assert!(matches!(handle.set_feeling(6).await, Err(SessionError::InvalidFeeling(6))));
    }
}
