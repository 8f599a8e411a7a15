//! Session lifecycle and exercise navigation.
//!
//! ```text
//! NotStarted --start--> InProgress --complete--> Completed
//!                        |      ^
//!                        +------+ advance_to_next_exercise
//! ```
//!
//! The state machine exposes mechanism only. Whether the user may move on
//! before finishing every set is decided by the caller through
//! [`Session::can_advance`].

use lift_core::Time;
use tracing::{debug, info};

use crate::error::{Result, SessionError};
use crate::{Session, SessionState};

impl Session {
    /// Start the session, stamping the session and its first exercise.
    ///
    /// The elapsed counter only advances from here on; the clock task itself
    /// is owned by [`crate::SessionHandle`].
    pub fn start(&mut self, now: Time) -> Result<()> {
        self.require_state("start", &[SessionState::NotStarted])?;
        if self.exercises.is_empty() {
            return Err(SessionError::EmptySession);
        }

        self.started_at = Some(now);
        self.exercises[0].started_at = Some(now);
        self.current_exercise_index = 0;
        self.state = SessionState::InProgress;

        info!(session = %self.id, routine = %self.routine.name, "session started");
        Ok(())
    }

    /// Close the current exercise and move to the next one.
    ///
    /// Does not consult the completion gate. Returns the new index, or
    /// [`SessionError::NoRemainingExercises`] without changing anything when
    /// already on the last exercise.
    pub fn advance_to_next_exercise(&mut self, now: Time) -> Result<usize> {
        self.require_state("advance", &[SessionState::InProgress])?;
        let current = self.current_exercise_index;
        let next = current + 1;
        if next >= self.exercises.len() {
            return Err(SessionError::NoRemainingExercises { index: current });
        }

        self.exercises[current].close(now);
        self.exercises[next].started_at = Some(now);
        self.current_exercise_index = next;

        debug!(session = %self.id, from = current, to = next, "advanced exercise");
        Ok(next)
    }

    /// Whether the user may move on: the current exercise is complete and
    /// another one follows.
    pub fn can_advance(&self) -> bool {
        self.state == SessionState::InProgress
            && self.current_exercise_index + 1 < self.exercises.len()
            && self
                .is_exercise_complete(self.current_exercise_index)
                .unwrap_or(false)
    }

    /// Whether the user is on the last exercise.
    pub fn is_last_exercise(&self) -> bool {
        self.current_exercise_index + 1 >= self.exercises.len()
    }

    /// Finish the session, early or not.
    ///
    /// Stamps the session end and closes the current exercise if still open.
    /// Sets left incomplete stay incomplete.
    pub fn complete(&mut self, now: Time) -> Result<()> {
        self.require_state("complete", &[SessionState::InProgress])?;

        self.ended_at = Some(now);
        let current = self.current_exercise_index;
        if let Some(exercise) = self.exercises.get_mut(current) {
            exercise.close(now);
        }
        self.state = SessionState::Completed;

        info!(
            session = %self.id,
            elapsed = self.elapsed_seconds,
            progress = self.session_progress_percent(),
            "session completed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::{Duration, Utc};
    use lift_core::{Exercise, RoutineTemplate};
    use super::*;

    fn routine() -> Arc<RoutineTemplate> {
        Arc::new(
            RoutineTemplate::new(1, "Full Body")
                .with_exercise(Exercise::new(1, "Squat").with_set(5, 100.0, 0).with_set(5, 100.0, 0), 120)
                .with_exercise(Exercise::new(2, "Row").with_set(8, 60.0, 0), 90)
                .with_exercise(Exercise::new(3, "Plank").with_set(0, 0.0, 60), 30),
        )
    }

    #[test]
    fn test_start_stamps_first_exercise() {
        let mut session = Session::new(routine());
        let now = Utc::now();
        session.start(now).unwrap();

        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.started_at(), Some(now));
        assert_eq!(session.exercises()[0].started_at(), Some(now));
        assert!(session.exercises()[1].started_at().is_none());
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut session = Session::new(routine());
        session.start(Utc::now()).unwrap();
        assert!(matches!(
            session.start(Utc::now()),
            Err(SessionError::InvalidState { operation: "start", .. })
        ));
    }

    #[test]
    fn test_empty_session_cannot_start() {
        let mut session = Session::new(Arc::new(RoutineTemplate::new(9, "Empty")));
        assert!(matches!(session.start(Utc::now()), Err(SessionError::EmptySession)));
        assert_eq!(session.state(), SessionState::NotStarted);
    }

    #[test]
    fn test_advance_stamps_both_exercises() {
        let mut session = Session::new(routine());
        let t0 = Utc::now();
        let t1 = t0 + Duration::seconds(90);
        session.start(t0).unwrap();

        assert_eq!(session.advance_to_next_exercise(t1).unwrap(), 1);
        assert_eq!(session.exercises()[0].ended_at(), Some(t1));
        assert_eq!(session.exercises()[1].started_at(), Some(t1));
        assert_eq!(session.current_exercise_index(), 1);
    }

    #[test]
    fn test_advance_stops_at_last_exercise() {
        let mut session = Session::new(routine());
        let t0 = Utc::now();
        session.start(t0).unwrap();
        session.advance_to_next_exercise(t0).unwrap();
        session.advance_to_next_exercise(t0).unwrap();

        let before = session.exercises().to_vec();
        assert!(matches!(
            session.advance_to_next_exercise(t0 + Duration::seconds(5)),
            Err(SessionError::NoRemainingExercises { index: 2 })
        ));
        assert_eq!(session.current_exercise_index(), 2);
        assert_eq!(session.exercises(), &before[..]);
    }

    #[test]
    fn test_double_advance_on_two_exercises_moves_once() {
        let routine = Arc::new(
            RoutineTemplate::new(1, "Pair")
                .with_exercise(Exercise::new(1, "A"), 0)
                .with_exercise(Exercise::new(2, "B"), 0),
        );
        let mut session = Session::new(routine);
        let now = Utc::now();
        session.start(now).unwrap();

        assert!(session.advance_to_next_exercise(now).is_ok());
        assert!(session.advance_to_next_exercise(now).is_err());
        assert_eq!(session.current_exercise_index(), 1);
    }

    #[test]
    fn test_close_does_not_overwrite() {
        let mut session = Session::new(routine());
        let t0 = Utc::now();
        let t1 = t0 + Duration::seconds(10);
        session.start(t0).unwrap();

        assert!(session.exercises[0].close(t0));
        assert!(!session.exercises[0].close(t1));
        session.advance_to_next_exercise(t1).unwrap();
        assert_eq!(session.exercises()[0].ended_at(), Some(t0));
    }

    #[test]
    fn test_advance_before_start_is_rejected() {
        let mut session = Session::new(routine());
        assert!(matches!(
            session.advance_to_next_exercise(Utc::now()),
            Err(SessionError::InvalidState { state: SessionState::NotStarted, .. })
        ));
    }

    #[test]
    fn test_can_advance_follows_gate() {
        let mut session = Session::new(routine());
        session.start(Utc::now()).unwrap();
        assert!(!session.can_advance());

        session.toggle_set_completed(0, 0).unwrap();
        assert!(!session.can_advance());
        session.toggle_set_completed(0, 1).unwrap();
        assert!(session.can_advance());

        session.advance_to_next_exercise(Utc::now()).unwrap();
        session.advance_to_next_exercise(Utc::now()).unwrap();
        session.toggle_set_completed(2, 0).unwrap();
        assert!(session.is_last_exercise());
        assert!(!session.can_advance());
    }

    #[test]
    fn test_early_complete() {
        let mut session = Session::new(routine());
        let t0 = Utc::now();
        let t1 = t0 + Duration::minutes(3);
        session.start(t0).unwrap();
        session.complete(t1).unwrap();

        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.ended_at(), Some(t1));
        assert_eq!(session.exercises()[0].ended_at(), Some(t1));
        assert!(session.exercises()[1].ended_at().is_none());
        assert_eq!(session.completed_set_count(), 0);
    }

    #[test]
    fn test_completed_is_terminal() {
        let mut session = Session::new(routine());
        session.start(Utc::now()).unwrap();
        session.complete(Utc::now()).unwrap();

        assert!(session.complete(Utc::now()).is_err());
        assert!(session.start(Utc::now()).is_err());
        assert!(session.advance_to_next_exercise(Utc::now()).is_err());
    }

    #[test]
    fn test_complete_keeps_closed_exercise() {
        let mut session = Session::new(routine());
        let t0 = Utc::now();
        session.start(t0).unwrap();
        session.exercises[0].close(t0);
        session.complete(t0 + Duration::seconds(30)).unwrap();
        assert_eq!(session.exercises()[0].ended_at(), Some(t0));
    }
}
