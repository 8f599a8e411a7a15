//! Session clock - the elapsed-seconds counter and the task that drives it.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::{Session, SessionState};

impl Session {
    /// Whole seconds counted while in progress.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Elapsed time as `H:MM:SS`, or `MM:SS` under an hour.
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    /// Count one second. Ignored unless the session is in progress.
    pub fn tick(&mut self) -> bool {
        if self.state != SessionState::InProgress {
            return false;
        }
        self.elapsed_seconds += 1;
        true
    }
}

/// Format whole seconds as `H:MM:SS`, or `MM:SS` under an hour.
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Cancellable periodic tick feeding a shared session.
///
/// Holds the only handle to the tick task. Stop it while holding the
/// session lock so no tick lands after the session leaves `InProgress`.
#[derive(Debug)]
pub struct SessionClock {
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl SessionClock {
    /// Create a stopped clock ticking every `period`.
    pub fn new(period: Duration) -> Self {
        Self { period, task: None }
    }

    /// Whether the tick task is scheduled.
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Spawn the tick task. No-op if already running.
    pub fn start(&mut self, session: Arc<Mutex<Session>>) {
        if self.task.is_some() {
            return;
        }
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                ticker.tick().await;
                if !session.lock().await.tick() {
                    break;
                }
            }
        }));
        debug!(period_ms = period.as_millis() as u64, "session clock started");
    }

    /// Cancel the tick task. No tick is applied after this returns.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("session clock stopped");
        }
    }
}

impl Drop for SessionClock {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use lift_core::{Exercise, RoutineTemplate};
    use super::*;

    fn session() -> Session {
        Session::new(Arc::new(
            RoutineTemplate::new(1, "Timed").with_exercise(Exercise::new(1, "Plank").with_set(0, 0.0, 60), 0),
        ))
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(125), "02:05");
        assert_eq!(format_elapsed(3599), "59:59");
        assert_eq!(format_elapsed(3600), "1:00:00");
        assert_eq!(format_elapsed(3725), "1:02:05");
    }

    #[test]
    fn test_tick_only_in_progress() {
        let mut session = session();
        assert!(!session.tick());
        assert_eq!(session.elapsed_seconds(), 0);

        session.start(chrono::Utc::now()).unwrap();
        for _ in 0..125 {
            assert!(session.tick());
        }
        assert_eq!(session.elapsed_seconds(), 125);
        assert_eq!(session.elapsed_display(), "02:05");

        session.complete(chrono::Utc::now()).unwrap();
        assert!(!session.tick());
        assert_eq!(session.elapsed_seconds(), 125);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_counts_and_freezes() {
        let shared = Arc::new(Mutex::new(session()));
        shared.lock().await.start(chrono::Utc::now()).unwrap();

        let mut clock = SessionClock::new(Duration::from_secs(1));
        clock.start(shared.clone());
        assert!(clock.is_running());

        tokio::time::sleep(Duration::from_millis(125_500)).await;
        {
            let mut session = shared.lock().await;
            assert_eq!(session.elapsed_seconds(), 125);
            assert_eq!(session.elapsed_display(), "02:05");
            clock.stop();
            session.complete(chrono::Utc::now()).unwrap();
        }
        assert!(!clock.is_running());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(shared.lock().await.elapsed_seconds(), 125);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_before_first_tick() {
        let shared = Arc::new(Mutex::new(session()));
        shared.lock().await.start(chrono::Utc::now()).unwrap();

        let mut clock = SessionClock::new(Duration::from_secs(1));
        clock.start(shared.clone());
        clock.stop();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(shared.lock().await.elapsed_seconds(), 0);
    }
}
