//! Engine configuration.

use std::time::Duration;
use crate::SetValues;

/// Configuration for session initialization and the session clock.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Set synthesized for exercises that define no planned sets
    pub default_set: SetValues,
    /// Period of the elapsed-time tick
    pub tick_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_set: SetValues {
                reps: 10,
                weight: 0.0,
                duration: 0,
            },
            tick_interval: Duration::from_secs(1),
        }
    }
}
