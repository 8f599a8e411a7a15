//! Workout History
//!
//! Statistics and per-routine history over recorded workouts.

#![warn(missing_docs)]

pub mod tracker;
pub mod stats;

pub use tracker::{HistoryTracker, HistorySnapshot, BasicHistoryTracker};
pub use stats::{WorkoutStats, Frequency, RECENT_WORKOUTS};
