//! Workout Session Engine
//!
//! Expands a routine into a live session, tracks set completion, walks the
//! user through exercises, counts elapsed time and folds the finished
//! session into a record graph for persistence.

#![warn(missing_docs)]

mod session;
mod initializer;
mod progress;
mod navigation;
mod record;
mod snapshot;

pub mod clock;
pub mod config;
pub mod error;
pub mod handle;

pub use session::{Session, SessionExercise, SessionSet, SessionState, SetValues};
pub use initializer::SessionInitializer;
pub use snapshot::{ExerciseView, SessionSnapshot, SetView};
pub use clock::{format_elapsed, SessionClock};
pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use handle::SessionHandle;
