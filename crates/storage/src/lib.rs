//! Storage abstraction and implementations for lift.
//!
//! This crate provides the routine provider and workout store interfaces
//! the session engine talks to, with a JSON file reference implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;

pub use trait_::{RoutineProvider, WorkoutStore, StorageError, Result};
pub use json_storage::JsonStorage;
