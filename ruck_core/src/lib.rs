#![forbid(unsafe_code)]

//! Core domain model and business logic for the rucking calorie
//! calculator.
//!
//! This crate provides:
//! - Domain types (workout input, estimate results, pace, saved workouts)
//! - The calorie estimator (validation, estimation, pace)
//! - Workout history persistence over an injectable slot
//! - CSV export
//! - Activity and food comparison tables

pub mod types;
pub mod error;
pub mod estimator;
pub mod comparison;
pub mod history;
pub mod export;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use estimator::{compute_pace, estimate, validate};
pub use history::{FileSlot, HistorySlot, HistoryStore, MemorySlot};
pub use export::{write_csv, write_csv_file};
pub use config::Config;
