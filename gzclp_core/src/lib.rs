#![forbid(unsafe_code)]

//! Core progression engine for the GZCLP linear-progression method.
//!
//! This crate provides:
//! - Domain types (tiers, lifts, sessions, program state)
//! - Fixed per-tier rep-scheme tables
//! - The success/failure progression state machine
//! - Session assembly and completion
//! - Persistence (atomic JSON state file) and CSV history export

pub mod types;
pub mod error;
pub mod schemes;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod progression;
pub mod engine;
pub mod state;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use schemes::{round_down_to_increment, RepScheme, SetTarget, INCREMENTS};
pub use catalog::DEFAULT_LIFTS;
pub use config::Config;
pub use progression::{apply_failure, apply_outcome, apply_success};
pub use engine::{ExercisePlan, ProgramEngine, SessionPlan};
pub use export::write_history_csv;
