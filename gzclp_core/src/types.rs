//! Core domain types for the GZCLP progression engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Tiers and lifts
//! - Attempts and rep-scheme pointers
//! - Sessions and the fixed A1/B1/A2/B2 rotation
//! - Completed-session history
//! - The root `ProgramState` aggregate (the unit of persistence)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Tiers
// ============================================================================

/// Exercise tier (T1 primary, T2 secondary, T3 isolation)
///
/// Each tier carries its own fixed cycle of rep schemes. The derived `Ord`
/// gives the display ordering T1 < T2 < T3.
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Tier {
    T1,
    T2,
    T3,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::T1 => write!(f, "T1"),
            Tier::T2 => write!(f, "T2"),
            Tier::T3 => write!(f, "T3"),
        }
    }
}

// ============================================================================
// Lift Types
// ============================================================================

/// Unique, stable lift identifier
///
/// Allocated from a monotonic counter in `ProgramState`; never reused, even
/// after the lift is removed from the program.
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(transparent)]
pub struct LiftId(pub u32);

impl fmt::Display for LiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single attempt at a lift: the weight and rep scheme that were targeted
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub weight: f64,
    pub rep_scheme_index: usize,
}

/// A tracked exercise belonging to exactly one tier
///
/// `next_attempt` is the mutable pointer to what should be attempted next;
/// `previous_attempts` is the append-only log of everything already attempted,
/// one entry per completed session that included this lift.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lift {
    pub tier: Tier,
    pub name: String,
    pub increment: f64,
    pub next_attempt: Attempt,
    pub previous_attempts: Vec<Attempt>,
}

impl Lift {
    /// Create a fresh lift starting at the given weight on the tier's first
    /// rep scheme, with no attempt history.
    pub fn new(tier: Tier, name: impl Into<String>, increment: f64, weight: f64) -> Self {
        Self {
            tier,
            name: name.into(),
            increment,
            next_attempt: Attempt {
                weight,
                rep_scheme_index: 0,
            },
            previous_attempts: Vec::new(),
        }
    }
}

// ============================================================================
// Session Types
// ============================================================================

/// One rotation slot (A1/B1/A2/B2) bundling the lifts performed together
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub name: String,
    pub lift_ids: Vec<LiftId>,
}

/// Outcome of one lift within a completed session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LiftOutcome {
    Success,
    Fail,
}

impl LiftOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, LiftOutcome::Success)
    }
}

/// One lift's result within a completed session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiftResult {
    pub lift_id: LiftId,
    pub outcome: LiftOutcome,
}

/// Immutable record of one finished workout
///
/// `results` preserves the order in which lifts were attempted. The position
/// of this record in `ProgramState::completed_sessions` doubles as the
/// session number.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSession {
    pub completed_at: DateTime<Utc>,
    pub results: Vec<LiftResult>,
}

// ============================================================================
// Program State
// ============================================================================

/// The root aggregate: everything the program knows, serialized wholesale
///
/// Owned and mutated exclusively by [`ProgramEngine`](crate::ProgramEngine);
/// the shell only reads snapshots and calls mutation entry points.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramState {
    pub lifts: BTreeMap<LiftId, Lift>,
    pub next_lift_id: LiftId,
    pub sessions: Vec<Session>,
    pub next_session_id: usize,
    pub completed_sessions: Vec<CompletedSession>,
    pub is_first_time: bool,
    pub setup_complete: bool,
}

impl Default for ProgramState {
    /// An empty program: four empty rotation slots, no lifts, no history.
    fn default() -> Self {
        Self {
            lifts: BTreeMap::new(),
            next_lift_id: LiftId(0),
            sessions: default_sessions(),
            next_session_id: 0,
            completed_sessions: Vec::new(),
            is_first_time: true,
            setup_complete: false,
        }
    }
}

/// The four fixed rotation slots, in rotation order
pub fn default_sessions() -> Vec<Session> {
    ["A1", "B1", "A2", "B2"]
        .iter()
        .map(|name| Session {
            name: (*name).to_string(),
            lift_ids: Vec::new(),
        })
        .collect()
}

// ============================================================================
// Starting Weights
// ============================================================================

/// Default starting-weight set used to personalize the seeded catalog
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StartingWeights {
    pub squat: f64,
    pub bench: f64,
    pub deadlift: f64,
    pub overhead_press: f64,
    pub row: f64,
}

impl Default for StartingWeights {
    fn default() -> Self {
        Self {
            squat: 20.0,
            bench: 20.0,
            deadlift: 20.0,
            overhead_press: 20.0,
            row: 20.0,
        }
    }
}
