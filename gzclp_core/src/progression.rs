//! The GZCLP progression state machine.
//!
//! Per lift, the next attempt is a `(weight, rep scheme index)` pair that
//! moves after every completed attempt:
//! - success: same rep scheme, weight goes up by the lift's increment
//! - failure mid-cycle: same weight, next (harder-to-fail) rep scheme
//! - failure on the last scheme: back to the first scheme; T1/T2 deload the
//!   weight by a fixed factor rounded down to a loadable increment, T3 keeps
//!   its weight (it only has one scheme)
//!
//! Every transition logs the just-attempted pair to the lift's history first.
//! All transitions are total: a `Lift` always carries a valid tier and an
//! in-range rep scheme index.

use crate::config::ProgressionConfig;
use crate::schemes::round_down_to_increment;
use crate::{Lift, LiftOutcome, Tier};

/// Advance a lift after a successful attempt
///
/// The lift stays on the same rep scheme and simply gets heavier.
pub fn apply_success(lift: &mut Lift) {
    let attempt = lift.next_attempt;
    lift.previous_attempts.push(attempt);
    lift.next_attempt.weight = attempt.weight + lift.increment;

    tracing::debug!(
        "{} {}: success at {}kg, next attempt {}kg",
        lift.tier,
        lift.name,
        attempt.weight,
        lift.next_attempt.weight
    );
}

/// Advance a lift after a failed attempt
///
/// Failure is a soft demotion: the rep scheme cycles forward at the same
/// weight until the tier's cycle is exhausted, at which point the weight
/// itself is assumed too ambitious and is deloaded.
pub fn apply_failure(lift: &mut Lift, config: &ProgressionConfig) {
    let attempt = lift.next_attempt;
    let num_schemes = lift.tier.num_rep_schemes();
    let exhausted = attempt.rep_scheme_index == num_schemes - 1;

    let new_weight = if exhausted {
        match lift.tier {
            Tier::T1 => round_down_to_increment(
                attempt.weight * config.t1_deload_factor,
                config.smallest_increment,
            ),
            // Intentionally the same as T1; a T2-specific deload based on the
            // previous first-scheme attempt would need per-scheme history.
            Tier::T2 => round_down_to_increment(
                attempt.weight * config.t2_deload_factor,
                config.smallest_increment,
            ),
            Tier::T3 => attempt.weight,
        }
    } else {
        attempt.weight
    };

    lift.previous_attempts.push(attempt);
    lift.next_attempt.weight = new_weight;
    lift.next_attempt.rep_scheme_index = (attempt.rep_scheme_index + 1) % num_schemes;

    tracing::debug!(
        "{} {}: failure at {}kg (scheme {}), next attempt {}kg (scheme {})",
        lift.tier,
        lift.name,
        attempt.weight,
        attempt.rep_scheme_index,
        lift.next_attempt.weight,
        lift.next_attempt.rep_scheme_index
    );
}

/// Apply the transition matching a recorded outcome
pub fn apply_outcome(lift: &mut Lift, outcome: LiftOutcome, config: &ProgressionConfig) {
    match outcome {
        LiftOutcome::Success => apply_success(lift),
        LiftOutcome::Fail => apply_failure(lift, config),
    }
}
