//! Lift catalog and session-membership management.
//!
//! CRUD over lifts and their assignment to the four rotation slots, plus the
//! hardcoded default program used on first run or explicit reset.

use crate::{Error, Lift, LiftId, ProgramState, Result, StartingWeights, Tier};

/// The default GZCLP program: 10 lifts distributed across the 4 sessions.
///
/// Each entry is (tier, name, increment, starting weight, sessions).
pub const DEFAULT_LIFTS: &[(Tier, &str, f64, f64, &[usize])] = &[
    (Tier::T1, "Squat", 5.0, 20.0, &[0]),
    (Tier::T1, "Deadlift", 5.0, 20.0, &[3]),
    (Tier::T1, "Bench Press", 2.5, 20.0, &[2]),
    (Tier::T1, "Overhead Press", 2.5, 20.0, &[1]),
    (Tier::T2, "Squat", 2.5, 20.0, &[2]),
    (Tier::T2, "Deadlift", 2.5, 20.0, &[1]),
    (Tier::T2, "Bench Press", 2.5, 20.0, &[0]),
    (Tier::T2, "Overhead Press", 2.5, 20.0, &[3]),
    (Tier::T3, "Lat Pulldown", 5.0, 20.0, &[0, 2]),
    (Tier::T3, "Dumbbell Row", 5.0, 20.0, &[1, 3]),
];

impl ProgramState {
    /// A fresh program seeded with the default lift catalog
    pub fn seeded() -> Self {
        let mut state = Self::default();
        for (tier, name, increment, weight, sessions) in DEFAULT_LIFTS {
            // Session indices in the default table are always in range
            state
                .add_lift(*tier, *name, *increment, *weight, sessions)
                .expect("default catalog references a valid session");
        }
        state
    }

    /// Reset all program data to the seeded defaults
    pub fn reset(&mut self) {
        *self = Self::seeded();
        tracing::info!("Program state reset to defaults");
    }

    /// Add a new lift to the program
    ///
    /// Allocates the next unique lift ID (monotonic, never recycled),
    /// constructs the lift on its tier's first rep scheme with an empty
    /// attempt history, and inserts its ID into each listed session.
    pub fn add_lift(
        &mut self,
        tier: Tier,
        name: impl Into<String>,
        increment: f64,
        starting_weight: f64,
        session_ids: &[usize],
    ) -> Result<LiftId> {
        for &session_id in session_ids {
            if session_id >= self.sessions.len() {
                return Err(Error::UnknownSession(session_id));
            }
        }

        let id = self.next_lift_id;
        let lift = Lift::new(tier, name, increment, starting_weight);
        tracing::debug!("Adding lift {} ({} {})", id, lift.tier, lift.name);

        self.lifts.insert(id, lift);
        for &session_id in session_ids {
            self.sessions[session_id].lift_ids.push(id);
        }
        self.next_lift_id = LiftId(id.0 + 1);

        Ok(id)
    }

    /// Remove a lift from the catalog and purge its ID from every session
    ///
    /// Absence from a given session is not an error; absence from the catalog
    /// itself is.
    pub fn remove_lift(&mut self, id: LiftId) -> Result<()> {
        if self.lifts.remove(&id).is_none() {
            return Err(Error::UnknownLift(id));
        }
        for session in &mut self.sessions {
            session.lift_ids.retain(|lift_id| *lift_id != id);
        }
        tracing::debug!("Removed lift {}", id);
        Ok(())
    }

    /// Look up a lift by ID
    pub fn lift(&self, id: LiftId) -> Result<&Lift> {
        self.lifts.get(&id).ok_or(Error::UnknownLift(id))
    }

    pub(crate) fn lift_mut(&mut self, id: LiftId) -> Result<&mut Lift> {
        self.lifts.get_mut(&id).ok_or(Error::UnknownLift(id))
    }

    /// All lift IDs belonging to the given tier, in ID order
    pub fn lift_ids_in_tier(&self, tier: Tier) -> Vec<LiftId> {
        self.lifts
            .iter()
            .filter(|(_, lift)| lift.tier == tier)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Sort lift IDs for display: T1 first, then T2, then T3
    ///
    /// The sort is stable, so IDs within the same tier keep their relative
    /// input order. Any ID not present in the catalog is rejected.
    pub fn sorted_lift_ids(&self, ids: &[LiftId]) -> Result<Vec<LiftId>> {
        let mut keyed = Vec::with_capacity(ids.len());
        for &id in ids {
            keyed.push((self.lift(id)?.tier, id));
        }
        keyed.sort_by_key(|(tier, _)| *tier);
        Ok(keyed.into_iter().map(|(_, id)| id).collect())
    }

    /// Personalize next-attempt weights for the five main movements
    ///
    /// Matches catalog lifts by name, so it applies to both the T1 and T2
    /// variant of each movement.
    pub fn set_starting_weights(&mut self, weights: &StartingWeights) {
        for lift in self.lifts.values_mut() {
            let name = lift.name.to_lowercase();
            let weight = if name.contains("squat") {
                Some(weights.squat)
            } else if name.contains("bench") {
                Some(weights.bench)
            } else if name.contains("deadlift") {
                Some(weights.deadlift)
            } else if name.contains("overhead") || name.contains("press") {
                Some(weights.overhead_press)
            } else if name.contains("row") {
                Some(weights.row)
            } else {
                None
            };

            if let Some(weight) = weight {
                lift.next_attempt.weight = weight;
            }
        }
    }

    /// Mark first-run setup as finished
    pub fn complete_setup(&mut self) {
        self.setup_complete = true;
        self.is_first_time = false;
    }

    /// Name of a rotation slot
    pub fn session_name(&self, session_id: usize) -> Result<&str> {
        self.sessions
            .get(session_id)
            .map(|s| s.name.as_str())
            .ok_or(Error::UnknownSession(session_id))
    }
}
