//! The progression engine: session assembly and completion.
//!
//! `ProgramEngine` owns the whole `ProgramState` and is the only thing that
//! mutates it. The surrounding shell reads the next-session view, reports
//! pass/fail per lift, and commits the workout through `complete_session`,
//! which is the sole point where lift progressions actually move.

use crate::config::ProgressionConfig;
use crate::progression::apply_outcome;
use crate::{
    CompletedSession, Error, LiftId, LiftOutcome, LiftResult, ProgramState, Result,
    StartingWeights, Tier,
};
use chrono::Utc;

/// Display-ready descriptor for one exercise in the upcoming session
#[derive(Clone, Debug, PartialEq)]
pub struct ExercisePlan {
    pub id: LiftId,
    pub tier: Tier,
    pub name: String,
    pub weight: f64,
    pub sets: usize,
    pub reps: u32,
    pub amrap: bool,
    pub rep_scheme_index: usize,
}

/// The next workout to perform: a rotation slot and its tier-sorted exercises
#[derive(Clone, Debug, PartialEq)]
pub struct SessionPlan {
    pub id: usize,
    pub name: String,
    /// 1-based session number for display
    pub day: usize,
    pub exercises: Vec<ExercisePlan>,
}

/// Owns program state and applies the GZCLP progression rules
pub struct ProgramEngine {
    state: ProgramState,
    progression: ProgressionConfig,
    /// Results buffered since the last commit, in attempt order
    pending: Vec<LiftResult>,
}

impl ProgramEngine {
    /// Wrap an existing program state
    pub fn new(state: ProgramState, progression: ProgressionConfig) -> Self {
        Self {
            state,
            progression,
            pending: Vec::new(),
        }
    }

    /// Start a fresh engine seeded with the default program
    pub fn with_default_program(progression: ProgressionConfig) -> Self {
        Self::new(ProgramState::seeded(), progression)
    }

    /// Read-only snapshot of the owned state
    pub fn state(&self) -> &ProgramState {
        &self.state
    }

    /// Give the state back, eg. for persistence
    pub fn into_state(self) -> ProgramState {
        self.state
    }

    /// Build the next session to perform
    ///
    /// Pure read: resolves the current rotation slot, sorts its lifts by
    /// tier, and derives sets/reps from each lift's tier and rep-scheme
    /// pointer. Safe to call repeatedly.
    pub fn next_session(&self) -> Result<SessionPlan> {
        let session_id = self.state.next_session_id;
        let session = self
            .state
            .sessions
            .get(session_id)
            .ok_or(Error::UnknownSession(session_id))?;

        let sorted_ids = self.state.sorted_lift_ids(&session.lift_ids)?;

        let mut exercises = Vec::with_capacity(sorted_ids.len());
        for id in sorted_ids {
            let lift = self.state.lift(id)?;
            let scheme = lift.tier.rep_schemes()[lift.next_attempt.rep_scheme_index];
            let last = scheme.last_set();

            exercises.push(ExercisePlan {
                id,
                tier: lift.tier,
                name: lift.name.clone(),
                weight: lift.next_attempt.weight,
                sets: scheme.num_sets(),
                reps: last.reps,
                amrap: last.amrap,
                rep_scheme_index: lift.next_attempt.rep_scheme_index,
            });
        }

        Ok(SessionPlan {
            id: session_id,
            name: session.name.clone(),
            day: session_id + 1,
            exercises,
        })
    }

    /// Buffer the outcome of one lift
    ///
    /// Does not touch the lift's persistent progression; nothing moves until
    /// `complete_session`. Recording the same lift again overwrites the
    /// earlier outcome.
    pub fn record_result(&mut self, lift_id: LiftId, success: bool) -> Result<()> {
        // Reject IDs the catalog has never heard of
        self.state.lift(lift_id)?;

        let outcome = if success {
            LiftOutcome::Success
        } else {
            LiftOutcome::Fail
        };

        if let Some(existing) = self.pending.iter_mut().find(|r| r.lift_id == lift_id) {
            existing.outcome = outcome;
        } else {
            self.pending.push(LiftResult { lift_id, outcome });
        }
        Ok(())
    }

    /// Results buffered since the last commit
    pub fn pending_results(&self) -> &[LiftResult] {
        &self.pending
    }

    /// Discard buffered results without committing them
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    /// Commit the session: the sole point where progressions advance
    ///
    /// Applies the success/failure transition to every recorded lift in
    /// order, appends an immutable `CompletedSession` record, advances the
    /// rotation pointer, and clears the buffer. Not idempotent: calling it
    /// twice double-advances. There is no rollback; if persistence fails
    /// afterwards the caller retries the save, not the transition.
    pub fn complete_session(&mut self) -> Result<&CompletedSession> {
        if self.pending.is_empty() {
            return Err(Error::State(
                "no lift results recorded for this session".into(),
            ));
        }

        let results = std::mem::take(&mut self.pending);
        for result in &results {
            let lift = self.state.lift_mut(result.lift_id)?;
            apply_outcome(lift, result.outcome, &self.progression);
        }

        self.state.completed_sessions.push(CompletedSession {
            completed_at: Utc::now(),
            results,
        });

        let num_sessions = self.state.sessions.len();
        self.state.next_session_id = (self.state.next_session_id + 1) % num_sessions;

        let record = self
            .state
            .completed_sessions
            .last()
            .expect("a record was just pushed");
        tracing::info!(
            "Completed session #{} with {} lifts; next up: {}",
            self.state.completed_sessions.len(),
            record.results.len(),
            self.state.sessions[self.state.next_session_id].name
        );
        Ok(record)
    }

    /// Add a new lift to the program (see [`ProgramState::add_lift`])
    pub fn add_lift(
        &mut self,
        tier: Tier,
        name: impl Into<String>,
        increment: f64,
        starting_weight: f64,
        session_ids: &[usize],
    ) -> Result<LiftId> {
        self.state
            .add_lift(tier, name, increment, starting_weight, session_ids)
    }

    /// Remove a lift and purge it from every session
    ///
    /// Any buffered result for the lift is dropped with it.
    pub fn remove_lift(&mut self, id: LiftId) -> Result<()> {
        self.state.remove_lift(id)?;
        self.pending.retain(|r| r.lift_id != id);
        Ok(())
    }

    /// Reset all program data to the seeded defaults
    pub fn reset(&mut self) {
        self.pending.clear();
        self.state.reset();
    }

    /// Personalize next-attempt weights for the five main movements
    pub fn set_starting_weights(&mut self, weights: &StartingWeights) {
        self.state.set_starting_weights(weights);
    }

    /// Mark first-run setup as finished
    pub fn complete_setup(&mut self) {
        self.state.complete_setup();
    }

    /// Formatted overview of current progress, one line per lift
    pub fn summary(&self) -> String {
        let mut output = String::new();
        for (id, lift) in &self.state.lifts {
            let scheme = lift.tier.rep_schemes()[lift.next_attempt.rep_scheme_index];
            let last = scheme.last_set();
            output.push_str(&format!(
                "[{}] {} {}x{}{}  {}kg  {}\n",
                id,
                lift.tier,
                scheme.num_sets(),
                last.reps,
                if last.amrap { "+" } else { "" },
                lift.next_attempt.weight,
                lift.name
            ));
        }
        output.push_str(&format!(
            "\nCompleted sessions: {}\n",
            self.state.completed_sessions.len()
        ));
        output
    }
}
