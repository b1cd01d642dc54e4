//! CSV export of completed-session history.
//!
//! Produces one row per lift result per completed session. The weight and
//! rep scheme for a row are recovered from the lift's attempt log: every
//! committed session appends exactly one attempt per recorded lift, so the
//! n-th result for a lift lines up with its n-th logged attempt.

use crate::{LiftId, ProgramState, Result};
use std::collections::HashMap;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    session: usize,
    completed_at: String,
    lift_id: u32,
    tier: Option<String>,
    name: Option<String>,
    weight: Option<f64>,
    scheme: Option<String>,
    outcome: &'static str,
}

/// Write the full completed-session history to a CSV file
///
/// Lifts that have since been removed from the program still appear by ID,
/// with the metadata columns left empty. Returns the number of rows written.
pub fn write_history_csv(state: &ProgramState, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    let mut attempt_counters: HashMap<LiftId, usize> = HashMap::new();
    let mut rows = 0;

    for (session_index, session) in state.completed_sessions.iter().enumerate() {
        for result in &session.results {
            let counter = attempt_counters.entry(result.lift_id).or_insert(0);
            let lift = state.lifts.get(&result.lift_id);
            let attempt = lift.and_then(|l| l.previous_attempts.get(*counter)).copied();
            *counter += 1;

            let scheme = lift.zip(attempt).map(|(l, a)| {
                let scheme = l.tier.rep_schemes()[a.rep_scheme_index];
                let last = scheme.last_set();
                format!(
                    "{}x{}{}",
                    scheme.num_sets(),
                    last.reps,
                    if last.amrap { "+" } else { "" }
                )
            });

            writer.serialize(CsvRow {
                session: session_index,
                completed_at: session.completed_at.to_rfc3339(),
                lift_id: result.lift_id.0,
                tier: lift.map(|l| l.tier.to_string()),
                name: lift.map(|l| l.name.clone()),
                weight: attempt.map(|a| a.weight),
                scheme,
                outcome: if result.outcome.is_success() {
                    "success"
                } else {
                    "fail"
                },
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    tracing::info!("Exported {} history rows to {:?}", rows, path);
    Ok(rows)
}
