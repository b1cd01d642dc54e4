//! Program state persistence with file locking.
//!
//! The whole `ProgramState` is the unit of persistence: serialized wholesale
//! to a single JSON document, restored wholesale. Saves are atomic (temp
//! file, fsync, rename) with exclusive locking to serialize concurrent
//! writers.

use crate::{Error, ProgramState, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl ProgramState {
    /// Serialize the entire program state to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a program state from its serialized form
    ///
    /// Rejects documents whose rep scheme indices fall outside the lift's
    /// tier cycle; every index in a restored state is safe to use directly.
    pub fn from_json(json: &str) -> Result<Self> {
        let state: Self = serde_json::from_str(json)?;
        state.check_scheme_indices()?;
        Ok(state)
    }

    fn check_scheme_indices(&self) -> Result<()> {
        for (id, lift) in &self.lifts {
            let bound = lift.tier.num_rep_schemes();
            let out_of_range = std::iter::once(&lift.next_attempt)
                .chain(&lift.previous_attempts)
                .any(|attempt| attempt.rep_scheme_index >= bound);
            if out_of_range {
                return Err(Error::State(format!(
                    "lift {} carries a rep scheme index outside its {} cycle",
                    id, lift.tier
                )));
            }
        }
        Ok(())
    }

    /// Load program state from a file with shared locking
    ///
    /// Returns `Ok(None)` if no state has been saved yet. Corrupt or
    /// unreadable data is an error for the caller to surface; silently
    /// falling back to defaults would discard the training history.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::info!("No state file at {:?}", path);
            return Ok(None);
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let read_result = {
            let mut reader = std::io::BufReader::new(&file);
            reader.read_to_string(&mut contents)
        };
        file.unlock()?;
        read_result?;

        let state = Self::from_json(&contents).map_err(|e| {
            Error::State(format!("corrupt state file {:?}: {}", path, e))
        })?;
        tracing::debug!("Loaded program state from {:?}", path);
        Ok(Some(state))
    }

    /// Save program state to a file with exclusive locking
    ///
    /// Atomically writes state by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "state path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = self.to_json()?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved program state to {:?}", path);
        Ok(())
    }

    /// Delete the saved state file, if any
    pub fn clear(path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => {
                tracing::info!("Deleted saved state at {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
