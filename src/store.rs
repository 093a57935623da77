//! Persistence for the last participant list, so a reopened session starts from
//! the same names. One fixed key, one JSON file; nothing else is remembered.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::store::{DEFAULT_STORE_DIR, LAST_DRAW_KEY};
use crate::errors::SiftError;

/// File-backed store for the `lastDraw` participant list.
#[derive(Clone, Debug)]
pub struct LastDrawStore {
    path: PathBuf,
}

impl LastDrawStore {
    /// Store rooted at `dir`; the list lives in `<dir>/lastDraw.json`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{LAST_DRAW_KEY}.json")),
        }
    }

    /// Store rooted at the default store directory.
    pub fn open_default() -> Self {
        Self::new(DEFAULT_STORE_DIR)
    }

    /// Load the remembered list; a missing file is an empty list, not an error.
    pub fn load(&self) -> Result<Vec<String>, SiftError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)?;
        serde_json::from_str(&text)
            .map_err(|err| SiftError::Store(format!("corrupt participant list: {err}")))
    }

    /// Replace the remembered list wholesale.
    pub fn save(&self, participants: &[String]) -> Result<(), SiftError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string(participants)
            .map_err(|err| SiftError::Store(format!("unencodable participant list: {err}")))?;
        fs::write(&self.path, text)?;
        debug!(
            "[numsift:store] saved {} participants to {}",
            participants.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Remove one participant by position and persist the shortened list.
    /// An out-of-range index leaves the list unchanged.
    pub fn remove(&self, index: usize) -> Result<Vec<String>, SiftError> {
        let mut participants = self.load()?;
        if index < participants.len() {
            participants.remove(index);
            self.save(&participants)?;
        }
        Ok(participants)
    }

    /// Forget the remembered list entirely.
    pub fn clear(&self) -> Result<(), SiftError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
