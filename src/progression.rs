//! The player's saved profile.

use crate::errors::{ProgressionError, ProgressionResult};
use crate::trainer::Trainer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

#[derive(Serialize, Deserialize, Debug)]
pub struct Progression {
    pub profile: Trainer,
}

impl Progression {
    pub fn new(profile: Trainer) -> Self {
        Self { profile }
    }

    /// Read a saved progression. `None` when nothing has been saved yet.
    pub fn load(path: impl AsRef<Path>) -> ProgressionResult<Option<Self>> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no save file");
                return Ok(None);
            }
            Err(error) => return Err(error.into()),
        };

        let progression: Progression = serde_json::from_str(&content)?;
        progression.validate()?;
        info!(path = %path.display(), trainer = %progression.profile.name, "progression loaded");
        Ok(Some(progression))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ProgressionResult<()> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "progression saved");
        Ok(())
    }

    /// Delete the save file, if there is one.
    pub fn remove(path: impl AsRef<Path>) -> ProgressionResult<()> {
        match fs::remove_file(path) {
            Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error.into()),
            _ => Ok(()),
        }
    }

    fn validate(&self) -> ProgressionResult<()> {
        if self.profile.name.trim().is_empty() {
            return Err(ProgressionError::InvalidProfile("the trainer has no name".to_string()));
        }
        if self.profile.pokemon.is_empty() {
            return Err(ProgressionError::InvalidProfile(format!(
                "{} has no pokemon",
                self.profile.name
            )));
        }
        Ok(())
    }
}
