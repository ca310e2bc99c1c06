//! JSON file backend for native builds

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{HighScoreStore, StorageError};

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    high_score: u32,
}

/// High score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for FileStore {
    fn load(&mut self) -> Result<u32, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let doc: Document = serde_json::from_str(&json)?;
        Ok(doc.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&Document { high_score: score })?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("High score {score} saved to {}", self.path.display());
        Ok(())
    }
}
