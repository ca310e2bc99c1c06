//! Browser LocalStorage backend
//!
//! Stores the score as a plain integer string, so saves from older builds of
//! the game stay readable.

use web_sys::Storage;

use super::{HighScoreStore, StorageError, parse_score};
use crate::consts::SAVE_KEY_SCORE;

/// High score in `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?
            .local_storage()
            .ok()
            .flatten()
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
    }
}

impl HighScoreStore for LocalStore {
    fn load(&mut self) -> Result<u32, StorageError> {
        let raw = Self::storage()?
            .get_item(SAVE_KEY_SCORE)
            .map_err(|_| StorageError::Unavailable("read refused".into()))?;
        match raw {
            Some(raw) => parse_score(&raw),
            None => Ok(0),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(SAVE_KEY_SCORE, &score.to_string())
            .map_err(|_| StorageError::Unavailable("write refused".into()))
    }
}
