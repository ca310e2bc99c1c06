//! High score persistence
//!
//! The simulation only sees [`HighScoreStore`]. Backends:
//! - `MemoryStore`: tests and headless runs
//! - `FileStore` (native): small JSON document, written via tmp + rename
//! - `LocalStore` (wasm): browser LocalStorage under the classic key
//!
//! Storage failures never stop the game: [`load_or_default`] and
//! [`save_or_warn`] log and carry on.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

use thiserror::Error;

/// Errors from a high score backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage io failed")]
    Io(#[from] std::io::Error),
    #[error("malformed high score document")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("corrupt high score value: {0:?}")]
    Corrupt(String),
}

/// Durable storage for the single best score
pub trait HighScoreStore {
    /// Stored high score, 0 when nothing has been saved yet
    fn load(&mut self) -> Result<u32, StorageError>;
    fn save(&mut self, score: u32) -> Result<(), StorageError>;
}

/// In-memory store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub value: Option<u32>,
    /// Number of successful saves
    pub saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self {
            value: Some(score),
            saves: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u32, StorageError> {
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}

/// Load the high score, treating any failure as "no score yet"
pub fn load_or_default(store: &mut dyn HighScoreStore) -> u32 {
    match store.load() {
        Ok(score) => score,
        Err(e) => {
            log::warn!("High score unavailable, starting from 0: {e}");
            0
        }
    }
}

/// Save the high score, logging instead of failing
pub fn save_or_warn(store: &mut dyn HighScoreStore, score: u32) {
    match store.save(score) {
        Ok(()) => log::info!("High score {score} saved"),
        Err(e) => log::warn!("Failed to save high score {score}: {e}"),
    }
}

/// Parse a stored score string. Surrounding whitespace is tolerated.
pub fn parse_score(raw: &str) -> Result<u32, StorageError> {
    raw.trim()
        .parse()
        .map_err(|_| StorageError::Corrupt(raw.to_string()))
}
