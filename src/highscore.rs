//! High-score persistence seam and the commit policy in front of it.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::HIGH_SCORE_CEILING;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("failed to write high score to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Black-box storage for the best score.
pub trait HighScoreStore {
    fn read(&self) -> u32;
    fn commit(&mut self, value: u32) -> Result<(), HighScoreError>;
}

/// Parses a stored score; anything that is not a plain decimal number counts as zero.
pub fn parse_stored(contents: &str) -> u32 {
    let trimmed = contents.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    trimmed.parse().unwrap_or(0)
}

// ── File store ────────────────────────────────────────────────────────────────

/// Plain-text file holding a single decimal number.
#[derive(Debug)]
pub struct FileHighScore {
    path: PathBuf,
    value: u32,
}

impl FileHighScore {
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".cosmic_conflict_score")
    }

    /// Loads the stored score, creating an empty file when none exists.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let value = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let value = parse_stored(&contents);
                if value == 0 && !contents.trim().is_empty() {
                    tracing::warn!(
                        path = %path.display(),
                        "corrupt high score, starting from zero"
                    );
                }
                value
            }
            Err(_) => {
                if let Err(err) = std::fs::write(&path, "") {
                    tracing::warn!(path = %path.display(), "cannot create high score file: {err}");
                }
                0
            }
        };
        Self { path, value }
    }
}

impl HighScoreStore for FileHighScore {
    fn read(&self) -> u32 {
        self.value
    }

    fn commit(&mut self, value: u32) -> Result<(), HighScoreError> {
        std::fs::write(&self.path, value.to_string()).map_err(|source| HighScoreError::Write {
            path: self.path.display().to_string(),
            source,
        })?;
        self.value = value;
        Ok(())
    }
}

// ── In-memory store ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryHighScore {
    pub value: u32,
    /// Number of successful commits, handy for asserting commit frequency.
    pub commits: u32,
}

impl HighScoreStore for MemoryHighScore {
    fn read(&self) -> u32 {
        self.value
    }

    fn commit(&mut self, value: u32) -> Result<(), HighScoreError> {
        self.value = value;
        self.commits += 1;
        Ok(())
    }
}

// ── Policy ────────────────────────────────────────────────────────────────────

/// Holds the best score seen and forwards improvements to the store.
pub struct HighScore {
    store: Box<dyn HighScoreStore>,
    best: u32,
}

impl HighScore {
    pub fn new(store: Box<dyn HighScoreStore>) -> Self {
        let best = store.read();
        Self { store, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Value currently held by the backing store.
    pub fn stored(&self) -> u32 {
        self.store.read()
    }

    /// Commits `score` when it beats the best and stays under the ceiling.
    /// Returns whether a new best was recorded.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best || score >= HIGH_SCORE_CEILING {
            return false;
        }
        if let Err(err) = self.store.commit(score) {
            tracing::warn!("high score not persisted: {err}");
        }
        self.best = score;
        tracing::debug!(score, "new high score");
        true
    }
}

impl std::fmt::Debug for HighScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScore").field("best", &self.best).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_values_read_as_zero() {
        assert_eq!(parse_stored("123\n"), 123);
        assert_eq!(parse_stored("12a"), 0);
        assert_eq!(parse_stored("-5"), 0);
        assert_eq!(parse_stored(""), 0);
        assert_eq!(parse_stored("99999999999999"), 0);
    }

    #[test]
    fn file_store_round_trips_through_disk() {
        let path = std::env::temp_dir().join(format!("cc_hs_{}", std::process::id()));
        std::fs::write(&path, "garbage").expect("write fixture");
        let mut store = FileHighScore::open(&path);
        assert_eq!(store.read(), 0);
        store.commit(42).expect("commit");
        assert_eq!(FileHighScore::open(&path).read(), 42);
        let _ = std::fs::remove_file(&path);
    }
}
