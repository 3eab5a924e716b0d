//! Persisted score log
//!
//! Plain text, one integer score per line, appended when a session ends.
//! The high score is the maximum of every line that parses.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{PersistenceError, Result};

/// Default score log location (working directory)
pub const DEFAULT_SCORE_FILE: &str = "scores.txt";

/// Somewhere finished-session scores go
pub trait ScoreStore {
    /// Record a final score. Failures are dropped.
    fn append(&mut self, score: i64);

    /// Best recorded score, 0 when nothing is recorded
    fn high_score(&self) -> i64;
}

/// Max over all lines that parse as integers; blank and malformed lines are skipped
pub fn parse_high_score(text: &str) -> i64 {
    text.lines()
        .filter_map(|line| line.trim().parse::<i64>().ok())
        .max()
        .unwrap_or(0)
}

/// File-backed, append-only score log
#[derive(Debug, Clone)]
pub struct ScoreLog {
    path: PathBuf,
}

impl ScoreLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append, reporting the failure
    pub fn try_append(&self, score: i64) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| PersistenceError::io(&self.path, e))?;
        writeln!(file, "{score}").map_err(|e| PersistenceError::io(&self.path, e))
    }

    /// Read the high score, reporting the failure
    pub fn try_high_score(&self) -> Result<i64> {
        let text =
            std::fs::read_to_string(&self.path).map_err(|e| PersistenceError::io(&self.path, e))?;
        Ok(parse_high_score(&text))
    }
}

impl ScoreStore for ScoreLog {
    fn append(&mut self, score: i64) {
        match self.try_append(score) {
            Ok(()) => log::info!("Score {} saved to {}", score, self.path.display()),
            Err(e) => log::warn!("Score not saved: {e}"),
        }
    }

    fn high_score(&self) -> i64 {
        match self.try_high_score() {
            Ok(score) => score,
            Err(e) if e.is_not_found() => 0,
            Err(e) => {
                log::warn!("Could not read score log: {e}");
                0
            }
        }
    }
}

/// In-memory score store
#[derive(Debug, Clone, Default)]
pub struct MemoryScores {
    pub scores: Vec<i64>,
}

impl ScoreStore for MemoryScores {
    fn append(&mut self, score: i64) {
        self.scores.push(score);
    }

    fn high_score(&self) -> i64 {
        self.scores.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn temp_log(name: &str) -> ScoreLog {
        let path = std::env::temp_dir().join(format!(
            "space_siege_{}_{}.txt",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        ScoreLog::new(path)
    }

    #[test]
    fn test_parse_empty_is_zero() {
        assert_eq!(parse_high_score(""), 0);
        assert_eq!(parse_high_score("\n\n"), 0);
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        assert_eq!(parse_high_score("10\nabc\n30\n"), 30);
        assert_eq!(parse_high_score(" 40 \n7x\n"), 40);
    }

    #[test]
    fn test_missing_file_high_score_zero() {
        let log = temp_log("missing");
        assert_eq!(log.high_score(), 0);
    }

    #[test]
    fn test_append_then_high_score() {
        let mut log = temp_log("append");
        log.append(20);
        log.append(70);
        log.append(40);
        assert_eq!(log.high_score(), 70);

        let text = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(text, "20\n70\n40\n");
        let _ = std::fs::remove_file(log.path());
    }

    #[test]
    fn test_unwritable_path_is_dropped() {
        let dir = std::env::temp_dir();
        // A directory can't be opened for append
        let mut log = ScoreLog::new(&dir);
        log.append(10);
        assert!(log.try_append(10).is_err());
    }

    proptest! {
        #[test]
        fn prop_high_score_after_append_is_max(
            existing in proptest::collection::vec(0i64..10_000, 0..20),
            score in 0i64..10_000,
        ) {
            let mut store = MemoryScores { scores: existing };
            let before = store.high_score();
            store.append(score);
            prop_assert_eq!(store.high_score(), before.max(score));
        }
    }
}
