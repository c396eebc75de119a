use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{write_atomic, StoreError};

/// Durable bookkeeping of which chunk indices have been processed or failed,
/// plus aggregate counters.
///
/// Invariant: `processed_chunks` and `failed_chunks` are disjoint at all
/// times; a chunk that succeeds on retry leaves the failed set. Sets are
/// `BTreeSet` so the persisted document always carries sorted arrays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressState {
    #[serde(default)]
    pub total_chunks_in_book: usize,

    #[serde(default)]
    pub processed_chunks: BTreeSet<usize>,

    #[serde(default)]
    pub failed_chunks: BTreeSet<usize>,

    #[serde(default)]
    pub total_triplets_extracted: usize,

    #[serde(default)]
    pub total_input_tokens: u64,

    #[serde(default)]
    pub total_output_tokens: u64,

    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ProgressState {
    /// Load prior progress, degrading to the zero default when the document
    /// is missing or corrupt. Corruption must never crash a session.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!("could not read progress document: {e}; starting fresh");
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("could not parse progress document: {e}; starting fresh");
                Self::default()
            }
        }
    }

    /// Full atomic-as-possible rewrite of the progress document.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_atomic(path, &serde_json::to_string_pretty(self)?)
    }

    /// Fold one run's results into the state.
    ///
    /// Successes join `processed_chunks` and leave `failed_chunks`; new
    /// failures join `failed_chunks` unless a later success in the same run
    /// already claimed them.
    pub fn reconcile(&mut self, succeeded: &[usize], newly_failed: &[usize]) {
        for &index in succeeded {
            self.processed_chunks.insert(index);
            self.failed_chunks.remove(&index);
        }
        for &index in newly_failed {
            if !self.processed_chunks.contains(&index) {
                self.failed_chunks.insert(index);
            }
        }
        self.last_updated = Some(Utc::now());
    }

    pub fn add_token_usage(&mut self, input_tokens: u64, output_tokens: u64) {
        self.total_input_tokens += input_tokens;
        self.total_output_tokens += output_tokens;
    }

    /// Indices in `[start, end]` not yet processed, ascending, clamped to the
    /// book length. Empty when the book has no chunks.
    pub fn select_range(&self, start: usize, end: usize) -> Vec<usize> {
        if self.total_chunks_in_book == 0 {
            return Vec::new();
        }
        (start..=end.min(self.total_chunks_in_book - 1))
            .filter(|i| !self.processed_chunks.contains(i))
            .collect()
    }

    /// All not-yet-processed indices, ascending.
    pub fn select_remaining(&self) -> Vec<usize> {
        (0..self.total_chunks_in_book)
            .filter(|i| !self.processed_chunks.contains(i))
            .collect()
    }

    /// Exactly the currently failed indices, ascending.
    pub fn select_retry(&self) -> Vec<usize> {
        self.failed_chunks.iter().copied().collect()
    }

    pub fn percent_complete(&self) -> f64 {
        if self.total_chunks_in_book == 0 {
            return 0.0;
        }
        self.processed_chunks.len() as f64 / self.total_chunks_in_book as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconcile_keeps_sets_disjoint() {
        let mut state = ProgressState {
            total_chunks_in_book: 10,
            ..Default::default()
        };

        state.reconcile(&[0, 1, 2], &[3, 4]);
        state.reconcile(&[3], &[5]);
        state.reconcile(&[], &[1]); // a processed chunk cannot re-enter failed

        assert!(state.processed_chunks.is_disjoint(&state.failed_chunks));
        assert!(state.processed_chunks.contains(&3));
        assert!(!state.failed_chunks.contains(&3));
        assert!(!state.failed_chunks.contains(&1));
    }

    #[test]
    fn retry_moves_chunk_from_failed_to_processed() {
        let mut state = ProgressState {
            total_chunks_in_book: 10,
            ..Default::default()
        };

        // Run 1: chunk 7 fails.
        state.reconcile(&[], &[7]);
        assert_eq!(state.select_retry(), vec![7]);

        // Run 2: chunk 7 succeeds.
        state.reconcile(&[7], &[]);
        assert!(state.processed_chunks.contains(&7));
        assert!(!state.failed_chunks.contains(&7));
        assert!(state.select_retry().is_empty());
    }

    #[test]
    fn selection_policies_exclude_processed() {
        let mut state = ProgressState {
            total_chunks_in_book: 6,
            ..Default::default()
        };
        state.reconcile(&[1, 3], &[4]);

        assert_eq!(state.select_range(0, 3), vec![0, 2]);
        assert_eq!(state.select_remaining(), vec![0, 2, 4, 5]);
        assert_eq!(state.select_retry(), vec![4]);
    }

    #[test]
    fn select_range_clamps_to_book_length() {
        let state = ProgressState {
            total_chunks_in_book: 3,
            ..Default::default()
        };
        assert_eq!(state.select_range(1, 99), vec![1, 2]);
    }

    #[test]
    fn select_range_on_empty_book_is_empty() {
        let state = ProgressState::default();
        assert!(state.select_range(0, 5).is_empty());
        assert!(state.select_range(0, 0).is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress_stats.json");

        let mut state = ProgressState {
            total_chunks_in_book: 42,
            ..Default::default()
        };
        state.reconcile(&[0, 5, 9], &[2]);
        state.add_token_usage(1200, 340);
        state.total_triplets_extracted = 17;
        state.save(&path).unwrap();

        let loaded = ProgressState::load(&path);
        assert_eq!(loaded.total_chunks_in_book, 42);
        assert_eq!(loaded.processed_chunks, state.processed_chunks);
        assert_eq!(loaded.failed_chunks, state.failed_chunks);
        assert_eq!(loaded.total_input_tokens, 1200);
        assert_eq!(loaded.total_triplets_extracted, 17);
    }

    #[test]
    fn corrupt_document_degrades_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress_stats.json");
        std::fs::write(&path, "{not json at all").unwrap();

        let state = ProgressState::load(&path);
        assert_eq!(state.total_chunks_in_book, 0);
        assert!(state.processed_chunks.is_empty());
    }

    #[test]
    fn missing_document_is_the_zero_default() {
        let state = ProgressState::load(Path::new("does/not/exist.json"));
        assert!(state.processed_chunks.is_empty());
        assert!(state.last_updated.is_none());
    }

    #[test]
    fn percent_complete_handles_empty_book() {
        let state = ProgressState::default();
        assert_eq!(state.percent_complete(), 0.0);
    }
}
