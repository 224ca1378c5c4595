//! Hashing progress reporting.

use std::path::PathBuf;

/// Progress information during the hashing phase.
#[derive(Debug, Clone, Default)]
pub struct HashProgress {
    /// Candidate files hashed so far.
    pub files_hashed: u64,
    /// Total candidate files to hash.
    pub total_candidates: u64,
    /// Bytes hashed so far.
    pub bytes_hashed: u64,
    /// Most recently hashed file.
    pub current_file: PathBuf,
}

impl HashProgress {
    /// Fraction of candidates hashed, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total_candidates == 0 {
            1.0
        } else {
            self.files_hashed as f64 / self.total_candidates as f64
        }
    }

    /// Whether every candidate has been hashed.
    pub fn is_complete(&self) -> bool {
        self.files_hashed >= self.total_candidates
    }
}
