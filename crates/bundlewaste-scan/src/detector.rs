//! Duplicate file detection using content hashing.
//!
//! Two-phase algorithm:
//! 1. Bucket files by exact size during a single-threaded walk
//! 2. Hash only files in buckets of two or more, in parallel
//!
//! Hash results flow into a sharded concurrent map keyed by
//! `(size, hash)`, so workers only contend on the shard they insert into.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use rayon::prelude::*;
use tokio::sync::broadcast;
use tracing::{debug, info};

use bundlewaste_core::{ContentHash, DetectConfig, DetectError, DuplicateSet};

use crate::hasher::hash_file;
use crate::progress::HashProgress;
use crate::walker::{WalkedFile, bucket_by_size};

/// Progress is broadcast every this many hashed files.
const PROGRESS_INTERVAL: u64 = 256;

/// Results of one duplicate-detection pass.
#[derive(Debug, Clone, Default)]
pub struct DuplicateReport {
    /// Duplicate sets, sorted by wasted space descending.
    pub sets: Vec<DuplicateSet>,
    /// Regular files seen during the walk.
    pub files_walked: u64,
    /// Files that shared a size with another file and were hashed.
    pub files_hashed: u64,
    /// Walk entries skipped because they could not be read.
    pub skipped_entries: u64,
    /// Block-aligned size of every walked file.
    pub total_size: u64,
    /// Sum of `wasted_size` over all sets.
    pub total_wasted: u64,
    /// Wall-clock time of the pass.
    pub duration: Duration,
}

impl DuplicateReport {
    /// Check if any duplicates were found.
    pub fn has_duplicates(&self) -> bool {
        !self.sets.is_empty()
    }

    /// Total number of files across all sets.
    pub fn total_duplicate_files(&self) -> usize {
        self.sets.iter().map(|s| s.count).sum()
    }
}

/// Finds byte-identical files below a root directory.
pub struct DuplicateDetector {
    config: DetectConfig,
    progress_tx: broadcast::Sender<HashProgress>,
}

impl DuplicateDetector {
    /// Create a detector with default config.
    pub fn new() -> Self {
        Self::with_config(DetectConfig::default())
    }

    /// Create a detector with custom config.
    pub fn with_config(config: DetectConfig) -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self {
            config,
            progress_tx,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Subscribe to hashing progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<HashProgress> {
        self.progress_tx.subscribe()
    }

    /// Find duplicates below `root`.
    ///
    /// Any read failure while hashing aborts the pass: a partial hash map
    /// could report real duplicates as unique.
    pub fn detect(&self, root: impl AsRef<Path>) -> Result<DuplicateReport, DetectError> {
        let start = Instant::now();
        self.config.validate()?;

        let root = root.as_ref();
        let root_path = root.canonicalize().map_err(|e| DetectError::io(root, e))?;
        if !root_path.is_dir() {
            return Err(DetectError::NotADirectory { path: root_path });
        }

        let excludes = self.config.exclude_set()?;
        let disk = self.config.disk_model();

        // Phase 1: size buckets
        let buckets = bucket_by_size(&root_path, &self.config, &excludes, &disk);
        let files_walked = buckets.files_walked;
        let skipped_entries = buckets.skipped_entries;
        let total_size = buckets.total_size;
        let candidates = buckets.into_candidates();
        let files_hashed = candidates.len() as u64;

        // Phase 2: parallel hashing
        let groups = self.hash_candidates(&candidates)?;

        // Phase 3: assembly
        let mut sets: Vec<DuplicateSet> = groups
            .into_iter()
            .filter(|(_, files)| files.len() >= 2)
            .map(|((size, hash), mut files)| {
                files.sort();
                DuplicateSet::new(hash.to_hex(), disk.aligned_size(size), files)
            })
            .collect();

        sets.sort_by(|a, b| {
            b.wasted_size
                .cmp(&a.wasted_size)
                .then_with(|| a.content_hash.cmp(&b.content_hash))
        });

        let total_wasted = sets.iter().map(|s| s.wasted_size).sum();
        let duration = start.elapsed();

        info!(
            root = %root_path.display(),
            files = files_walked,
            hashed = files_hashed,
            sets = sets.len(),
            wasted = total_wasted,
            elapsed_ms = duration.as_millis() as u64,
            "duplicate detection complete"
        );

        Ok(DuplicateReport {
            sets,
            files_walked,
            files_hashed,
            skipped_entries,
            total_size,
            total_wasted,
            duration,
        })
    }

    /// Hash every candidate on the worker pool.
    fn hash_candidates(
        &self,
        candidates: &[WalkedFile],
    ) -> Result<DashMap<(u64, ContentHash), Vec<String>>, DetectError> {
        let groups: DashMap<(u64, ContentHash), Vec<String>> = DashMap::new();
        let files_done = AtomicU64::new(0);
        let bytes_done = AtomicU64::new(0);
        let total = candidates.len() as u64;

        debug!(candidates = total, "hashing size-matched files");

        let run = || {
            candidates.par_iter().try_for_each(|file| {
                let hash = hash_file(&file.path, self.config.chunk_size)?;
                groups
                    .entry((file.size, hash))
                    .or_default()
                    .push(file.relative.clone());

                let done = files_done.fetch_add(1, Ordering::Relaxed) + 1;
                let bytes = bytes_done.fetch_add(file.size, Ordering::Relaxed) + file.size;
                if done % PROGRESS_INTERVAL == 0 || done == total {
                    self.report_progress(done, total, bytes, &file.path);
                }
                Ok::<(), DetectError>(())
            })
        };

        match self.config.threads {
            0 => run()?,
            n => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| DetectError::ThreadPool {
                        message: e.to_string(),
                    })?;
                pool.install(run)?;
            }
        }

        Ok(groups)
    }

    fn report_progress(
        &self,
        files_hashed: u64,
        total_candidates: u64,
        bytes_hashed: u64,
        current: &Path,
    ) {
        // No receivers is fine; progress is best-effort.
        let _ = self.progress_tx.send(HashProgress {
            files_hashed,
            total_candidates,
            bytes_hashed,
            current_file: PathBuf::from(current),
        });
    }
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self::new()
    }
}
