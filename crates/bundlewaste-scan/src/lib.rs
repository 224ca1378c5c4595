//! Content fingerprint grouping for bundlewaste.
//!
//! This crate finds byte-identical files inside an extracted app bundle.
//!
//! # Overview
//!
//! - **Size bucketing** during a single-threaded jwalk traversal
//! - **Selective hashing** with chunked BLAKE3, only for files that share
//!   their size with another file
//! - **Parallel workers** via rayon, writing into a sharded dashmap
//! - **Progress updates** via broadcast channels
//!
//! Two files end up in the same [`DuplicateSet`] iff they have the same
//! byte size and the same content hash.
//!
//! # Example
//!
//! ```rust,no_run
//! use bundlewaste_scan::DuplicateDetector;
//!
//! let detector = DuplicateDetector::new();
//! let report = detector.detect("/tmp/extracted/Payload").unwrap();
//!
//! for set in &report.sets {
//!     println!("{} copies, {} bytes wasted", set.count, set.wasted_size);
//! }
//! ```

mod detector;
mod hasher;
mod progress;
mod walker;

pub use detector::{DuplicateDetector, DuplicateReport};
pub use hasher::hash_file;
pub use progress::HashProgress;
pub use walker::{SizeBuckets, WalkedFile, bucket_by_size, relative_path};

// Re-export core types for convenience
pub use bundlewaste_core::{ContentHash, DetectConfig, DetectError, DuplicateSet};
