//! Content hashes and duplicate sets.

use serde::{Deserialize, Serialize};

/// BLAKE3 content hash for duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    /// Create a new ContentHash from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the hash as a hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A group of files (or asset renditions) with identical content.
///
/// Created once by a detector and read-only afterwards. `files` holds
/// forward-slash paths relative to the analyzed root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateSet {
    /// Hex digest shared by every member.
    pub content_hash: String,

    /// Size of one member in bytes (block-aligned for filesystem duplicates).
    pub size: u64,

    /// Number of members; always `files.len()`.
    pub count: usize,

    /// Paths of all members.
    pub files: Vec<String>,

    /// Bytes recoverable by keeping one copy: `(count - 1) * size`.
    pub wasted_size: u64,
}

impl DuplicateSet {
    /// Build a set, deriving `count` and `wasted_size` from the inputs.
    pub fn new(content_hash: impl Into<String>, size: u64, files: Vec<String>) -> Self {
        let count = files.len();
        let wasted_size = size.saturating_mul(count.saturating_sub(1) as u64);
        Self {
            content_hash: content_hash.into(),
            size,
            count,
            files,
            wasted_size,
        }
    }

    /// A set is meaningful only with two or more members.
    pub fn is_valid(&self) -> bool {
        self.count >= 2 && self.count == self.files.len()
    }

    /// Total bytes occupied by all members.
    pub fn total_size(&self) -> u64 {
        self.size.saturating_mul(self.count as u64)
    }

    /// Final path component of every member.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .map(|f| f.rsplit('/').next().unwrap_or(f.as_str()))
    }
}
