//! Disk-usage model.
//!
//! Mobile filesystems allocate whole blocks, so the space a file occupies is
//! its logical size rounded up to the next block boundary. All wasted-space
//! figures are computed from the aligned size.

use serde::{Deserialize, Serialize};

/// Allocation unit of APFS and ext4 as shipped on devices.
pub const DEFAULT_BLOCK_SIZE: u64 = 4096;

/// Maps logical file sizes to bytes occupied on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskModel {
    /// Filesystem block size in bytes. Must be non-zero.
    pub block_size: u64,
}

impl DiskModel {
    /// Create a model for the given block size.
    pub fn new(block_size: u64) -> Self {
        Self { block_size }
    }

    /// Bytes actually occupied by a file of `actual_size` bytes.
    ///
    /// Empty files occupy no blocks.
    pub fn aligned_size(&self, actual_size: u64) -> u64 {
        if actual_size == 0 || self.block_size == 0 {
            return actual_size;
        }
        actual_size.div_ceil(self.block_size).saturating_mul(self.block_size)
    }
}

impl Default for DiskModel {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE)
    }
}

/// Block-aligned size using the default 4 KiB block.
pub fn block_aligned_size(actual_size: u64) -> u64 {
    DiskModel::default().aligned_size(actual_size)
}
