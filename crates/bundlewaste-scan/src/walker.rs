//! Bundle walk and size bucketing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use jwalk::{Parallelism, WalkDir};
use tracing::debug;

use bundlewaste_core::{DetectConfig, DiskModel};

/// A regular file found during the walk.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    /// Absolute path used for reading.
    pub path: PathBuf,
    /// Forward-slash path relative to the walked root.
    pub relative: String,
    /// Logical size in bytes.
    pub size: u64,
}

/// Files grouped by exact byte size, plus walk counters.
#[derive(Debug, Default)]
pub struct SizeBuckets {
    /// Files keyed by logical size.
    pub buckets: HashMap<u64, Vec<WalkedFile>>,
    /// Regular files seen (including excluded ones).
    pub files_walked: u64,
    /// Entries that could not be read or stat'ed.
    pub skipped_entries: u64,
    /// Files dropped by the exclusion list.
    pub excluded: u64,
    /// Block-aligned size of every walked file.
    pub total_size: u64,
}

impl SizeBuckets {
    /// Consume the buckets, keeping only files that share their size with
    /// at least one other file.
    pub fn into_candidates(self) -> Vec<WalkedFile> {
        self.buckets
            .into_values()
            .filter(|files| files.len() >= 2)
            .flatten()
            .collect()
    }

    /// Number of buckets holding two or more files.
    pub fn candidate_bucket_count(&self) -> usize {
        self.buckets.values().filter(|files| files.len() >= 2).count()
    }
}

/// Walk `root` on the calling thread and bucket every regular file by size.
///
/// Unreadable entries are skipped and counted; they never abort the walk.
pub fn bucket_by_size(
    root: &Path,
    config: &DetectConfig,
    excludes: &GlobSet,
    disk: &DiskModel,
) -> SizeBuckets {
    let walker = WalkDir::new(root)
        .parallelism(Parallelism::Serial)
        .skip_hidden(false)
        .follow_links(config.follow_symlinks)
        .sort(true);

    let mut result = SizeBuckets::default();

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                result.skipped_entries += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "skipping entry without metadata");
                result.skipped_entries += 1;
                continue;
            }
        };

        result.files_walked += 1;
        let size = metadata.len();
        result.total_size += disk.aligned_size(size);

        let file_name = entry.file_name().to_string_lossy();
        if excludes.is_match(file_name.as_ref()) {
            result.excluded += 1;
            continue;
        }

        let relative = relative_path(root, &path);
        result.buckets.entry(size).or_default().push(WalkedFile {
            path,
            relative,
            size,
        });
    }

    debug!(
        files = result.files_walked,
        buckets = result.candidate_bucket_count(),
        skipped = result.skipped_entries,
        excluded = result.excluded,
        "size bucketing complete"
    );

    result
}

/// Forward-slash form of `path` relative to `root`.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn walk(root: &Path) -> SizeBuckets {
        let config = DetectConfig::default();
        let excludes = config.exclude_set().unwrap();
        bucket_by_size(root, &config, &excludes, &config.disk_model())
    }

    #[test]
    fn test_buckets_by_exact_size() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("a.txt"), "12345").unwrap();
        fs::write(root.join("b.txt"), "abcde").unwrap();
        fs::write(root.join("c.txt"), "123").unwrap();

        let buckets = walk(root);
        assert_eq!(buckets.files_walked, 3);
        assert_eq!(buckets.buckets[&5].len(), 2);
        assert_eq!(buckets.buckets[&3].len(), 1);
        assert_eq!(buckets.candidate_bucket_count(), 1);
        assert_eq!(buckets.total_size, 3 * 4096);
    }

    #[test]
    fn test_exclusion_list_is_never_bucketed() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("A.framework")).unwrap();
        fs::create_dir_all(root.join("B.framework")).unwrap();
        fs::write(root.join("A.framework/PrivacyInfo.xcprivacy"), "same").unwrap();
        fs::write(root.join("B.framework/PrivacyInfo.xcprivacy"), "same").unwrap();

        let buckets = walk(root);
        assert_eq!(buckets.files_walked, 2);
        assert_eq!(buckets.excluded, 2);
        assert!(buckets.into_candidates().is_empty());
    }

    #[test]
    fn test_relative_paths_use_forward_slashes() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("Payload/App.app")).unwrap();
        fs::write(root.join("Payload/App.app/Info.plist"), "x").unwrap();

        let buckets = walk(root);
        let file = &buckets.buckets[&1][0];
        assert_eq!(file.relative, "Payload/App.app/Info.plist");
    }
}
