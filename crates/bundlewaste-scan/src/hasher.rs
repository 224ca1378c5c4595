//! Chunked BLAKE3 file hashing.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use blake3::Hasher;

use bundlewaste_core::{ContentHash, DetectError};

/// Hash a file's full content, reading `chunk_size` bytes at a time so memory
/// use stays bounded regardless of file size.
pub fn hash_file(path: &Path, chunk_size: usize) -> Result<ContentHash, DetectError> {
    let mut file = File::open(path).map_err(|e| DetectError::io(path, e))?;
    let mut hasher = Hasher::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];

    loop {
        let bytes_read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(DetectError::io(path, e)),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(ContentHash::new(*hasher.finalize().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_identical_content_same_hash() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a"), "duplicate content here").unwrap();
        fs::write(temp.path().join("b"), "duplicate content here").unwrap();
        fs::write(temp.path().join("c"), "unique content").unwrap();

        let a = hash_file(&temp.path().join("a"), 4).unwrap();
        let b = hash_file(&temp.path().join("b"), 64 * 1024).unwrap();
        let c = hash_file(&temp.path().join("c"), 4).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_chunking_matches_one_shot_hash() {
        let temp = TempDir::new().unwrap();
        let data: Vec<u8> = (0..100_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(temp.path().join("big"), &data).unwrap();

        let chunked = hash_file(&temp.path().join("big"), 1000).unwrap();
        assert_eq!(chunked.0, *blake3::hash(&data).as_bytes());
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = hash_file(&temp.path().join("gone"), 4096).unwrap_err();
        assert!(matches!(err, DetectError::NotFound { .. }));
    }
}
