//! Streaming triple-digest hasher.
//!
//! # Overview
//!
//! [`Hasher`] reads a file exactly once, in fixed-size chunks, and feeds
//! every chunk into three accumulators before reading the next one:
//!
//! | Algorithm | Bits | Hex length |
//! |-----------|------|------------|
//! | MD5       | 128  | 32         |
//! | SHA-1     | 160  | 40         |
//! | SHA3-256  | 256  | 64         |
//!
//! SHA3-256 is the grouping key. The two weaker digests are carried for
//! compatibility with tools that only know MD5 or SHA-1; none of them is
//! used for any security purpose.
//!
//! Memory use is bounded by the chunk size regardless of file size.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha3::{Digest, Sha3_256};

use super::HashError;

/// Default read chunk size in bytes (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 65_536;

/// The three hex-encoded digests of one file's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileDigests {
    /// MD5, 32 lowercase hex characters
    pub md5: String,
    /// SHA-1, 40 lowercase hex characters
    pub sha1: String,
    /// SHA3-256, 64 lowercase hex characters (the grouping key)
    pub sha3_256: String,
}

/// Streaming hasher computing MD5, SHA-1 and SHA3-256 in one pass.
#[derive(Debug, Clone, Copy)]
pub struct Hasher {
    chunk_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl Hasher {
    /// Create a hasher reading `chunk_size` bytes at a time.
    ///
    /// A chunk size of zero is clamped to one byte.
    #[must_use]
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Read chunk size in bytes.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Digest the full content of the file at `path`.
    ///
    /// The file handle is dropped on every return path, including read
    /// failures halfway through the file.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or a read fails.
    pub fn digest_file(&self, path: &Path) -> Result<FileDigests, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let digests = self
            .digest_reader(file)
            .map_err(|e| HashError::from_io(path, e))?;
        log::trace!("Digested {}: {}", path.display(), digests.sha3_256);
        Ok(digests)
    }

    /// Digest everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error other than [`ErrorKind::Interrupted`].
    pub fn digest_reader<R: Read>(&self, mut reader: R) -> std::io::Result<FileDigests> {
        let mut md5 = Md5::new();
        let mut sha1 = Sha1::new();
        let mut sha3 = Sha3_256::new();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            let chunk = &buffer[..n];
            md5.update(chunk);
            sha1.update(chunk);
            sha3.update(chunk);
        }

        Ok(FileDigests {
            md5: format!("{:x}", md5.finalize()),
            sha1: format!("{:x}", sha1.finalize()),
            sha3_256: format!("{:x}", sha3.finalize()),
        })
    }
}
