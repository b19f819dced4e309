//! Whole-file digests (MD5, SHA-1, SHA-256, SHA-512).
//!
//! Reads the file once, sequentially, in fixed-size chunks; memory use does
//! not depend on file size.

use digest::Digest;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

const BUF_SIZE: usize = 64 * 1024;

/// Hash algorithms the verifier can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Weakest to strongest.
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
    ];

    /// Name as used in `<hash type="...">`.
    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Digest length in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact lowercase names only; "SHA256" or "sha-256" are rejected.
impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HashAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| Error::UnsupportedAlgorithm {
                algorithm: s.to_string(),
            })
    }
}

/// Compute the digest of the file at `path` and return it as lowercase hex.
pub fn digest_path(path: impl AsRef<Path>, algorithm: HashAlgorithm) -> Result<String> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), %algorithm, "computing file digest");
    match algorithm {
        HashAlgorithm::Md5 => hash_file::<md5::Md5>(path),
        HashAlgorithm::Sha1 => hash_file::<sha1::Sha1>(path),
        HashAlgorithm::Sha256 => hash_file::<sha2::Sha256>(path),
        HashAlgorithm::Sha512 => hash_file::<sha2::Sha512>(path),
    }
}

/// MD5 of a file as lowercase hex.
pub fn md5_path(path: impl AsRef<Path>) -> Result<String> {
    digest_path(path, HashAlgorithm::Md5)
}

/// SHA-1 of a file as lowercase hex.
pub fn sha1_path(path: impl AsRef<Path>) -> Result<String> {
    digest_path(path, HashAlgorithm::Sha1)
}

/// SHA-256 of a file as lowercase hex.
pub fn sha256_path(path: impl AsRef<Path>) -> Result<String> {
    digest_path(path, HashAlgorithm::Sha256)
}

/// SHA-512 of a file as lowercase hex.
pub fn sha512_path(path: impl AsRef<Path>) -> Result<String> {
    digest_path(path, HashAlgorithm::Sha512)
}

fn hash_file<D: Digest>(path: &Path) -> Result<String> {
    let mut f = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = D::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = match f.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::io(path, e)),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
