//! Compare a local file against a declared checksum.

use std::path::Path;

use crate::checksum::{digest_path, HashAlgorithm};
use crate::error::{Error, Result};
use crate::model::FileEntry;

/// Checks whether the file at `path` matches the digest `entry` declares for `algorithm`.
///
/// Uses the first declaration whose algorithm equals `algorithm` exactly and
/// whose digest is longer than two characters. The computed digest is
/// lowercase hex and compared byte-for-byte with the declared text.
///
/// Returns `Ok(false)` on mismatch. Fails with [`Error::NotFound`] when no
/// declaration qualifies, [`Error::UnsupportedAlgorithm`] when one does but
/// the algorithm has no hash implementation, and [`Error::Io`] when the file
/// cannot be read.
pub fn compare_hash(entry: &FileEntry, algorithm: &str, path: impl AsRef<Path>) -> Result<bool> {
    let declared = entry.checksum(algorithm).ok_or_else(|| Error::NotFound {
        algorithm: algorithm.to_string(),
    })?;
    let hash: HashAlgorithm = algorithm.parse()?;

    let path = path.as_ref();
    let actual = digest_path(path, hash)?;
    let matched = actual == declared.digest;
    if !matched {
        tracing::debug!(
            file = %entry.name,
            path = %path.display(),
            %hash,
            expected = %declared.digest,
            %actual,
            "digest mismatch"
        );
    }
    Ok(matched)
}
