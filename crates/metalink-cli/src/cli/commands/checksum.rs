//! Checksum command: compute a file digest.

use anyhow::Result;
use metalink_core::checksum;
use metalink_core::HashAlgorithm;
use std::path::Path;

/// Compute and print the digest of the given file in `sha256sum` format.
pub fn run_checksum(path: &Path, algorithm: HashAlgorithm) -> Result<()> {
    let digest = checksum::digest_path(path, algorithm)?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
