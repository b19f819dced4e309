//! Metalink document model.
//!
//! Mirrors the XML layout: `metalink` → `files` → `file*`, each file with a
//! `size`, repeated `resources/url` and a `verification/hash` list. All text
//! is kept exactly as it appeared in the document.

use serde::Serialize;
use std::path::Path;

use crate::checksum::HashAlgorithm;
use crate::error::Result;

/// Digests this short or shorter are placeholders and never used for verification.
pub(crate) const MIN_DIGEST_LEN: usize = 2;

/// Root of a decoded metalink document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Document {
    pub files: FileSet,
}

/// The `<files>` block, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FileSet {
    pub entries: Vec<FileEntry>,
}

/// One `<file>`: a downloadable file with its mirrors and checksums.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FileEntry {
    pub name: String,
    /// Byte count as written in `<size>`; not parsed.
    pub size: String,
    pub resources: Vec<ResourceGroup>,
    pub verification: Verification,
}

/// One `<resources>` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResourceGroup {
    pub urls: Vec<MirrorUrl>,
}

/// One `<url>` mirror.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MirrorUrl {
    /// `type` attribute (e.g. "http", "ftp", "bittorrent").
    #[serde(rename = "type")]
    pub kind: String,
    pub protocol: String,
    pub location: String,
    /// Priority as written; not parsed.
    pub preference: String,
    pub link: String,
}

/// The `<verification>` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Verification {
    pub hashes: Vec<ChecksumDeclaration>,
}

/// One `<hash type="...">HEX</hash>`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChecksumDeclaration {
    pub algorithm: String,
    pub digest: String,
}

impl ChecksumDeclaration {
    /// True if this declaration is for `algorithm` and carries a real digest.
    pub fn qualifies_for(&self, algorithm: &str) -> bool {
        self.algorithm == algorithm && self.digest.len() > MIN_DIGEST_LEN
    }
}

impl Document {
    /// Entries in declaration order.
    pub fn entries(&self) -> &[FileEntry] {
        &self.files.entries
    }

    /// First entry whose `name` equals `name`.
    pub fn file(&self, name: &str) -> Option<&FileEntry> {
        self.files.entries.iter().find(|f| f.name == name)
    }
}

impl FileEntry {
    /// All mirrors across every resource group, in order.
    pub fn urls(&self) -> impl Iterator<Item = &MirrorUrl> {
        self.resources.iter().flat_map(|g| g.urls.iter())
    }

    /// The declaration `compare_hash` would use for `algorithm`, if any.
    pub fn checksum(&self, algorithm: &str) -> Option<&ChecksumDeclaration> {
        self.verification
            .hashes
            .iter()
            .find(|h| h.qualifies_for(algorithm))
    }

    /// Algorithm names in declaration order, duplicates included.
    pub fn declared_algorithms(&self) -> impl Iterator<Item = &str> {
        self.verification.hashes.iter().map(|h| h.algorithm.as_str())
    }

    /// Strongest supported algorithm with a usable declaration.
    pub fn preferred_algorithm(&self) -> Option<HashAlgorithm> {
        HashAlgorithm::ALL
            .iter()
            .rev()
            .copied()
            .find(|alg| self.checksum(alg.as_str()).is_some())
    }

    /// Verify `path` against the declared `algorithm` digest.
    /// See [`crate::verify::compare_hash`].
    pub fn compare_hash(&self, algorithm: &str, path: impl AsRef<Path>) -> Result<bool> {
        crate::verify::compare_hash(self, algorithm, path)
    }
}
