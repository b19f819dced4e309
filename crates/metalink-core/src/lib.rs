//! Metalink document model, decoder and checksum verifier.
//!
//! ```no_run
//! let doc = metalink_core::parse_from_file("ubuntu.metalink")?;
//! let entry = doc.file("ubuntu.iso").expect("entry");
//! let ok = metalink_core::compare_hash(entry, "sha256", "ubuntu.iso")?;
//! # Ok::<(), metalink_core::Error>(())
//! ```

pub mod config;
pub mod logging;

pub mod checksum;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod model;
pub mod verify;

pub use checksum::HashAlgorithm;
pub use decode::{parse_from_bytes, parse_from_file, parse_from_str};
pub use error::{DecodeError, Error, NetworkError, Result};
pub use fetch::{parse_from_url, parse_from_url_with, FetchOptions};
pub use model::{
    ChecksumDeclaration, Document, FileEntry, FileSet, MirrorUrl, ResourceGroup, Verification,
};
pub use verify::compare_hash;
