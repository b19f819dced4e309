//! CLI command handlers, one per file.

mod checksum;
mod completions;
mod inspect;
mod verify;

pub use checksum::run_checksum;
pub use completions::run_completions;
pub use inspect::run_inspect;
pub use verify::{run_verify, VerifyArgs};

use anyhow::{Context, Result};
use metalink_core::config::MetalinkConfig;
use metalink_core::Document;

/// True if `source` should be fetched rather than read from disk.
pub(crate) fn is_url(source: &str) -> bool {
    ["http://", "https://", "ftp://"]
        .iter()
        .any(|scheme| source.starts_with(scheme))
}

/// Decode the metalink document at `source` (a path or a URL).
pub(crate) fn load_document(cfg: &MetalinkConfig, source: &str) -> Result<Document> {
    if is_url(source) {
        metalink_core::parse_from_url_with(source, &cfg.fetch.to_options())
            .with_context(|| format!("fetch metalink: {}", source))
    } else {
        metalink_core::parse_from_file(source).with_context(|| format!("read metalink: {}", source))
    }
}
