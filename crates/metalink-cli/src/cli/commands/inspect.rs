//! `mlk inspect <source>` – list files, mirrors and declared checksums.

use anyhow::Result;
use metalink_core::config::MetalinkConfig;
use metalink_core::Document;
use std::fmt::Write;

use super::load_document;

pub fn run_inspect(cfg: &MetalinkConfig, source: &str, json: bool) -> Result<()> {
    let doc = load_document(cfg, source)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", render(&doc));
    }
    Ok(())
}

/// Human-readable listing. Values are printed as declared; empty ones as "-".
pub(crate) fn render(doc: &Document) -> String {
    let mut out = String::new();
    if doc.entries().is_empty() {
        out.push_str("(no files)\n");
        return out;
    }
    for entry in doc.entries() {
        let _ = writeln!(out, "{}  size={}", or_dash(&entry.name), or_dash(&entry.size));
        for url in entry.urls() {
            let _ = writeln!(
                out,
                "  url   {} {} pref={} {}",
                or_dash(&url.kind),
                or_dash(&url.location),
                or_dash(&url.preference),
                url.link.trim()
            );
        }
        for hash in &entry.verification.hashes {
            let _ = writeln!(out, "  hash  {} {}", or_dash(&hash.algorithm), hash.digest.trim());
        }
    }
    out
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}
