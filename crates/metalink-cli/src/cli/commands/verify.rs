//! `mlk verify <source> <file>` – check a local file against its metalink entry.

use anyhow::{bail, Context, Result};
use metalink_core::config::MetalinkConfig;
use metalink_core::{compare_hash, Document, FileEntry};
use std::path::{Path, PathBuf};

use super::load_document;

#[derive(Debug, Clone)]
pub struct VerifyArgs {
    pub source: String,
    pub file: PathBuf,
    pub name: Option<String>,
    pub algorithm: Option<String>,
}

/// Returns Ok(true) on match, Ok(false) on mismatch.
pub fn run_verify(cfg: &MetalinkConfig, args: &VerifyArgs) -> Result<bool> {
    let doc = load_document(cfg, &args.source)?;
    let entry = select_entry(&doc, args.name.as_deref(), &args.file)?;
    let algorithm = select_algorithm(cfg, entry, args.algorithm.as_deref())?;

    let matched = compare_hash(entry, &algorithm, &args.file)
        .with_context(|| format!("verify {} ({})", args.file.display(), entry.name))?;
    tracing::info!(
        file = %args.file.display(),
        entry = %entry.name,
        %algorithm,
        matched,
        "verification finished"
    );
    println!(
        "{}  {}  {}",
        if matched { "OK" } else { "MISMATCH" },
        algorithm,
        args.file.display()
    );
    Ok(matched)
}

/// `--name` if given; else the entry named like `file`; else the only entry.
pub(crate) fn select_entry<'a>(
    doc: &'a Document,
    name: Option<&str>,
    file: &Path,
) -> Result<&'a FileEntry> {
    if let Some(name) = name {
        return doc
            .file(name)
            .with_context(|| format!("no file entry named {:?}", name));
    }
    if let Some(entry) = file
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| doc.file(n))
    {
        return Ok(entry);
    }
    match doc.entries() {
        [only] => Ok(only),
        [] => bail!("metalink document has no file entries"),
        many => bail!(
            "metalink document has {} file entries and none is named like {}; use --name",
            many.len(),
            file.display()
        ),
    }
}

/// Explicit algorithm; else the configured default if the entry declares it;
/// else the strongest supported algorithm the entry declares.
pub(crate) fn select_algorithm(
    cfg: &MetalinkConfig,
    entry: &FileEntry,
    explicit: Option<&str>,
) -> Result<String> {
    if let Some(alg) = explicit {
        return Ok(alg.to_string());
    }
    if let Some(alg) = cfg.default_hash()? {
        if entry.checksum(alg.as_str()).is_some() {
            return Ok(alg.as_str().to_string());
        }
        tracing::debug!(%alg, entry = %entry.name, "configured default algorithm not declared");
    }
    entry
        .preferred_algorithm()
        .map(|alg| alg.as_str().to_string())
        .with_context(|| format!("{} declares no supported checksum", entry.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOC: &str = r#"<metalink><files>
        <file name="a.iso"><verification>
          <hash type="md5">d41d8cd98f00b204e9800998ecf8427e</hash>
          <hash type="sha1">da39a3ee5e6b4b0d3255bfef95601890afd80709</hash>
        </verification></file>
        <file name="b.iso"/>
      </files></metalink>"#;

    fn doc() -> Document {
        metalink_core::parse_from_str(DOC).unwrap()
    }

    #[test]
    fn select_entry_by_name_flag() {
        let d = doc();
        let e = select_entry(&d, Some("b.iso"), Path::new("whatever")).unwrap();
        assert_eq!(e.name, "b.iso");
        assert!(select_entry(&d, Some("c.iso"), Path::new("a.iso")).is_err());
    }

    #[test]
    fn select_entry_by_file_name() {
        let d = doc();
        let e = select_entry(&d, None, Path::new("/downloads/a.iso")).unwrap();
        assert_eq!(e.name, "a.iso");
    }

    #[test]
    fn select_entry_ambiguous() {
        let d = doc();
        assert!(select_entry(&d, None, Path::new("/downloads/renamed.iso")).is_err());
    }

    #[test]
    fn select_entry_single() {
        let d = metalink_core::parse_from_str(r#"<metalink><files><file name="only"/></files></metalink>"#)
            .unwrap();
        let e = select_entry(&d, None, Path::new("local.bin")).unwrap();
        assert_eq!(e.name, "only");
    }

    #[test]
    fn select_algorithm_order() {
        let d = doc();
        let entry = d.file("a.iso").unwrap();
        let mut cfg = MetalinkConfig::default();
        assert_eq!(select_algorithm(&cfg, entry, Some("md5")).unwrap(), "md5");
        assert_eq!(select_algorithm(&cfg, entry, None).unwrap(), "sha1");

        cfg.default_algorithm = Some("md5".to_string());
        assert_eq!(select_algorithm(&cfg, entry, None).unwrap(), "md5");

        cfg.default_algorithm = Some("sha512".to_string());
        assert_eq!(select_algorithm(&cfg, entry, None).unwrap(), "sha1");

        let bare = d.file("b.iso").unwrap();
        assert!(select_algorithm(&MetalinkConfig::default(), bare, None).is_err());
    }

    #[test]
    fn run_verify_against_local_metalink() {
        let mut ml = tempfile::NamedTempFile::new().unwrap();
        ml.write_all(DOC.as_bytes()).unwrap();
        ml.flush().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let iso = dir.path().join("a.iso");
        std::fs::write(&iso, b"").unwrap();

        let mut args = VerifyArgs {
            source: ml.path().display().to_string(),
            file: iso.clone(),
            name: None,
            algorithm: None,
        };
        assert!(run_verify(&MetalinkConfig::default(), &args).unwrap());

        std::fs::write(&iso, b"x").unwrap();
        assert!(!run_verify(&MetalinkConfig::default(), &args).unwrap());

        args.algorithm = Some("sha256".to_string());
        assert!(run_verify(&MetalinkConfig::default(), &args).is_err());
    }
}
