//! Metalink decoder: XML from a file, a string or a byte buffer into a [`Document`].
//!
//! Decoding is structural only. Unknown elements and attributes are
//! ignored, missing optional elements decode to empty values, and text is
//! never trimmed or converted.

mod reader;

use std::path::Path;
use std::str::FromStr;

use crate::error::{DecodeError, Error, Result};
use crate::model::Document;

use reader::Decoder;

/// Read and decode the metalink file at `path`. Read failures are returned as [`Error::Io`].
pub fn parse_from_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let doc = parse_from_bytes(&bytes)?;
    tracing::debug!(path = %path.display(), files = doc.files.entries.len(), "decoded metalink file");
    Ok(doc)
}

/// Decode a metalink document held in a string.
pub fn parse_from_str(xml: &str) -> Result<Document> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    Ok(Decoder::new(xml).document()?)
}

/// Decode a metalink document held in a byte buffer (must be UTF-8).
pub fn parse_from_bytes(bytes: &[u8]) -> Result<Document> {
    let xml = std::str::from_utf8(bytes).map_err(DecodeError::from)?;
    parse_from_str(xml)
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_from_str(s)
    }
}
