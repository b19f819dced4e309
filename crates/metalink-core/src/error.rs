//! Error types for decoding, fetching and verification.
//!
//! A digest mismatch is not an error: `compare_hash` returns `Ok(false)`.

use std::io;
use std::path::PathBuf;

/// Everything a metalink operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input is not a well-formed metalink document.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Reading or opening a local file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Fetching the document over HTTP failed.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// No usable checksum declaration for the requested algorithm.
    #[error("no \"{algorithm}\" hash present in the metalink file entry")]
    NotFound { algorithm: String },

    /// A declaration matched, but there is no hash implementation for its algorithm.
    #[error("unsupported hash algorithm \"{algorithm}\"")]
    UnsupportedAlgorithm { algorithm: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Structural decode failure.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Tokenizer error (bad syntax, mismatched end tag, bad escape).
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// Root element is not `<metalink>`.
    #[error("expected root element <metalink>, found <{found}>")]
    UnexpectedRoot { found: String },

    /// Input contains no root element at all.
    #[error("document has no root element")]
    MissingRoot,

    /// Input ended inside an open element.
    #[error("unexpected end of document inside <{element}>")]
    UnexpectedEof { element: String },

    /// Byte input is not UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// HTTP retrieval failure.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// libcurl reported an error (DNS, connect, TLS, timeout).
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// Final response had a non-2xx status.
    #[error("GET {url} returned HTTP {code}")]
    Status { url: String, code: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
