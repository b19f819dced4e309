//! Fetch a metalink document over HTTP(S) and decode it.
//!
//! Uses the curl crate (libcurl). Only a final 2xx response is decoded;
//! anything else is a [`NetworkError`]. No retries.

use std::time::Duration;

use crate::decode::parse_from_bytes;
use crate::error::{NetworkError, Result};
use crate::model::Document;

/// Transfer settings for [`parse_from_url_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Connect phase limit.
    pub connect_timeout: Duration,
    /// Whole-transfer limit (connect + body).
    pub timeout: Duration,
    /// Follow 3xx `Location` headers.
    pub follow_redirects: bool,
    pub max_redirections: u32,
    /// `User-Agent` header; libcurl sends none when unset.
    pub user_agent: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
            follow_redirects: true,
            max_redirections: 10,
            user_agent: Some(concat!("mlk/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

/// Download `url` with default [`FetchOptions`] and decode the body.
pub fn parse_from_url(url: &str) -> Result<Document> {
    parse_from_url_with(url, &FetchOptions::default())
}

/// Download `url` and decode the body.
///
/// Fails with [`NetworkError::Transport`] if the request does not complete,
/// [`NetworkError::Status`] for a non-2xx final status (the body is not
/// decoded), and a decode error if the body is not a metalink document.
pub fn parse_from_url_with(url: &str, opts: &FetchOptions) -> Result<Document> {
    let body = get(url, opts)?;
    let doc = parse_from_bytes(&body)?;
    tracing::debug!(url, files = doc.files.entries.len(), "decoded metalink from URL");
    Ok(doc)
}

/// Performs a GET and returns the full body of a 2xx response.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
fn get(url: &str, opts: &FetchOptions) -> std::result::Result<Vec<u8>, NetworkError> {
    let transport = |source: curl::Error| NetworkError::Transport {
        url: url.to_string(),
        source,
    };

    let mut body: Vec<u8> = Vec::new();
    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(transport)?;
    easy.follow_location(opts.follow_redirects).map_err(transport)?;
    easy.max_redirections(opts.max_redirections).map_err(transport)?;
    easy.connect_timeout(opts.connect_timeout).map_err(transport)?;
    easy.timeout(opts.timeout).map_err(transport)?;
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua).map_err(transport)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(transport)?;
        transfer.perform().map_err(transport)?;
    }

    let code = easy.response_code().map_err(transport)?;
    if !(200..300).contains(&code) {
        return Err(NetworkError::Status {
            url: url.to_string(),
            code,
        });
    }
    tracing::debug!(url, code, bytes = body.len(), "fetched metalink");
    Ok(body)
}
