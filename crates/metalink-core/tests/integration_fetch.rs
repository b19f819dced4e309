//! Integration test: fetch metalink documents from a local HTTP server.

mod common;

use common::http_server::{self, Response};
use metalink_core::{parse_from_str, parse_from_url, DecodeError, Error, NetworkError};

const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<metalink version="3.0" xmlns="http://www.metalinker.org/">
  <files>
    <file name="debian-12.iso">
      <size>658505728</size>
      <resources>
        <url type="http" location="de" preference="100">https://cdimage.example.org/debian-12.iso</url>
      </resources>
      <verification>
        <hash type="sha256">e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855</hash>
      </verification>
    </file>
  </files>
</metalink>"#;

#[test]
fn fetch_ok_decodes_same_as_string() {
    let url = http_server::start(Response::ok(DOC));
    let fetched = parse_from_url(&url).expect("parse_from_url");
    assert_eq!(fetched, parse_from_str(DOC).unwrap());
    assert_eq!(fetched.entries()[0].size, "658505728");
}

#[test]
fn fetch_not_found_is_status_error() {
    // Body is a valid document; it must not be decoded.
    let url = http_server::start(Response::status("404 Not Found", DOC));
    match parse_from_url(&url) {
        Err(Error::Network(NetworkError::Status { code, .. })) => assert_eq!(code, 404),
        other => panic!("expected HTTP status error, got {:?}", other),
    }
}

#[test]
fn fetch_server_error_is_status_error() {
    let url = http_server::start(Response::status("503 Service Unavailable", ""));
    assert!(matches!(
        parse_from_url(&url),
        Err(Error::Network(NetworkError::Status { code: 503, .. }))
    ));
}

#[test]
fn fetch_html_body_is_decode_error() {
    let url = http_server::start(Response::ok("<html><body>mirror list</body></html>"));
    assert!(matches!(
        parse_from_url(&url),
        Err(Error::Decode(DecodeError::UnexpectedRoot { .. }))
    ));
}

#[test]
fn fetch_follows_redirect() {
    let target = http_server::start(Response::ok(DOC));
    let mut redirect = Response::status("302 Found", "");
    redirect.headers.push(format!("Location: {}", target));
    let url = http_server::start(redirect);
    let doc = parse_from_url(&url).expect("redirected fetch");
    assert_eq!(doc.entries()[0].name, "debian-12.iso");
}
