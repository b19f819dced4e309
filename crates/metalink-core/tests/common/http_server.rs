//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed status line and body to every GET, closing the connection
//! after each response.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

/// Canned response returned for every request.
#[derive(Debug, Clone)]
pub struct Response {
    /// Status line after "HTTP/1.1 ", e.g. "200 OK".
    pub status: &'static str,
    pub body: Vec<u8>,
    /// Extra header lines, without trailing CRLF.
    pub headers: Vec<String>,
}

impl Response {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: "200 OK",
            body: body.into(),
            headers: Vec::new(),
        }
    }

    pub fn status(status: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: Vec::new(),
        }
    }
}

/// Starts a server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345/"). The server runs until the process exits.
pub fn start(response: Response) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let response = Arc::new(response);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let response = Arc::clone(&response);
            thread::spawn(move || handle(stream, &response));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: std::net::TcpStream, response: &Response) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(_) => {}
    }
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Type: application/metalink+xml\r\nConnection: close\r\n",
        response.status,
        response.body.len()
    );
    for h in &response.headers {
        head.push_str(h);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&response.body);
}
