//! Minimal HTTP/1.1 server that replies to every connection with canned bytes.
//!
//! Used for responses a well-behaved mock server won't produce, such as a
//! body that stops short of its declared `Content-Length`.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Starts a server in a background thread. Each connection gets `response`
/// written verbatim and is then closed. Returns the base URL
/// (e.g. "http://127.0.0.1:12345/"). The server runs until the process exits.
pub fn start(response: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
            let mut buf = [0u8; 8192];
            if matches!(stream.read(&mut buf), Ok(0) | Err(_)) {
                continue;
            }
            let _ = stream.write_all(&response);
            let _ = stream.flush();
        }
    });
    format!("http://127.0.0.1:{port}/")
}

/// Returns a response declaring `declared_len` bytes but carrying only `body`.
pub fn truncated_response(declared_len: usize, body: &[u8]) -> Vec<u8> {
    let mut response =
        format!("HTTP/1.1 200 OK\r\nContent-Length: {declared_len}\r\nConnection: close\r\n\r\n")
            .into_bytes();
    response.extend_from_slice(body);
    response
}
