//! Minimal HTTP/1.1 server for manifest fetch tests.
//!
//! Serves one static body on every GET, with a configurable status and an
//! optional delay before the response (for timeout and cancellation tests).

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct ManifestServerOptions {
    pub status: u16,
    /// Sleep before writing anything back.
    pub delay: Option<Duration>,
}

impl Default for ManifestServerOptions {
    fn default() -> Self {
        Self {
            status: 200,
            delay: None,
        }
    }
}

/// Starts a server in a background thread serving `body` as an HLS playlist.
/// Returns the base URL (e.g. "http://127.0.0.1:12345/"). The server runs
/// until the process exits.
pub fn start(body: &str) -> String {
    start_with_options(body, ManifestServerOptions::default())
}

pub fn start_with_options(body: &str, opts: ManifestServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body.as_bytes().to_vec());
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body, opts));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], opts: ManifestServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(_) => {}
    }
    if let Some(delay) = opts.delay {
        thread::sleep(delay);
    }
    let body = if opts.status == 200 { body } else { &[][..] };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/vnd.apple.mpegurl\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        opts.status,
        reason(opts.status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}
