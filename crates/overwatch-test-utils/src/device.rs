//! [`StubDevice`]: a loopback HTTP server that answers exactly one request.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A device stand-in bound to `127.0.0.1` on an ephemeral port.
///
/// The server thread handles a single connection and then exits, returning
/// the request line it saw.
pub struct StubDevice {
    address: String,
    handle: JoinHandle<Option<String>>,
}

impl StubDevice {
    /// Answer the first request with `status` and `body`.
    pub fn serve(status: u16, body: impl Into<String>) -> Self {
        Self::serve_bytes(status, body.into().into_bytes())
    }

    /// Like [`serve`](Self::serve), but the body is sent as-is, valid UTF-8
    /// or not.
    pub fn serve_bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self::spawn(move |mut stream, request_line| {
            let head = format!(
                "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                reason_phrase(status),
                body.len(),
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body);
            let _ = stream.flush();
            request_line
        })
    }

    /// Accept the first request and hold it open without answering for
    /// `delay`.
    pub fn hang(delay: Duration) -> Self {
        Self::spawn(move |_stream, request_line| {
            thread::sleep(delay);
            request_line
        })
    }

    /// `host:port` to hand to the code under test.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Wait for the server thread and return the request line it received,
    /// e.g. `GET /config HTTP/1.1`.
    pub fn request_line(self) -> Option<String> {
        self.handle.join().ok().flatten()
    }

    fn spawn<F>(respond: F) -> Self
    where
        F: FnOnce(TcpStream, Option<String>) -> Option<String> + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("StubDevice: bind loopback");
        let address = listener
            .local_addr()
            .expect("StubDevice: local address")
            .to_string();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().ok()?;
            let request_line = read_request_head(&stream);
            respond(stream, request_line)
        });

        Self { address, handle }
    }
}

/// Read the request head up to the blank line; returns the request line.
fn read_request_head(stream: &TcpStream) -> Option<String> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);
    let mut first = None;
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let trimmed = line.trim_end().to_string();
                if trimmed.is_empty() {
                    break;
                }
                if first.is_none() {
                    first = Some(trimmed);
                }
            }
        }
    }
    first
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        301 => "Moved Permanently",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

/// A loopback `host:port` with nothing listening on it.
pub fn unused_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("unused_address: bind loopback");
    let address = listener
        .local_addr()
        .expect("unused_address: local address")
        .to_string();
    drop(listener);
    address
}
