//! Minimal synchronous HTTP/1.0 client over raw TCP sockets.
//!
//! No HTTPS, no HTTP/1.1 persistent connections, no chunked encoding, no
//! redirects. A connection is opened per request and read until the server
//! closes it. That EOF is the only framing HTTP/1.0 gives us, so there is
//! no content-length tracking on the read path.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

const READ_CHUNK: usize = 1024;
const CRLFCRLF: &[u8] = b"\r\n\r\n";

/// Bounded HTTP/1.0 client: one connection per request, capped by a
/// connect/read/write timeout. Cheap to share across worker threads,
/// holds no connection state between calls.
pub struct HttpClient {
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// `HEAD /<page> HTTP/1.0` against `host:port`. No `Range` header.
    /// Returns `None` on DNS, connect, or write failure.
    pub fn head(&self, host: &str, page: &str, port: u16) -> Option<Vec<u8>> {
        self.query(host, page, port, None)
    }

    /// `GET /<page> HTTP/1.0` with `Range: bytes=<range>` against
    /// `host:port`. Returns `None` on DNS, connect, or write failure.
    pub fn get_range(&self, host: &str, page: &str, port: u16, range: &str) -> Option<Vec<u8>> {
        self.query(host, page, port, Some(range))
    }

    fn query(&self, host: &str, page: &str, port: u16, range: Option<&str>) -> Option<Vec<u8>> {
        let sockaddr = (host, port)
            .to_socket_addrs()
            .ok()?
            .find(|a| a.is_ipv4())?;

        let mut stream = TcpStream::connect_timeout(&sockaddr, self.timeout).ok()?;
        stream.set_read_timeout(Some(self.timeout)).ok()?;
        stream.set_write_timeout(Some(self.timeout)).ok()?;

        let mut request = format!("GET /{} HTTP/1.0\r\nHost: {}\r\n", page, host);
        if let Some(r) = range {
            request.push_str("Range: bytes=");
            request.push_str(r);
            request.push_str("\r\n");
        }
        request.push_str("User-Agent: getter\r\n\r\n");

        stream.write_all(request.as_bytes()).ok()?;
        Some(read_until_close(&mut stream))
    }
}

/// Read the socket repeatedly into a growing buffer (geometric growth in
/// 1024-byte steps) until the server closes the connection (`Ok(0)`) or a
/// read error occurs. Both are treated as end of response; whatever bytes
/// were accumulated so far are returned.
fn read_until_close(stream: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(_) => break,
        }
    }
    buf
}

/// Split `host/page/with/slashes` into `(host, page/with/slashes)` at the
/// first `/`. `None` if the URL has no `/` at all.
pub fn split_url(url: &str) -> Option<(&str, &str)> {
    let idx = url.find('/')?;
    Some((&url[..idx], &url[idx + 1..]))
}

/// Offset of the first byte past the header/body separator `\r\n\r\n`. If
/// the separator is absent, the whole buffer is returned (the historical
/// client's "no body found" fallback).
pub fn get_content(response: &[u8]) -> &[u8] {
    match find(response, CRLFCRLF) {
        Some(idx) => &response[idx + CRLFCRLF.len()..],
        None => response,
    }
}

/// `true` iff the header region contains `accept-ranges:` followed
/// (after optional spaces) by the literal `bytes`. Case-insensitive.
pub fn accept_ranges(response: &[u8]) -> bool {
    let header = lowercase_header_region(response);
    match find(&header, b"accept-ranges:") {
        Some(idx) => trim_leading_spaces(&header[idx + "accept-ranges:".len()..]).starts_with(b"bytes"),
        None => false,
    }
}

/// The integer following `content-length:` in the header region, or 0 if
/// the header is absent or unparseable. Case-insensitive.
pub fn content_length(response: &[u8]) -> u64 {
    let header = lowercase_header_region(response);
    let idx = match find(&header, b"content-length:") {
        Some(idx) => idx,
        None => return 0,
    };
    let rest = trim_leading_spaces(&header[idx + "content-length:".len()..]);
    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    std::str::from_utf8(&rest[..digits])
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Lower-case only the header region (up to and including `\r\n\r\n`, or
/// the whole buffer if the separator is missing), leaving the body bytes
/// untouched.
fn lowercase_header_region(response: &[u8]) -> Vec<u8> {
    let header_end = find(response, CRLFCRLF)
        .map(|idx| idx + CRLFCRLF.len())
        .unwrap_or(response.len());
    response[..header_end].to_ascii_lowercase()
}

fn trim_leading_spaces(data: &[u8]) -> &[u8] {
    let mut i = 0;
    while i < data.len() && data[i] == b' ' {
        i += 1;
    }
    &data[i..]
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
