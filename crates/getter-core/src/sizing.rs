//! Per-URL sizing policy: one HEAD probe decides how many ranged GETs to
//! issue and how large each range is.

use crate::http_client::{self, HttpClient};

const SMALL_RESOURCE_THRESHOLD: u64 = 1024;

/// `(chunk_size, num_tasks)` derived from a HEAD response. Carried as a
/// plain return value, not process-wide mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingDecision {
    pub chunk_size: u64,
    pub num_tasks: u32,
}

impl SizingDecision {
    /// Zero tasks: the URL was malformed or the HEAD probe failed.
    pub fn none() -> Self {
        Self { chunk_size: 0, num_tasks: 0 }
    }
}

/// HEAD `url` and decide how to split it across up to `worker_count`
/// ranged sub-requests. Returns `SizingDecision::none()` if the URL has no
/// `/` or the HEAD probe fails.
pub fn size(client: &HttpClient, url: &str, worker_count: u32, port: u16) -> SizingDecision {
    let (host, page) = match http_client::split_url(url) {
        Some(parts) => parts,
        None => return SizingDecision::none(),
    };

    let head = match client.head(host, page, port) {
        Some(buf) if !buf.is_empty() => buf,
        _ => return SizingDecision::none(),
    };

    let accepts_ranges = http_client::accept_ranges(&head);
    let content_length = http_client::content_length(&head);

    if !accepts_ranges || content_length < SMALL_RESOURCE_THRESHOLD {
        return SizingDecision {
            chunk_size: content_length,
            num_tasks: 1,
        };
    }

    SizingDecision {
        chunk_size: ceil_div(content_length, worker_count as u64),
        num_tasks: worker_count,
    }
}

/// Integer ceiling division: `q = n/d`; if `q*d < n`, `q += 1`.
fn ceil_div(n: u64, d: u64) -> u64 {
    let q = n / d;
    if q * d < n {
        q + 1
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn ceil_div_rounds_up_on_remainder() {
        assert_eq!(ceil_div(1025, 2), 513);
        assert_eq!(ceil_div(4096, 4), 1024);
        assert_eq!(ceil_div(1000, 3), 334);
    }

    #[test]
    fn ceil_div_exact_division_does_not_round_up() {
        assert_eq!(ceil_div(1024, 4), 256);
    }

    #[test]
    fn sizing_decision_none_has_zero_tasks() {
        let d = SizingDecision::none();
        assert_eq!(d.num_tasks, 0);
        assert_eq!(d.chunk_size, 0);
    }

    /// A server that answers a single HEAD request with the given headers,
    /// then closes.
    fn spawn_head_server(content_length: u64, accept_ranges: bool) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let header = if accept_ranges {
                    format!(
                        "HTTP/1.0 200 OK\r\nAccept-Ranges: bytes\r\nContent-Length: {}\r\n\r\n",
                        content_length
                    )
                } else {
                    format!("HTTP/1.0 200 OK\r\nContent-Length: {}\r\n\r\n", content_length)
                };
                let _ = stream.write_all(header.as_bytes());
            }
        });
        port
    }

    #[test]
    fn size_splits_across_workers_when_ranges_supported() {
        let port = spawn_head_server(4096, true);
        let client = HttpClient::new(Duration::from_secs(2));

        let decision = size(&client, "127.0.0.1/file.bin", 4, port);

        assert_eq!(decision.num_tasks, 4);
        assert_eq!(decision.chunk_size, 1024);
    }

    #[test]
    fn size_single_task_when_ranges_not_supported() {
        let port = spawn_head_server(10_000, false);
        let client = HttpClient::new(Duration::from_secs(2));

        let decision = size(&client, "127.0.0.1/file.bin", 4, port);

        assert_eq!(decision.num_tasks, 1);
        assert_eq!(decision.chunk_size, 10_000);
    }

    #[test]
    fn size_single_task_when_below_small_resource_threshold() {
        let port = spawn_head_server(1000, true);
        let client = HttpClient::new(Duration::from_secs(2));

        let decision = size(&client, "127.0.0.1/file.bin", 3, port);

        assert_eq!(decision.num_tasks, 1);
        assert_eq!(decision.chunk_size, 1000);
    }
}
