//! Raw HTTP page fetching
//!
//! One page fetch is one TCP connection: connect, send a minimal HTTP/1.1
//! GET with `Connection: close`, then read until the peer closes. The
//! response time is measured to the first received chunk, so a slowly
//! trickling body does not inflate the metric. The raw byte stream is kept
//! as opaque text for the link extractor; there is no status-line, header,
//! or chunked-encoding parsing, and redirects are not followed.

use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Bound on establishing the TCP connection
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Bound on each individual send or receive
pub const IO_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of fetching a single page
#[derive(Debug)]
pub enum FetchResult {
    /// At least one chunk arrived; `body` is everything read before the
    /// connection closed or a read failed mid-stream
    Received { body: String, response_time_ms: f64 },

    /// Connect or send failed, or the peer closed without sending a byte
    Failed { reason: String },
}

/// Builds the request line and headers for one page
pub fn build_request(hostname: &str, path: &str) -> String {
    format!("GET {path} HTTP/1.1\r\nHost: {hostname}\r\nConnection: close\r\n\r\n")
}

/// Fetches one page over a fresh connection
///
/// Failures are reported, never retried; the caller decides how to record
/// them.
pub async fn fetch_page(addr: SocketAddr, hostname: &str, path: &str) -> FetchResult {
    let mut stream = match timeout(CONNECT_TIMEOUT, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            return FetchResult::Failed {
                reason: format!("connect failed: {}", e),
            }
        }
        Err(_) => {
            return FetchResult::Failed {
                reason: "connect timed out".to_string(),
            }
        }
    };

    let request = build_request(hostname, path);
    let sent_at = Instant::now();
    match timeout(IO_TIMEOUT, stream.write_all(request.as_bytes())).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            return FetchResult::Failed {
                reason: format!("send failed: {}", e),
            }
        }
        Err(_) => {
            return FetchResult::Failed {
                reason: "send timed out".to_string(),
            }
        }
    }

    let mut raw = Vec::new();
    let mut chunk = [0u8; 4096];
    let mut response_time_ms = None;

    loop {
        let read = match timeout(IO_TIMEOUT, stream.read(&mut chunk)).await {
            Ok(Ok(n)) => n,
            // A failed or timed-out read ends the response; whatever arrived
            // before it still counts.
            Ok(Err(_)) | Err(_) => break,
        };
        if read == 0 {
            break;
        }
        if response_time_ms.is_none() {
            response_time_ms = Some(sent_at.elapsed().as_secs_f64() * 1000.0);
        }
        raw.extend_from_slice(&chunk[..read]);
    }

    match response_time_ms {
        Some(ms) => FetchResult::Received {
            body: String::from_utf8_lossy(&raw).into_owned(),
            response_time_ms: ms,
        },
        None => FetchResult::Failed {
            reason: "no response received".to_string(),
        },
    }
}
