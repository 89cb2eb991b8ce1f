// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal HTTP/1.1 client over TCP.
//!
//! One connection per request. Responses are framed by chunked transfer
//! encoding or Content-Length, else read to EOF (requests ask for
//! `Connection: close`). Bodies are capped at `MAX_BODY_BYTES`.

use crate::gateway::GatewayError;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

/// Parsed `http://host[:port][/prefix]` base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// `host:port` to connect to
    addr: String,
    /// Value of the Host header
    host: String,
    /// Path prefix without a trailing slash (may be empty)
    prefix: String,
}

impl Endpoint {
    pub fn parse(url: &str) -> Result<Self, GatewayError> {
        let url = url.trim();
        let rest = url.strip_prefix("http://").ok_or_else(|| {
            GatewayError::Transport(format!("unsupported base URL (expected http://): {url}"))
        })?;
        let (authority, prefix) = match rest.find('/') {
            Some(slash) => rest.split_at(slash),
            None => (rest, ""),
        };
        if authority.is_empty() {
            return Err(GatewayError::Transport(format!("missing host in base URL: {url}")));
        }
        let addr = if authority.rsplit_once(':').is_some_and(|(_, port)| !port.contains(']')) {
            authority.to_string()
        } else {
            format!("{authority}:80")
        };
        Ok(Self {
            addr,
            host: authority.to_string(),
            prefix: prefix.trim_end_matches('/').to_string(),
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    fn target(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }
}

pub async fn get(endpoint: &Endpoint, path: &str, timeout: Duration) -> Result<String, GatewayError> {
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nAccept: application/json\r\nConnection: close\r\n\r\n",
        endpoint.target(path),
        endpoint.host
    );
    timed_request(endpoint, &request, timeout).await
}

pub async fn post(
    endpoint: &Endpoint,
    path: &str,
    body: &str,
    timeout: Duration,
) -> Result<String, GatewayError> {
    let request = format!(
        "POST {} HTTP/1.1\r\nHost: {}\r\nAccept: application/json\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        endpoint.target(path),
        endpoint.host,
        body.len(),
        body
    );
    timed_request(endpoint, &request, timeout).await
}

/// Connect, send, and read under one timeout covering the whole exchange.
async fn timed_request(
    endpoint: &Endpoint,
    request: &str,
    timeout: Duration,
) -> Result<String, GatewayError> {
    tokio::time::timeout(timeout, send_request(endpoint, request)).await.map_err(|_| {
        GatewayError::Transport(format!("request to {} timed out after {}ms", endpoint.addr, timeout.as_millis()))
    })?
}

async fn send_request(endpoint: &Endpoint, request: &str) -> Result<String, GatewayError> {
    let mut stream = TcpStream::connect(&endpoint.addr).await.map_err(|e| {
        GatewayError::Transport(format!("connect to {} failed: {}", endpoint.addr, e))
    })?;
    stream
        .write_all(request.as_bytes())
        .await
        .map_err(|e| GatewayError::Transport(format!("write failed: {}", e)))?;

    let mut reader = BufReader::new(&mut stream);
    read_http_response(&mut reader).await
}

/// Largest response body accepted, whatever the headers claim.
pub(crate) const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

enum Framing {
    Length(usize),
    Chunked,
    Eof,
}

fn read_error(what: &str, e: std::io::Error) -> GatewayError {
    GatewayError::Transport(format!("read {} failed: {}", what, e))
}

fn too_large() -> GatewayError {
    GatewayError::Transport(format!("response body exceeds {} bytes", MAX_BODY_BYTES))
}

/// Read and parse an HTTP/1.1 response. Statuses >= 400 become
/// `Transport("HTTP {code}: {message}")`.
pub(crate) async fn read_http_response<R: AsyncRead + Unpin>(
    reader: &mut BufReader<R>,
) -> Result<String, GatewayError> {
    let mut status_line = String::new();
    reader.read_line(&mut status_line).await.map_err(|e| read_error("status", e))?;
    let status_code = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or_else(|| GatewayError::Transport(format!("malformed status line: {:?}", status_line.trim())))?;

    // Header names are case-insensitive; chunked wins over Content-Length
    let mut content_length: Option<usize> = None;
    let mut chunked = false;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).await.map_err(|e| read_error("header", e))?;
        if line == "\r\n" || line == "\n" || line.is_empty() {
            break;
        }
        let line_lower = line.to_ascii_lowercase();
        if let Some(val) = line_lower.strip_prefix("content-length:") {
            content_length = val.trim().parse().ok();
        } else if let Some(val) = line_lower.strip_prefix("transfer-encoding:") {
            chunked = val.split(',').any(|coding| coding.trim() == "chunked");
        }
    }
    let framing = match (chunked, content_length) {
        (true, _) => Framing::Chunked,
        (false, Some(len)) => Framing::Length(len),
        (false, None) => Framing::Eof,
    };

    let buf = read_body(reader, framing).await?;
    let body = String::from_utf8_lossy(&buf).into_owned();

    if status_code >= 400 {
        return Err(GatewayError::Transport(format!(
            "HTTP {}: {}",
            status_code,
            lc_wire::error_message(&body)
        )));
    }

    Ok(body)
}

async fn read_body<R: AsyncRead + Unpin>(
    reader: &mut BufReader<R>,
    framing: Framing,
) -> Result<Vec<u8>, GatewayError> {
    let mut buf = Vec::new();
    match framing {
        Framing::Length(len) => {
            if len > MAX_BODY_BYTES {
                return Err(too_large());
            }
            read_at_most(reader, len, &mut buf).await?;
            if buf.len() < len {
                return Err(GatewayError::Transport(format!(
                    "read body failed: expected {} bytes, got {}",
                    len,
                    buf.len()
                )));
            }
        }
        Framing::Eof => {
            read_at_most(reader, MAX_BODY_BYTES + 1, &mut buf).await?;
            if buf.len() > MAX_BODY_BYTES {
                return Err(too_large());
            }
        }
        Framing::Chunked => read_chunks(reader, &mut buf).await?,
    }
    Ok(buf)
}

async fn read_at_most<R: AsyncRead + Unpin>(
    reader: &mut BufReader<R>,
    limit: usize,
    buf: &mut Vec<u8>,
) -> Result<(), GatewayError> {
    (&mut *reader)
        .take(limit as u64)
        .read_to_end(buf)
        .await
        .map_err(|e| read_error("body", e))?;
    Ok(())
}

/// De-chunk a `Transfer-Encoding: chunked` body: `<hex size>[;ext]\r\n<data>\r\n`
/// repeated, ending with a zero-size chunk and optional trailers.
async fn read_chunks<R: AsyncRead + Unpin>(
    reader: &mut BufReader<R>,
    buf: &mut Vec<u8>,
) -> Result<(), GatewayError> {
    loop {
        let mut size_line = String::new();
        reader.read_line(&mut size_line).await.map_err(|e| read_error("chunk size", e))?;
        let digits = size_line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(digits, 16).map_err(|_| {
            GatewayError::Transport(format!("malformed chunk size: {:?}", size_line.trim()))
        })?;
        if size == 0 {
            break;
        }
        if buf.len().saturating_add(size) > MAX_BODY_BYTES {
            return Err(too_large());
        }
        let start = buf.len();
        read_at_most(reader, size, buf).await?;
        if buf.len() - start < size {
            return Err(GatewayError::Transport("read chunk failed: unexpected end of body".into()));
        }
        let mut crlf = String::new();
        reader.read_line(&mut crlf).await.map_err(|e| read_error("chunk", e))?;
    }
    // Trailer section, up to the blank line or EOF
    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).await.map_err(|e| read_error("trailer", e))?;
        if n == 0 || line == "\r\n" || line == "\n" {
            return Ok(());
        }
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
