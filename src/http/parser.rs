use std::collections::HashMap;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::error::{Result, ServerError};
use crate::http::request::Request;

/// Upper bound on the request line plus headers, in bytes.
pub const MAX_HEAD_SIZE: usize = 64 * 1024;

/// Reads one request head (request line + headers) off `reader`.
///
/// Stops at the blank line; anything after it is left unread. An empty
/// stream yields [`ServerError::ConnectionClosed`]; a head longer than
/// [`MAX_HEAD_SIZE`] is malformed.
pub async fn parse_request<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Request> {
    let mut budget = MAX_HEAD_SIZE;
    let (request_line, read) = read_line(reader, &mut budget).await?;

    if read == 0 {
        return Err(ServerError::ConnectionClosed);
    }

    let parts: Vec<&str> = request_line.split(' ').collect();
    if parts.len() < 3 {
        return Err(ServerError::MalformedRequest(format!(
            "request line has {} token(s): {:?}",
            parts.len(),
            request_line
        )));
    }

    let (method, path, protocol) = (parts[0], parts[1], parts[2]);
    if !path.starts_with('/') {
        return Err(ServerError::MalformedRequest(format!(
            "request path must start with '/': {:?}",
            path
        )));
    }

    // Headers
    let mut headers = HashMap::new();

    loop {
        let (line, read) = read_line(reader, &mut budget).await?;

        if read == 0 {
            return Err(ServerError::MalformedRequest(
                "stream ended before end of headers".to_string(),
            ));
        }

        if line.is_empty() {
            break;
        }

        let (key, value) = line.split_once(": ").ok_or_else(|| {
            ServerError::MalformedRequest(format!("invalid header line: {:?}", line))
        })?;

        headers.insert(key.to_string(), value.to_string());
    }

    Ok(Request {
        method: method.to_string(),
        path: path.to_string(),
        protocol: protocol.to_string(),
        headers,
    })
}

/// Reads up to and including '\n', returning the line without its CRLF and
/// the raw byte count. Consumed bytes are charged against `budget`.
async fn read_line<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    budget: &mut usize,
) -> Result<(String, usize)> {
    let mut raw = Vec::new();
    let read = (&mut *reader)
        .take(*budget as u64)
        .read_until(b'\n', &mut raw)
        .await
        .map_err(|e| ServerError::MalformedRequest(format!("read failed: {}", e)))?;

    if read == *budget && !raw.ends_with(b"\n") {
        return Err(ServerError::MalformedRequest(format!(
            "request head exceeds {} bytes",
            MAX_HEAD_SIZE
        )));
    }
    *budget -= read;

    let line = String::from_utf8(raw)
        .map_err(|_| ServerError::MalformedRequest("request head is not UTF-8".to_string()))?;

    Ok((line.trim_end_matches(['\r', '\n']).to_string(), read))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parse_simple_get() {
        let mut req = &b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n"[..];

        let parsed = parse_request(&mut req).await.unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.header("Host"), Some("example.com"));
    }

    #[tokio::test]
    async fn header_value_keeps_inner_separator() {
        let mut req = &b"GET / HTTP/1.1\r\nX-Note: a: b\r\n\r\n"[..];

        let parsed = parse_request(&mut req).await.unwrap();

        assert_eq!(parsed.header("X-Note"), Some("a: b"));
    }
}
