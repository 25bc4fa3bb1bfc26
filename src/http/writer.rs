use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::error::Result;
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::static_files::StaticFiles;

/// Chunk size used when copying a body onto the connection.
pub const CHUNK_SIZE: usize = 64 * 1024;

impl Response {
    /// Builds the full header block: status line, headers, blank line.
    ///
    /// Static responses are resolved against `files` first, which may fail
    /// and leave the response half-filled; callers reset it before retrying.
    pub async fn serialize_headers(
        &mut self,
        request: Option<&Request>,
        files: &StaticFiles,
    ) -> Result<BytesMut> {
        if self.is_static {
            if let Some(request) = request {
                files.prepare(request, self).await?;
            }
        }

        if !self.headers.contains_key("Content-Length") {
            if let Some(len) = self.body.remaining() {
                self.headers
                    .insert("Content-Length".to_string(), len.to_string());
            }
        }

        let status = self
            .status
            .get_or_insert_with(|| StatusCode::Ok.into());

        let mut buf = BytesMut::new();

        // Status line
        buf.put_slice(format!("{} {}\r\n", self.protocol, status).as_bytes());

        // Headers
        for (k, v) in &self.headers {
            buf.put_slice(k.as_bytes());
            buf.put_slice(b": ");
            buf.put_slice(v.as_bytes());
            buf.put_slice(b"\r\n");
        }

        // Header/body separator
        buf.put_slice(b"\r\n");

        Ok(buf)
    }

    /// Copies the body sink onto `conn` in [`CHUNK_SIZE`] pieces.
    ///
    /// A failed write means the peer went away; the rest of the body is
    /// dropped without raising an error.
    pub async fn stream_body<W: AsyncWrite + Unpin>(&mut self, conn: &mut W) {
        let mut chunk = vec![0u8; CHUNK_SIZE];

        loop {
            let n = match self.body.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, "Failed to read response body");
                    break;
                }
            };

            if let Err(e) = conn.write_all(&chunk[..n]).await {
                debug!(error = %e, "Peer stopped accepting body bytes");
                return;
            }
        }

        let _ = conn.flush().await;
    }
}
