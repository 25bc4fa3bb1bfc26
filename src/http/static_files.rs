//! Filesystem-backed responses for the `static/` path prefix.
//!
//! The request path is resolved as-is (including the `static/` segment)
//! against the configured root. Paths containing `..` are refused.

use std::io::{SeekFrom, Write};
use std::path::{Component, Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::debug;

use crate::error::{Result, ServerError};
use crate::http::body::MemoryBody;
use crate::http::range::ByteRange;
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};

/// First path segment that routes a request to the filesystem.
pub const STATIC_PREFIX: &str = "static";

/// Returns true when the request targets the static content tree.
pub fn is_static_path(request: &Request) -> bool {
    request.first_segment() == STATIC_PREFIX
}

#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Opens the file behind `request` and fills in the static headers,
    /// status and body of `response`.
    ///
    /// A `Range` start is honored for every file type; `Content-Length`
    /// always counts the bytes actually sent.
    pub async fn prepare(&self, request: &Request, response: &mut Response) -> Result<()> {
        let relative = Path::new(request.relative_path());
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(ServerError::ResourceNotFound(request.path.clone()));
        }

        let full_path = self.root.join(relative);
        let mut file = File::open(&full_path)
            .await
            .map_err(|_| ServerError::ResourceNotFound(request.path.clone()))?;

        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(ServerError::ResourceNotFound(request.path.clone()));
        }
        let size = metadata.len();

        response.set_header("Content-Length", size.to_string());
        response.set_header("Accept-Ranges", "bytes");

        let range = request
            .header("Range")
            .map(ByteRange::parse)
            .transpose()?;

        if let Some(range) = range {
            if range.start > 0 && range.start >= size {
                return Err(ServerError::RangeNotSatisfiable(size));
            }
            file.seek(SeekFrom::Start(range.start)).await?;
            response.set_header("Content-Length", (size - range.start).to_string());
        }

        debug!(path = %full_path.display(), size, ?range, "Serving static file");

        match full_path.extension().and_then(|ext| ext.to_str()) {
            Some("html") => {
                response.set_header("Content-Type", "text/html");
                response.set_header("Content-Encoding", "gzip");
            }
            Some("mp4") => {
                response.set_header("Content-Type", "video/mp4");
                if let Some(range) = range {
                    response.set_status_code(StatusCode::PartialContent);
                    response.set_header(
                        "Content-Range",
                        format!(
                            "bytes {}-{}/{}",
                            range.start,
                            size.saturating_sub(1),
                            size
                        ),
                    );
                }
            }
            Some("js") => {
                response.set_header("Content-Type", "application/javascript");
            }
            _ => {}
        }

        if response.header("Content-Encoding").is_some() {
            let compressed = gzip(&mut file).await?;
            response.set_header("Content-Length", compressed.len().to_string());
            response.set_body(MemoryBody::from(compressed));
        } else {
            response.set_body(file);
        }

        Ok(())
    }
}

impl Default for StaticFiles {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Drains the rest of `file` and compresses it as one gzip member.
async fn gzip(file: &mut File) -> std::io::Result<Vec<u8>> {
    let mut content = Vec::new();
    file.read_to_end(&mut content).await?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&content)?;
    encoder.finish()
}
