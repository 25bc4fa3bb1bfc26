//! Byte sinks backing a [`Response`](crate::http::response::Response) body.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Buf, BytesMut};
use tokio::fs::File;
use tokio::io::{AsyncRead, ReadBuf};

/// A body store that is read asynchronously when streamed to the peer.
///
/// Bytes appended with [`Body::write_chunk`] are read back in the same
/// order.
pub trait Body: AsyncRead + Send + Unpin {
    /// Appends bytes to the sink.
    fn write_chunk(&mut self, data: &[u8]) -> io::Result<()>;

    /// Number of bytes left to read, when known without I/O.
    fn remaining(&self) -> Option<u64> {
        None
    }
}

/// In-memory FIFO body; the default sink of every response.
#[derive(Debug, Default)]
pub struct MemoryBody {
    buf: BytesMut,
}

impl MemoryBody {
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<Vec<u8>> for MemoryBody {
    fn from(data: Vec<u8>) -> Self {
        Self {
            buf: BytesMut::from(&data[..]),
        }
    }
}

impl AsyncRead for MemoryBody {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        out: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let n = out.remaining().min(this.buf.len());
        out.put_slice(&this.buf[..n]);
        this.buf.advance(n);
        Poll::Ready(Ok(()))
    }
}

impl Body for MemoryBody {
    fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(data);
        Ok(())
    }

    fn remaining(&self) -> Option<u64> {
        Some(self.buf.len() as u64)
    }
}

/// Static files are opened read-only.
impl Body for File {
    fn write_chunk(&mut self, _data: &[u8]) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "file bodies are read-only",
        ))
    }
}
