//! HTTP protocol implementation.
//!
//! One request per connection: the connection is always closed after the
//! response body has been streamed.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection lifecycle and error recovery
//! - **`parser`**: reads the request line and headers off a byte stream
//! - **`request`**: parsed request representation
//! - **`response`**: mutable response accumulated by handlers
//! - **`body`**: byte sinks backing a response body (memory or file)
//! - **`writer`**: header block serialization and chunked body copying
//! - **`range`**: `Range` header parsing
//! - **`static_files`**: filesystem responses for the `static/` prefix
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Parsing   │ ← Read request line + headers
//!        └──────┬──────┘
//!               │ Request parsed          (malformed → 400)
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Route, static prefix or 404
//!        └──────┬───────────┘
//!               │ Response filled in      (failure → recovered response)
//!               ▼
//!        ┌──────────────────┐
//!        │   Serializing    │ ← Headers, then body in 64 KiB chunks
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use hearth::server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut server = Server::new();
//!     server.handle_func("/hello", |_req, res| {
//!         res.write_body(b"hello")?;
//!         Ok(())
//!     });
//!     server.listen("127.0.0.1", 8080).await
//! }
//! ```

pub mod body;
pub mod connection;
pub mod parser;
pub mod range;
pub mod request;
pub mod response;
pub mod static_files;
pub mod writer;
