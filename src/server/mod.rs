//! Server setup API: route registration and listening.

pub mod listener;
pub mod router;

use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::static_files::StaticFiles;
use router::Router;

/// Route table plus static responder, shared read-only by every connection
/// once listening starts.
pub struct Server {
    router: Router,
    static_files: StaticFiles,
}

impl Server {
    /// Creates a server that resolves static content against the working
    /// directory.
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            static_files: StaticFiles::default(),
        }
    }

    pub fn with_config(cfg: &Config) -> Self {
        Self {
            router: Router::new(),
            static_files: StaticFiles::new(&cfg.static_root),
        }
    }

    /// Registers a handler for an exact request path.
    pub fn handle_func<F>(&mut self, path: impl Into<String>, handler: F)
    where
        F: Fn(&Request, &mut Response) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.router.register(path, handler);
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn static_files(&self) -> &StaticFiles {
        &self.static_files
    }

    /// Binds `addr:port` and serves until the accept loop fails.
    pub async fn listen(self, addr: &str, port: u16) -> anyhow::Result<()> {
        let listener = TcpListener::bind((addr, port)).await?;
        info!("Started server at {}:{}", addr, port);
        listener::run(Arc::new(self), listener).await
    }

    /// Serves one accepted connection to completion, then closes it.
    pub async fn handle_connection(&self, stream: TcpStream) {
        let mut stream = Connection::new(stream).run(self).await;
        let _ = stream.shutdown().await;
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}
