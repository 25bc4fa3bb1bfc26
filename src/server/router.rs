//! Exact-path route table and dispatch.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::debug;

use crate::error::{Result, ServerError};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::static_files::is_static_path;

/// Caller-supplied function that fills in a response for a request.
pub type Handler = Box<dyn Fn(&Request, &mut Response) -> anyhow::Result<()> + Send + Sync>;

#[derive(Default)]
pub struct Router {
    routes: HashMap<String, Handler>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for requests whose path equals `path` exactly.
    /// Registering the same path twice replaces the earlier handler.
    pub fn register<F>(&mut self, path: impl Into<String>, handler: F)
    where
        F: Fn(&Request, &mut Response) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.routes.insert(path.into(), Box::new(handler));
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Selects and runs the handler for `request`.
    ///
    /// Registered routes win over the static prefix. On success the status
    /// defaults to 200 OK when the handler left it unset.
    pub fn dispatch(&self, request: &Request, response: &mut Response) -> Result<()> {
        if let Some(handler) = self.routes.get(&request.path) {
            debug!(path = %request.path, "Dispatching to registered route");
            run_handler(handler, request, response)?;
        } else if is_static_path(request) {
            debug!(path = %request.path, "Deferring to static content");
            response.mark_static();
        } else {
            response.set_header("Content-Type", "text/html");
            return Err(ServerError::ResourceNotFound(request.path.clone()));
        }

        if response.status().is_none() {
            response.set_status_code(StatusCode::Ok);
        }

        Ok(())
    }
}

fn run_handler(handler: &Handler, request: &Request, response: &mut Response) -> Result<()> {
    match catch_unwind(AssertUnwindSafe(|| handler(request, response))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(ServerError::Handler(e)),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic payload".to_string());
            Err(ServerError::Panic(message))
        }
    }
}
