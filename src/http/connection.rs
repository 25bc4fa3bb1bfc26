use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, warn};

use crate::error::ServerError;
use crate::http::parser::parse_request;
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::server::Server;

/// Serves exactly one request/response exchange over `stream`.
pub struct Connection<S> {
    stream: S,
    response: Response,
    state: ConnectionState,
}

pub enum ConnectionState {
    Parsing,
    Dispatching(Request),
    /// The request is absent when parsing itself failed.
    Serializing(Option<Request>),
    Closed,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Connection<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            response: Response::new(),
            state: ConnectionState::Parsing,
        }
    }

    /// Drives the connection to `Closed` and hands the stream back.
    ///
    /// Every failure after the first byte arrives still produces a
    /// complete response before the stream is released.
    pub async fn run(mut self, server: &Server) -> S {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Parsing => {
                    let mut reader = BufReader::new(&mut self.stream);
                    self.state = match parse_request(&mut reader).await {
                        Ok(request) => ConnectionState::Dispatching(request),
                        Err(ServerError::ConnectionClosed) => {
                            debug!("Peer closed connection without a request");
                            ConnectionState::Closed
                        }
                        Err(e) => {
                            recover(&mut self.response, &e);
                            ConnectionState::Serializing(None)
                        }
                    };
                }

                ConnectionState::Dispatching(request) => {
                    if let Err(e) = server.router().dispatch(&request, &mut self.response) {
                        recover(&mut self.response, &e);
                    }
                    self.state = ConnectionState::Serializing(Some(request));
                }

                ConnectionState::Serializing(request) => {
                    self.finish(server, request.as_ref()).await;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        self.stream
    }

    /// Writes headers then body. Shared tail of the success and failure paths.
    async fn finish(&mut self, server: &Server, request: Option<&Request>) {
        let head = match self
            .response
            .serialize_headers(request, server.static_files())
            .await
        {
            Ok(head) => head,
            Err(e) => {
                // Static resolution failed; recovery clears the static flag so
                // the second pass cannot fail again.
                recover(&mut self.response, &e);
                match self
                    .response
                    .serialize_headers(request, server.static_files())
                    .await
                {
                    Ok(head) => head,
                    Err(e) => {
                        error!(error = %e, "Unable to serialize error response");
                        return;
                    }
                }
            }
        };

        if let Err(e) = self.stream.write_all(&head).await {
            debug!(error = %e, "Peer went away before headers were sent");
            return;
        }

        self.response.stream_body(&mut self.stream).await;
    }
}

/// Replaces the in-progress response according to the failure kind.
fn recover(response: &mut Response, err: &ServerError) {
    match err {
        ServerError::MalformedRequest(_) | ServerError::InvalidRange(_) => {
            warn!(error = %err, "Rejecting bad request");
            response.bad_request();
        }
        ServerError::ResourceNotFound(path) => {
            debug!(path = %path, "Resource not found");
            response.not_found();
        }
        ServerError::RangeNotSatisfiable(size) => {
            warn!(error = %err, "Rejecting unsatisfiable range");
            response.reset();
            response.set_status_code(StatusCode::RangeNotSatisfiable);
            response.set_header("Content-Range", format!("bytes */{}", size));
        }
        ServerError::ConnectionClosed
        | ServerError::Handler(_)
        | ServerError::Panic(_)
        | ServerError::Io(_) => {
            error!(error = %err, "Recovered from failure while handling request");
            if response.is_static() {
                response.reset();
            }
            if response.status().is_none() {
                response.set_status_code(StatusCode::Ok);
            }
        }
    }
}
