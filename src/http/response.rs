use std::collections::HashMap;
use std::fmt;
use std::io;

use crate::http::body::{Body, MemoryBody};

pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Fixed page sent for unknown routes and missing static files.
pub const NOT_FOUND_PAGE: &str = "<html><body><h1>PAGE NOT FOUND</h1></body></html>";

/// Status codes the server itself emits.
///
/// Handlers are free to send any code through [`Response::set_status`];
/// these are shorthands for the ones the server produces on its own paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 206 Partial Content
    PartialContent,
    /// 400 Bad Request
    BadRequest,
    /// 404 Page Not Found
    NotFound,
    /// 416 Range Not Satisfiable
    RangeNotSatisfiable,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::PartialContent.as_u16(), 206);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::PartialContent => 206,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::RangeNotSatisfiable => 416,
        }
    }

    /// Returns the reason phrase sent with this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::PartialContent => "Partial Content",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Page Not Found",
            StatusCode::RangeNotSatisfiable => "Range Not Satisfiable",
        }
    }
}

/// Status line payload: numeric code plus reason phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub code: u16,
    pub reason: String,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.reason)
    }
}

impl From<StatusCode> for Status {
    fn from(code: StatusCode) -> Self {
        Status {
            code: code.as_u16(),
            reason: code.reason_phrase().to_string(),
        }
    }
}

/// Mutable response accumulated by the handling pipeline of one connection.
///
/// Nothing here touches the network; see the writer module for
/// serialization.
pub struct Response {
    pub(crate) status: Option<Status>,
    pub(crate) protocol: &'static str,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Box<dyn Body>,
    pub(crate) is_static: bool,
}

impl Response {
    pub fn new() -> Self {
        Self {
            status: None,
            protocol: HTTP_VERSION,
            headers: HashMap::new(),
            body: Box::new(MemoryBody::new()),
            is_static: false,
        }
    }

    /// Sets the status line payload. Any code and reason are accepted.
    pub fn set_status(&mut self, code: u16, reason: impl Into<String>) {
        self.status = Some(Status {
            code,
            reason: reason.into(),
        });
    }

    pub fn set_status_code(&mut self, code: StatusCode) {
        self.status = Some(code.into());
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Adds or replaces a header.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(key.into(), value.into());
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Appends bytes to the body sink.
    pub fn write_body(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.body.write_chunk(bytes)
    }

    /// Replaces the body sink, e.g. with an open file.
    pub fn set_body(&mut self, body: impl Body + 'static) {
        self.body = Box::new(body);
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Marks the response as served from the static content tree.
    pub fn mark_static(&mut self) {
        self.is_static = true;
    }

    /// Drops everything set so far so an error response can take its place.
    pub fn reset(&mut self) {
        self.status = None;
        self.headers.clear();
        self.body = Box::new(MemoryBody::new());
        self.is_static = false;
    }

    /// Overwrites the response with the fixed 404 page.
    pub fn not_found(&mut self) {
        self.reset();
        self.set_status_code(StatusCode::NotFound);
        self.set_header("Content-Type", "text/html");
        self.body = Box::new(MemoryBody::from(NOT_FOUND_PAGE.as_bytes().to_vec()));
    }

    /// Overwrites the response with an empty 400.
    pub fn bad_request(&mut self) {
        self.reset();
        self.set_status_code(StatusCode::BadRequest);
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("is_static", &self.is_static)
            .finish_non_exhaustive()
    }
}
