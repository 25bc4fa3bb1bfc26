use std::collections::HashMap;

/// Represents a parsed HTTP request from a client.
///
/// Only the request line and headers are read off the wire; request bodies
/// are never consumed. Header names are kept exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Method token as sent (e.g. "GET")
    pub method: String,
    /// Request target, always starting with '/'
    pub path: String,
    /// Protocol token (typically "HTTP/1.1")
    pub protocol: String,
    /// Request headers; a repeated name keeps the last value
    pub headers: HashMap<String, String>,
}

/// Builder for constructing Request objects outside the wire parser.
pub struct RequestBuilder {
    method: String,
    path: Option<String>,
    protocol: String,
    headers: HashMap<String, String>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: "GET".to_string(),
            path: None,
            protocol: "HTTP/1.1".to_string(),
            headers: HashMap::new(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let path = self.path.ok_or("path missing")?;
        if !path.starts_with('/') {
            return Err("path must start with '/'");
        }

        Ok(Request {
            method: self.method,
            path,
            protocol: self.protocol,
            headers: self.headers,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Retrieves a header value by its exact name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// Path without its leading '/'.
    pub fn relative_path(&self) -> &str {
        self.path.strip_prefix('/').unwrap_or(&self.path)
    }

    /// First segment of the path after the leading '/'.
    ///
    /// ```
    /// # use hearth::http::request::RequestBuilder;
    /// let req = RequestBuilder::new().path("/static/app.js").build().unwrap();
    /// assert_eq!(req.first_segment(), "static");
    /// ```
    pub fn first_segment(&self) -> &str {
        self.relative_path().split('/').next().unwrap_or("")
    }
}
