//! MemoryContext — HashMap-backed WebContext for testing.

use crate::context::WebContext;
use crate::error::ClientError;
use http::{Method, StatusCode};
use std::collections::HashMap;
use url::Url;

/// Base used to resolve relative request URLs such as `/callback?x=1`.
const RELATIVE_BASE: &str = "http://localhost";

/// A request/response pair plus session, all in memory.
///
/// Query parameters are parsed from the request URL. The session can be
/// carried to the next request with [`next_request`](Self::next_request),
/// which is how multi-hop flows are simulated.
#[derive(Debug, Clone)]
pub struct MemoryContext {
    method: Method,
    url: String,
    parameters: HashMap<String, String>,
    headers: HashMap<String, String>,
    session: HashMap<String, serde_json::Value>,
    fail_session_writes: bool,
    response_status: Option<StatusCode>,
    response_headers: Vec<(String, String)>,
    response_body: String,
    status_writes: usize,
}

impl MemoryContext {
    /// A GET request for `url`, with an empty session.
    pub fn get(url: impl Into<String>) -> Self {
        let url = url.into();
        let parameters = Url::parse(RELATIVE_BASE)
            .and_then(|base| base.join(&url))
            .map(|parsed| parsed.query_pairs().into_owned().collect())
            .unwrap_or_default();
        Self {
            method: Method::GET,
            url,
            parameters,
            headers: HashMap::new(),
            session: HashMap::new(),
            fail_session_writes: false,
            response_status: None,
            response_headers: Vec::new(),
            response_body: String::new(),
            status_writes: 0,
        }
    }

    /// The next request of the same browser: a fresh request for `url`
    /// sharing this context's session.
    pub fn next_request(&self, url: impl Into<String>) -> Self {
        let mut next = Self::get(url);
        next.session = self.session.clone();
        next
    }

    /// Set the request method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a request parameter (as if posted in a form body).
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Add a request header.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Mark the request as AJAX.
    pub fn ajax(self) -> Self {
        self.with_header(crate::context::AJAX_HEADER, crate::context::AJAX_HEADER_VALUE)
    }

    /// Pre-populate a session attribute.
    pub fn with_session_attribute(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.session.insert(name.into(), value);
        self
    }

    /// Make every session write fail, to exercise fault paths.
    pub fn with_failing_session(mut self) -> Self {
        self.fail_session_writes = true;
        self
    }

    /// The committed response status, if any.
    pub fn response_status(&self) -> Option<StatusCode> {
        self.response_status
    }

    /// A committed response header (case-insensitive lookup).
    pub fn response_header(&self, name: &str) -> Option<&str> {
        self.response_headers
            .iter()
            .rev()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The committed response body.
    pub fn response_body(&self) -> &str {
        &self.response_body
    }

    /// How many times a response status was written.
    pub fn status_writes(&self) -> usize {
        self.status_writes
    }

    /// Snapshot of the session.
    pub fn session(&self) -> &HashMap<String, serde_json::Value> {
        &self.session
    }

    fn check_session_writable(&self) -> Result<(), ClientError> {
        if self.fail_session_writes {
            return Err(ClientError::Context("session store unavailable".into()));
        }
        Ok(())
    }
}

impl WebContext for MemoryContext {
    fn request_parameter(&self, name: &str) -> Option<String> {
        self.parameters.get(name).cloned()
    }

    fn request_header(&self, name: &str) -> Option<String> {
        self.headers.get(&name.to_ascii_lowercase()).cloned()
    }

    fn request_method(&self) -> Method {
        self.method.clone()
    }

    fn full_request_url(&self) -> String {
        self.url.clone()
    }

    fn session_attribute(&self, name: &str) -> Option<serde_json::Value> {
        self.session.get(name).cloned()
    }

    fn set_session_attribute(
        &mut self,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), ClientError> {
        self.check_session_writable()?;
        self.session.insert(name.to_owned(), value);
        Ok(())
    }

    fn remove_session_attribute(&mut self, name: &str) -> Result<(), ClientError> {
        self.check_session_writable()?;
        self.session.remove(name);
        Ok(())
    }

    fn set_response_status(&mut self, status: StatusCode) {
        self.response_status = Some(status);
        self.status_writes += 1;
    }

    fn set_response_header(&mut self, name: &str, value: &str) {
        self.response_headers.push((name.to_owned(), value.to_owned()));
    }

    fn write_response_content(&mut self, content: &str) {
        self.response_body.push_str(content);
    }
}
