//! The request context — the client's only window onto HTTP.

use crate::error::ClientError;
use http::StatusCode;

/// Header set by script-driven (AJAX) requests.
pub const AJAX_HEADER: &str = "X-Requested-With";

/// Value of [`AJAX_HEADER`] identifying an AJAX request.
pub const AJAX_HEADER_VALUE: &str = "XMLHttpRequest";

/// An inbound HTTP request, its pending response, and the session store.
///
/// Implementations wrap whatever the web framework provides. A context is
/// exclusively owned by the task handling one request and is never shared
/// across requests, so implementations need no cross-request locking.
///
/// Header lookups are case-insensitive, as in HTTP.
///
/// Response writes are infallible here: committing an
/// [`HttpAction`](crate::HttpAction) must not fail halfway. Session writes
/// can fail (remote session stores) and return a [`ClientError`].
pub trait WebContext: Send + Sync {
    /// A request parameter (query string or form body), if present.
    fn request_parameter(&self, name: &str) -> Option<String>;

    /// A request header, if present.
    fn request_header(&self, name: &str) -> Option<String>;

    /// The request method.
    fn request_method(&self) -> http::Method;

    /// The full URL of the current request, query string included.
    fn full_request_url(&self) -> String;

    /// Read a session attribute.
    fn session_attribute(&self, name: &str) -> Option<serde_json::Value>;

    /// Store a session attribute. Overwrites any previous value.
    fn set_session_attribute(
        &mut self,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), ClientError>;

    /// Remove a session attribute. No-op if absent.
    fn remove_session_attribute(&mut self, name: &str) -> Result<(), ClientError>;

    /// Set the response status.
    fn set_response_status(&mut self, status: StatusCode);

    /// Set a response header.
    fn set_response_header(&mut self, name: &str, value: &str);

    /// Write the response body.
    fn write_response_content(&mut self, content: &str);
}

/// Whether the request was issued by a script rather than a full page
/// navigation. Such requests cannot follow a redirect to the provider.
pub fn is_ajax_request(ctx: &dyn WebContext) -> bool {
    ctx.request_header(AJAX_HEADER)
        .is_some_and(|v| v.eq_ignore_ascii_case(AJAX_HEADER_VALUE))
}
