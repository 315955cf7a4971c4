//! HTTP actions — control signals a client hands back to its caller.
//!
//! A client never writes the response itself. When the protocol requires a
//! specific response (redirect to the provider, prompt for credentials,
//! refuse access) it returns an [`HttpAction`], and the integration layer
//! commits it exactly once with [`HttpAction::commit`]. After that, the
//! request is finished: nothing else may write to the context.

use crate::context::WebContext;
use http::StatusCode;
use http::header::{CONTENT_TYPE, LOCATION, WWW_AUTHENTICATE};

/// The response a caller must commit instead of continuing normally.
///
/// Single-use: [`commit`](Self::commit) takes `self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpAction {
    status: StatusCode,
    location: Option<String>,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl HttpAction {
    /// A status-only action.
    pub fn with_status(status: StatusCode) -> Self {
        Self {
            status,
            location: None,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 302 to `location` (the provider, or the application callback).
    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Self::with_status(StatusCode::FOUND)
        }
    }

    /// 401, authentication required. No redirect.
    pub fn unauthorized() -> Self {
        Self::with_status(StatusCode::UNAUTHORIZED)
    }

    /// 401 carrying a `WWW-Authenticate` challenge, so browsers present
    /// their native credential prompt.
    pub fn unauthorized_with_challenge(scheme: &str, realm: &str) -> Self {
        Self::unauthorized().with_header(
            WWW_AUTHENTICATE.as_str(),
            format!("{scheme} realm=\"{realm}\""),
        )
    }

    /// 403, a protected target after a known failed attempt.
    pub fn forbidden() -> Self {
        Self::with_status(StatusCode::FORBIDDEN)
    }

    /// 200, acknowledging an out-of-band provider notification.
    pub fn ok() -> Self {
        Self::with_status(StatusCode::OK)
    }

    /// 200 with a body.
    pub fn ok_with_body(body: impl Into<String>) -> Self {
        Self::ok().with_body(body)
    }

    /// 200 with an HTML page that auto-submits a form to the provider
    /// (POST binding). The browser performs the hop instead of following
    /// a `Location`.
    pub fn form_post(html: impl Into<String>) -> Self {
        Self::ok_with_body(html).with_header(CONTENT_TYPE.as_str(), "text/html; charset=utf-8")
    }

    /// Add a response header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the response body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The redirect target, for redirects.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Extra headers, in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Whether this action sends the browser elsewhere.
    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection() && self.location.is_some()
    }

    /// Materialize the action into the response. Consumes the action.
    pub fn commit(self, ctx: &mut dyn WebContext) {
        ctx.set_response_status(self.status);
        if let Some(location) = &self.location {
            ctx.set_response_header(LOCATION.as_str(), location);
        }
        for (name, value) in &self.headers {
            ctx.set_response_header(name, value);
        }
        if let Some(body) = &self.body {
            ctx.write_response_content(body);
        }
    }
}

impl std::fmt::Display for HttpAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} -> {location}", self.status.as_u16()),
            None => write!(f, "{}", self.status.as_u16()),
        }
    }
}

/// The outcome of an operation that may have to short-circuit the request.
///
/// Either the operation produced its value and the caller carries on, or
/// it produced an [`HttpAction`] and the caller must commit it and stop.
#[must_use = "an HTTP action must be committed; the request cannot continue"]
#[derive(Debug, Clone, PartialEq)]
pub enum Flow<T> {
    /// Carry on with the value.
    Continue(T),
    /// Commit this action and stop processing the request.
    Action(HttpAction),
}

impl<T> Flow<T> {
    /// Map the continue value, passing actions through untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Flow<U> {
        match self {
            Flow::Continue(value) => Flow::Continue(f(value)),
            Flow::Action(action) => Flow::Action(action),
        }
    }

    /// Whether the caller must stop and commit an action.
    pub fn is_action(&self) -> bool {
        matches!(self, Flow::Action(_))
    }

    /// Borrow the action, if any.
    pub fn action(&self) -> Option<&HttpAction> {
        match self {
            Flow::Action(action) => Some(action),
            Flow::Continue(_) => None,
        }
    }

    /// The continue value, discarding an action.
    pub fn into_continue(self) -> Option<T> {
        match self {
            Flow::Continue(value) => Some(value),
            Flow::Action(_) => None,
        }
    }
}

impl<T> From<HttpAction> for Flow<T> {
    fn from(action: HttpAction) -> Self {
        Flow::Action(action)
    }
}
