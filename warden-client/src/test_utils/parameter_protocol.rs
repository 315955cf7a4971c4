//! ParameterProtocol — evidence arrives as callback query parameters.

use crate::callback::append_query;
use crate::protocol::{Protocol, ProviderRedirect};
use async_trait::async_trait;
use serde_json::{Map, Value};
use warden_core::{ClientError, Credentials, Flow, HttpAction, RedirectKind, WebContext};

/// Protocol tag stamped on credentials.
pub const PARAMETER_PROTOCOL: &str = "parameter";

/// A ticket-style protocol: the provider sends the browser back with the
/// evidence in a query parameter (as CAS does with `ticket`).
///
/// - The `evidence_parameter` must be present for credentials to exist;
///   present but empty is a malformed provider response.
/// - Extra `fields` are copied into the evidence when present.
/// - A `notification_parameter` (like a CAS back-channel logout) is
///   acknowledged with a 200 and yields no credentials.
/// - A `service_parameter` adds the callback URL to the provider URL.
/// - `form_post` answers the provider redirect with a POST-binding form.
#[derive(Debug, Clone)]
pub struct ParameterProtocol {
    kind: RedirectKind,
    provider_url: String,
    evidence_parameter: String,
    fields: Vec<String>,
    notification_parameter: Option<String>,
    service_parameter: Option<String>,
    form_post: bool,
}

impl ParameterProtocol {
    /// A direct protocol redirecting to `provider_url`, reading `ticket`.
    pub fn direct(provider_url: impl Into<String>) -> Self {
        Self::new(RedirectKind::Direct, provider_url)
    }

    /// An indirect protocol redirecting to `provider_url`, reading `ticket`.
    pub fn indirect(provider_url: impl Into<String>) -> Self {
        Self::new(RedirectKind::Indirect, provider_url)
    }

    fn new(kind: RedirectKind, provider_url: impl Into<String>) -> Self {
        Self {
            kind,
            provider_url: provider_url.into(),
            evidence_parameter: "ticket".to_owned(),
            fields: Vec::new(),
            notification_parameter: None,
            service_parameter: None,
            form_post: false,
        }
    }

    /// Read the evidence from `parameter` instead of `ticket`.
    pub fn with_evidence_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.evidence_parameter = parameter.into();
        self
    }

    /// Also copy `parameter` into the evidence when present.
    pub fn with_field(mut self, parameter: impl Into<String>) -> Self {
        self.fields.push(parameter.into());
        self
    }

    /// Acknowledge requests carrying `parameter` as provider notifications.
    pub fn with_notification_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.notification_parameter = Some(parameter.into());
        self
    }

    /// Pass the callback URL to the provider in `parameter`.
    pub fn with_service_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.service_parameter = Some(parameter.into());
        self
    }

    /// Use a POST-binding form instead of a 302.
    pub fn with_form_post(mut self) -> Self {
        self.form_post = true;
        self
    }

    fn provider_location(&self, callback_url: &str) -> Result<String, ClientError> {
        match &self.service_parameter {
            Some(parameter) => append_query(&self.provider_url, &[(parameter.as_str(), callback_url)]),
            None => Ok(self.provider_url.clone()),
        }
    }
}

#[async_trait]
impl Protocol for ParameterProtocol {
    fn redirect_kind(&self) -> RedirectKind {
        self.kind
    }

    async fn provider_redirect(
        &self,
        _ctx: &dyn WebContext,
        callback_url: &str,
    ) -> Result<ProviderRedirect, ClientError> {
        let location = self.provider_location(callback_url)?;
        if self.form_post {
            return Ok(ProviderRedirect::FormPost(format!(
                "<html><body onload=\"document.forms[0].submit()\">\
                 <form method=\"post\" action=\"{}\"></form></body></html>",
                escape_attribute(&location)
            )));
        }
        Ok(ProviderRedirect::Location(location))
    }

    async fn retrieve_credentials(
        &self,
        ctx: &mut dyn WebContext,
    ) -> Result<Flow<Option<Credentials>>, ClientError> {
        if let Some(parameter) = &self.notification_parameter {
            if ctx.request_parameter(parameter).is_some() {
                return Ok(Flow::Action(HttpAction::ok()));
            }
        }

        let Some(evidence) = ctx.request_parameter(&self.evidence_parameter) else {
            return Ok(Flow::Continue(None));
        };
        if evidence.is_empty() {
            return Err(ClientError::MalformedResponse(format!(
                "empty `{}` parameter",
                self.evidence_parameter
            )));
        }

        let mut fields = Map::new();
        fields.insert(self.evidence_parameter.clone(), Value::String(evidence));
        for field in &self.fields {
            if let Some(value) = ctx.request_parameter(field) {
                fields.insert(field.clone(), Value::String(value));
            }
        }
        Ok(Flow::Continue(Some(Credentials::new(
            PARAMETER_PROTOCOL,
            Value::Object(fields),
        ))))
    }
}

/// Escape a value for a double-quoted HTML attribute.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
