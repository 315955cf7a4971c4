//! The per-protocol half of a client.

use async_trait::async_trait;
use warden_core::{ClientError, Credentials, Flow, HttpAction, RedirectKind, WebContext};

/// How the provider wants the browser delivered to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderRedirect {
    /// A plain 302 to this URL.
    Location(String),
    /// An HTML page that auto-submits a form to the provider (POST binding).
    FormPost(String),
}

impl From<ProviderRedirect> for HttpAction {
    fn from(redirect: ProviderRedirect) -> Self {
        match redirect {
            ProviderRedirect::Location(url) => HttpAction::redirect(url),
            ProviderRedirect::FormPost(html) => HttpAction::form_post(html),
        }
    }
}

/// What a concrete protocol (OAuth, CAS, SAML, Basic, ...) contributes.
///
/// A protocol knows how to reach its provider and how to read the
/// provider's answer. Everything else (AJAX and protected-target
/// handling, the indirect double hop, attempt tracking, name stamping,
/// profile resolution) is the same for every protocol and lives in
/// [`BaseClient`](crate::BaseClient).
///
/// Protocols are shared across concurrent requests; any caching they do
/// must be internally synchronized.
#[async_trait]
pub trait Protocol: Send + Sync {
    /// Whether this protocol normally redirects directly or indirectly.
    fn redirect_kind(&self) -> RedirectKind;

    /// Where to send the browser to authenticate at the provider.
    /// `callback_url` is where the provider must send it back.
    async fn provider_redirect(
        &self,
        ctx: &dyn WebContext,
        callback_url: &str,
    ) -> Result<ProviderRedirect, ClientError>;

    /// Read the provider's evidence from the callback request.
    ///
    /// `Continue(None)` when there is no usable evidence. An action for
    /// out-of-band notifications (200) or missing inline credentials
    /// (401). `Err` only for genuine faults.
    async fn retrieve_credentials(
        &self,
        ctx: &mut dyn WebContext,
    ) -> Result<Flow<Option<Credentials>>, ClientError>;
}
