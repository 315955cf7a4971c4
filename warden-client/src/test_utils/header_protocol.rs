//! HeaderProtocol — credentials sent inline on every request.

use crate::protocol::{Protocol, ProviderRedirect};
use async_trait::async_trait;
use serde_json::json;
use warden_core::{ClientError, Credentials, Flow, HttpAction, RedirectKind, WebContext};

/// Protocol tag stamped on credentials.
pub const HEADER_PROTOCOL: &str = "header";

/// An inline-credential protocol in the style of HTTP Basic: the browser
/// sends `Authorization: <scheme> <token>` and, when it does not, is
/// challenged with a 401 so it shows its native prompt.
///
/// There is no remote provider, so the "provider redirect" is the
/// callback URL itself.
#[derive(Debug, Clone)]
pub struct HeaderProtocol {
    header: String,
    scheme: String,
    realm: String,
}

impl HeaderProtocol {
    /// Read `Authorization: <scheme> <token>`, challenging with `realm`.
    pub fn new(scheme: impl Into<String>, realm: impl Into<String>) -> Self {
        Self {
            header: "Authorization".to_owned(),
            scheme: scheme.into(),
            realm: realm.into(),
        }
    }
}

#[async_trait]
impl Protocol for HeaderProtocol {
    fn redirect_kind(&self) -> RedirectKind {
        RedirectKind::Direct
    }

    async fn provider_redirect(
        &self,
        _ctx: &dyn WebContext,
        callback_url: &str,
    ) -> Result<ProviderRedirect, ClientError> {
        Ok(ProviderRedirect::Location(callback_url.to_owned()))
    }

    async fn retrieve_credentials(
        &self,
        ctx: &mut dyn WebContext,
    ) -> Result<Flow<Option<Credentials>>, ClientError> {
        let Some(value) = ctx.request_header(&self.header) else {
            return Ok(Flow::Action(HttpAction::unauthorized_with_challenge(
                &self.scheme,
                &self.realm,
            )));
        };
        let token = value
            .split_once(' ')
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case(&self.scheme))
            .map(|(_, token)| token.trim())
            .filter(|token| !token.is_empty());
        Ok(Flow::Continue(token.map(|token| {
            Credentials::new(HEADER_PROTOCOL, json!({ "token": token }))
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::StatusCode;
    use warden_core::test_utils::MemoryContext;

    #[tokio::test]
    async fn missing_header_is_challenged() {
        let protocol = HeaderProtocol::new("Basic", "warden");
        let mut ctx = MemoryContext::get("/callback");
        let flow = protocol.retrieve_credentials(&mut ctx).await.unwrap();
        let action = flow.action().unwrap();
        assert_eq!(action.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(action.headers()[0].1, "Basic realm=\"warden\"");
    }

    #[tokio::test]
    async fn token_is_read_and_wrong_scheme_is_absent() {
        let protocol = HeaderProtocol::new("Basic", "warden");
        let mut ctx = MemoryContext::get("/callback").with_header("Authorization", "Basic YWxpY2U6cHc=");
        let creds = protocol
            .retrieve_credentials(&mut ctx)
            .await
            .unwrap()
            .into_continue()
            .flatten()
            .unwrap();
        assert_eq!(creds.evidence_str("token"), Some("YWxpY2U6cHc="));

        let mut ctx = MemoryContext::get("/callback").with_header("Authorization", "Bearer abc");
        assert_eq!(
            protocol.retrieve_credentials(&mut ctx).await.unwrap(),
            Flow::Continue(None)
        );
    }
}
