//! SlowProtocol — a provider that takes its time.

use crate::protocol::{Protocol, ProviderRedirect};
use async_trait::async_trait;
use std::time::Duration;
use warden_core::{ClientError, Credentials, Flow, RedirectKind, WebContext};

/// Wraps another protocol and sleeps before every provider interaction,
/// standing in for network latency. Used to exercise cancellation.
pub struct SlowProtocol<P> {
    inner: P,
    delay: Duration,
}

impl<P> SlowProtocol<P> {
    /// Delay every call to `inner` by `delay`.
    pub fn new(inner: P, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl<P: Protocol> Protocol for SlowProtocol<P> {
    fn redirect_kind(&self) -> RedirectKind {
        self.inner.redirect_kind()
    }

    async fn provider_redirect(
        &self,
        ctx: &dyn WebContext,
        callback_url: &str,
    ) -> Result<ProviderRedirect, ClientError> {
        tokio::time::sleep(self.delay).await;
        self.inner.provider_redirect(ctx, callback_url).await
    }

    async fn retrieve_credentials(
        &self,
        ctx: &mut dyn WebContext,
    ) -> Result<Flow<Option<Credentials>>, ClientError> {
        tokio::time::sleep(self.delay).await;
        self.inner.retrieve_credentials(ctx).await
    }
}
