//! BaseClient — the redirect/callback decision logic shared by every
//! protocol.

use crate::config::ClientConfig;
use crate::protocol::Protocol;
use async_trait::async_trait;
use std::sync::Arc;
use warden_core::{
    AttemptTracker, Authenticator, Client, ClientError, ClientName, Credentials, Flow, HttpAction,
    ProfileBuilder, RedirectKind, RedirectRequest, UserProfile, Validation, WebContext,
};

/// A complete [`Client`]: a [`Protocol`] plus the shared decision logic
/// and the credential/profile collaborators.
///
/// Immutable after construction. The contextual callback URLs are
/// computed once, so a bad configuration fails at startup rather than on
/// the first request.
pub struct BaseClient<P> {
    config: ClientConfig,
    protocol: P,
    authenticator: Arc<dyn Authenticator>,
    profile_builder: Arc<dyn ProfileBuilder>,
    attempts: AttemptTracker,
    callback_url: String,
    indirect_url: String,
}

impl<P: Protocol> BaseClient<P> {
    /// Assemble a client. Fails if the configuration is unusable.
    pub fn new(
        config: ClientConfig,
        protocol: P,
        authenticator: Arc<dyn Authenticator>,
        profile_builder: Arc<dyn ProfileBuilder>,
    ) -> Result<Self, ClientError> {
        config.validate()?;
        let callback_url = config.contextual_callback_url()?;
        let indirect_url = config.indirect_redirect_url()?;
        Ok(Self {
            attempts: AttemptTracker::new(config.attempts),
            config,
            protocol,
            authenticator,
            profile_builder,
            callback_url,
            indirect_url,
        })
    }

    /// The configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The protocol.
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// The callback URL handed to the provider.
    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// The attempt tracker configured for this client.
    pub fn attempts(&self) -> &AttemptTracker {
        &self.attempts
    }

    async fn provider_action(&self, ctx: &dyn WebContext) -> Result<HttpAction, ClientError> {
        let redirect = self
            .protocol
            .provider_redirect(ctx, &self.callback_url)
            .await?;
        Ok(redirect.into())
    }
}

#[async_trait]
impl<P: Protocol> Client for BaseClient<P> {
    fn name(&self) -> &ClientName {
        &self.config.name
    }

    fn redirect_kind(&self) -> RedirectKind {
        self.protocol.redirect_kind()
    }

    fn callback_parameter(&self) -> Option<&str> {
        self.config.callback_parameter()
    }

    fn prior_failure(&self, ctx: &dyn WebContext) -> bool {
        self.attempts.has_failed(ctx, self.name())
    }

    async fn redirect(
        &self,
        ctx: &dyn WebContext,
        request: &RedirectRequest,
    ) -> Result<HttpAction, ClientError> {
        let client = self.name().as_str();

        if request.ajax_request {
            tracing::debug!(client, status = 401, "ajax request, not redirecting");
            return Ok(HttpAction::unauthorized());
        }

        if request.protected_target && request.prior_failure {
            tracing::debug!(client, status = 403, "protected target after failed attempt");
            return Ok(HttpAction::forbidden());
        }

        // Protected targets always take the direct route.
        let kind = if request.protected_target {
            RedirectKind::Direct
        } else {
            self.protocol.redirect_kind()
        };

        let action = match kind {
            RedirectKind::Direct => self.provider_action(ctx).await?,
            RedirectKind::Indirect => HttpAction::redirect(self.indirect_url.clone()),
        };
        tracing::debug!(
            client,
            status = action.status().as_u16(),
            location = action.location().unwrap_or_default(),
            ?kind,
            "redirecting"
        );
        Ok(action)
    }

    async fn get_credentials(
        &self,
        ctx: &mut dyn WebContext,
    ) -> Result<Flow<Option<Credentials>>, ClientError> {
        let client = self.name().as_str();

        if self.protocol.redirect_kind() == RedirectKind::Indirect
            && self.config.is_redirect_requested(&*ctx)
        {
            let action = self.provider_action(&*ctx).await?;
            tracing::debug!(
                client,
                location = action.location().unwrap_or_default(),
                "performing deferred provider redirect"
            );
            return Ok(Flow::Action(action));
        }

        match self.protocol.retrieve_credentials(ctx).await? {
            Flow::Continue(Some(credentials)) => {
                self.attempts.clear(ctx, self.name())?;
                Ok(Flow::Continue(Some(
                    credentials.with_client_name(self.name().clone()),
                )))
            }
            Flow::Continue(None) => {
                tracing::debug!(client, "no credentials in callback");
                self.attempts.record_failure(ctx, self.name())?;
                Ok(Flow::Continue(None))
            }
            Flow::Action(action) => {
                tracing::debug!(client, status = action.status().as_u16(), "protocol requires action");
                Ok(Flow::Action(action))
            }
        }
    }

    async fn get_user_profile(
        &self,
        credentials: &Credentials,
        ctx: &dyn WebContext,
    ) -> Result<Option<UserProfile>, ClientError> {
        let client = self.name().as_str();
        match self.authenticator.validate(credentials.clone()).await? {
            Validation::Invalid { reason } => {
                tracing::debug!(client, %reason, "credentials rejected");
                Ok(None)
            }
            Validation::Valid(validated) => {
                let profile = self.profile_builder.build(&validated, ctx).await?;
                Ok(Some(profile.with_client_name(self.name().clone())))
            }
        }
    }
}
