//! The integration layer: start and callback handling over a registry.

use crate::registry::Clients;
use std::sync::Arc;
use warden_core::{
    ClientError, ClientName, Flow, HttpAction, RedirectRequest, StatusCode, UserProfile,
    WebContext, is_ajax_request,
};

/// Where a callback request ended up.
///
/// Every variant is terminal for the current request except
/// [`ProfileCreated`](Self::ProfileCreated), whose profile the caller now
/// owns.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackOutcome {
    /// The client required an HTTP action and it has been committed. The
    /// caller must not write to the response again.
    ActionCommitted {
        /// The client that produced the action.
        client: ClientName,
        /// The committed status.
        status: StatusCode,
    },
    /// The callback carried no usable credentials. The failure has been
    /// recorded for the client.
    CredentialsAbsent {
        /// The client that handled the callback.
        client: ClientName,
    },
    /// The authenticator rejected the credentials.
    ProfileAbsent {
        /// The client that handled the callback.
        client: ClientName,
    },
    /// Authentication succeeded.
    ProfileCreated(UserProfile),
}

impl CallbackOutcome {
    /// The created profile, if authentication succeeded.
    pub fn into_profile(self) -> Option<UserProfile> {
        match self {
            CallbackOutcome::ProfileCreated(profile) => Some(profile),
            _ => None,
        }
    }

    /// Whether an action was committed to the response.
    pub fn is_committed(&self) -> bool {
        matches!(self, CallbackOutcome::ActionCommitted { .. })
    }
}

/// The integration layer between a web framework and its clients.
///
/// Actions are committed only after the client operation has fully
/// completed, with no suspension point in between: if the request is
/// cancelled while a provider call is in flight, nothing is written.
#[derive(Clone)]
pub struct AuthFlow {
    clients: Arc<Clients>,
}

impl AuthFlow {
    /// Create a flow over a client registry.
    pub fn new(clients: Arc<Clients>) -> Self {
        Self { clients }
    }

    /// The client registry.
    pub fn clients(&self) -> &Clients {
        &self.clients
    }

    /// Start authentication with the named client and commit the
    /// resulting action.
    ///
    /// AJAX-ness comes from the request headers and the prior failure
    /// from the session, judged by the client's own attempt policy.
    /// Returns the committed status.
    pub async fn start(
        &self,
        ctx: &mut dyn WebContext,
        client_name: &str,
        protected_target: bool,
    ) -> Result<StatusCode, ClientError> {
        let client = self.clients.find_by_name(client_name)?;
        let request = RedirectRequest::new()
            .protected_target(protected_target)
            .ajax_request(is_ajax_request(&*ctx))
            .prior_failure(client.prior_failure(&*ctx));
        self.start_with(ctx, client_name, &request).await
    }

    /// Start authentication with explicit inputs and commit the result.
    pub async fn start_with(
        &self,
        ctx: &mut dyn WebContext,
        client_name: &str,
        request: &RedirectRequest,
    ) -> Result<StatusCode, ClientError> {
        let client = self.clients.find_by_name(client_name)?;
        let action = client.redirect(&*ctx, request).await?;
        Ok(commit(ctx, client.name(), action))
    }

    /// Handle a provider callback: route it to its client, retrieve
    /// credentials and resolve the profile.
    pub async fn callback(&self, ctx: &mut dyn WebContext) -> Result<CallbackOutcome, ClientError> {
        let client = match self.clients.find_client(&*ctx) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(url = %ctx.full_request_url(), error = %e, "callback for unknown client");
                return Err(e);
            }
        };
        let name = client.name().clone();

        let credentials = match client.get_credentials(ctx).await? {
            Flow::Action(action) => {
                let status = commit(ctx, &name, action);
                return Ok(CallbackOutcome::ActionCommitted {
                    client: name,
                    status,
                });
            }
            Flow::Continue(None) => return Ok(CallbackOutcome::CredentialsAbsent { client: name }),
            Flow::Continue(Some(credentials)) => credentials,
        };

        match client.get_user_profile(&credentials, &*ctx).await? {
            Some(profile) => {
                tracing::debug!(client = %name, profile = %profile.typed_id(), "authenticated");
                Ok(CallbackOutcome::ProfileCreated(profile))
            }
            None => Ok(CallbackOutcome::ProfileAbsent { client: name }),
        }
    }
}

fn commit(ctx: &mut dyn WebContext, client: &ClientName, action: HttpAction) -> StatusCode {
    let status = action.status();
    tracing::debug!(client = %client, action = %action, "committing http action");
    action.commit(ctx);
    status
}
