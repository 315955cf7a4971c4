//! The authentication client contract.

use crate::action::{Flow, HttpAction};
use crate::attempt::AttemptTracker;
use crate::context::WebContext;
use crate::credentials::Credentials;
use crate::error::ClientError;
use crate::id::ClientName;
use crate::profile::UserProfile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default name of the callback parameter carrying the client name.
pub const DEFAULT_CLIENT_NAME_PARAMETER: &str = "client_name";

/// How a client normally reaches its provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectKind {
    /// One hop: straight to the provider.
    Direct,
    /// Two hops: to the application callback first, which then redirects
    /// to the provider during credential retrieval.
    Indirect,
}

/// Inputs to [`Client::redirect`].
///
/// `prior_failure` is per-request state the caller derives from the
/// session (see [`AttemptTracker`](crate::AttemptTracker)); clients never
/// keep it themselves.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedirectRequest {
    /// The resource requires a completed, successful authentication.
    pub protected_target: bool,
    /// The request was issued by a script and cannot follow a redirect.
    pub ajax_request: bool,
    /// A previous attempt by this client in this session produced no
    /// credentials.
    pub prior_failure: bool,
}

impl RedirectRequest {
    /// An unprotected, non-AJAX request with no prior failure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the target as protected.
    pub fn protected_target(mut self, protected: bool) -> Self {
        self.protected_target = protected;
        self
    }

    /// Mark the request as AJAX.
    pub fn ajax_request(mut self, ajax: bool) -> Self {
        self.ajax_request = ajax;
        self
    }

    /// Record that an earlier attempt failed.
    pub fn prior_failure(mut self, failed: bool) -> Self {
        self.prior_failure = failed;
        self
    }
}

/// An authentication client: drives one identity-provider protocol on
/// behalf of the application.
///
/// Instances are immutable configuration shared by every concurrent
/// request. Operations that may have to short-circuit the request return
/// an [`HttpAction`] (directly, or inside a [`Flow`]) instead of writing
/// the response; the caller commits it.
///
/// Implementations:
/// - `BaseClient<P>` (warden-client): the shared redirect/callback
///   decision logic around a per-protocol `Protocol`
/// - hand-written clients for protocols that need a different shape
#[async_trait]
pub trait Client: Send + Sync {
    /// Stable name of this instance. Used to route callbacks.
    fn name(&self) -> &ClientName;

    /// Whether this client normally redirects directly or indirectly.
    fn redirect_kind(&self) -> RedirectKind;

    /// The callback parameter whose value is this client's name, or
    /// `None` when the client's callback URL carries no name.
    ///
    /// A registry routes callback requests with it.
    fn callback_parameter(&self) -> Option<&str> {
        Some(DEFAULT_CLIENT_NAME_PARAMETER)
    }

    /// Whether this client has an unexpired failed attempt on record in
    /// the session, under the client's own attempt policy.
    fn prior_failure(&self, ctx: &dyn WebContext) -> bool {
        AttemptTracker::default().has_failed(ctx, self.name())
    }

    /// Decide how to start authentication.
    ///
    /// Evaluated in order:
    /// 1. AJAX request: 401, no redirect.
    /// 2. Protected target after a prior failure: 403.
    /// 3. Protected target: direct provider redirect, whatever the kind.
    /// 4. Indirect client: redirect to the application callback, asking
    ///    for the provider redirect to happen there.
    /// 5. Otherwise: direct provider redirect.
    ///
    /// The context is only read; the caller commits the returned action.
    async fn redirect(
        &self,
        ctx: &dyn WebContext,
        request: &RedirectRequest,
    ) -> Result<HttpAction, ClientError>;

    /// Recover credentials when the provider calls back.
    ///
    /// May instead return an action: the deferred provider redirect of an
    /// indirect client (302), an acknowledgement of an out-of-band
    /// notification (200), or a challenge for inline credentials (401).
    /// `Continue(None)` means no usable evidence; it is not an error.
    async fn get_credentials(
        &self,
        ctx: &mut dyn WebContext,
    ) -> Result<Flow<Option<Credentials>>, ClientError>;

    /// Validate credentials and build the user profile.
    ///
    /// `None` when the authenticator rejects the credentials. Never
    /// produces an action and never writes to the context.
    async fn get_user_profile(
        &self,
        credentials: &Credentials,
        ctx: &dyn WebContext,
    ) -> Result<Option<UserProfile>, ClientError>;
}
