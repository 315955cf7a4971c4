#![deny(missing_docs)]
//! # warden — umbrella crate
//!
//! Provides a single import surface for the warden authentication client
//! crates. Re-exports the protocol types and the implementations behind
//! feature flags, plus a `prelude` for the happy path.

#[cfg(feature = "core")]
pub use warden_core;
#[cfg(feature = "client")]
pub use warden_client;
#[cfg(feature = "registry")]
pub use warden_clients;

/// Happy-path imports for wiring authentication clients.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use warden_core::{
        AttemptPolicy, AttemptTracker, Authenticator, Client, ClientError, ClientName,
        Credentials, Flow, HttpAction, ProfileBuilder, ProfileId, RedirectKind, RedirectRequest,
        StatusCode, UserProfile, Validation, WebContext, is_ajax_request,
    };

    #[cfg(feature = "client")]
    pub use warden_client::{BaseClient, ClientConfig, Protocol, ProviderRedirect};

    #[cfg(feature = "registry")]
    pub use warden_clients::{AuthFlow, CallbackOutcome, Clients};
}
