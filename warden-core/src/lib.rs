//! # warden-core — Protocol types for pluggable web authentication clients
//!
//! This crate defines the contract every authentication client honours,
//! whatever identity-provider protocol it speaks (OAuth, CAS, SAML, HTTP
//! Basic, ...), plus the data and control types that flow across it.
//!
//! ## The Contract
//!
//! | Operation | Method | What it does |
//! |-----------|--------|-------------|
//! | ① Name | [`Client::name`] | Stable identifier used to route callbacks |
//! | ② Redirect | [`Client::redirect`] | Decide how to send the user to the provider |
//! | ③ Credentials | [`Client::get_credentials`] | Recover evidence when the provider calls back |
//! | ④ Profile | [`Client::get_user_profile`] | Validate evidence and resolve an identity |
//!
//! ## The Collaborators
//!
//! | Collaborator | Trait | What it does |
//! |--------------|-------|-------------|
//! | Request context | [`WebContext`] | Request parameters, headers, session, response |
//! | Authenticator | [`Authenticator`] | Valid / invalid verdict on raw credentials |
//! | Profile builder | [`ProfileBuilder`] | Credentials to [`UserProfile`] |
//!
//! ## Three Outcome Channels
//!
//! A client never performs the HTTP response itself. Operations that may
//! need to short-circuit the request return a [`Flow`], which is either a
//! normal value or an [`HttpAction`] the caller must commit. Absent
//! credentials or profiles are plain `None`. Genuine faults (unreachable
//! provider, malformed response) are `Err(ClientError)` and never
//! masquerade as an HTTP action.
//!
//! ## Async
//!
//! Client traits use `async-trait`: concrete protocols talk to remote
//! providers, so credential retrieval and profile resolution may suspend
//! on I/O. Clients are `Send + Sync` and hold no per-request state; all of
//! it lives in the [`WebContext`].

#![deny(missing_docs)]

pub mod action;
pub mod attempt;
pub mod authenticator;
pub mod client;
pub mod context;
pub mod credentials;
pub mod duration;
pub mod error;
pub mod id;
pub mod profile;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-exports for convenience
pub use action::{Flow, HttpAction};
pub use attempt::{AttemptPolicy, AttemptTracker};
pub use authenticator::{Authenticator, ProfileBuilder, Validation};
pub use client::{Client, DEFAULT_CLIENT_NAME_PARAMETER, RedirectKind, RedirectRequest};
pub use context::{WebContext, is_ajax_request};
pub use credentials::Credentials;
pub use duration::DurationMs;
pub use error::ClientError;
pub use id::{ClientName, ProfileId};
pub use profile::UserProfile;
pub use http::StatusCode;
