#![deny(missing_docs)]
//! Shared redirect/callback decision logic for warden clients.
//!
//! A concrete protocol implements [`Protocol`]: where its provider lives
//! and how to read the provider's answer. [`BaseClient`] wraps it into a
//! full [`warden_core::Client`] that handles, identically for every
//! protocol:
//!
//! - AJAX requests (401 instead of a redirect)
//! - protected targets (403 after a failed attempt, otherwise always a
//!   direct redirect)
//! - the indirect double hop through the application callback
//! - failed-attempt tracking in the session
//! - stamping the client name on credentials and profiles
//! - profile resolution through the configured [`Authenticator`] and
//!   [`ProfileBuilder`]
//!
//! [`Authenticator`]: warden_core::Authenticator
//! [`ProfileBuilder`]: warden_core::ProfileBuilder

pub mod base;
pub mod callback;
pub mod config;
pub mod protocol;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use base::BaseClient;
pub use config::ClientConfig;
pub use protocol::{Protocol, ProviderRedirect};
