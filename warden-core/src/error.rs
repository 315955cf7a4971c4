//! Error types for the client contract.
//!
//! These are genuine faults only. Control signals travel as
//! [`HttpAction`](crate::HttpAction) and data-level absence as `None`;
//! neither is ever encoded as a `ClientError`.

use thiserror::Error;

/// Faults raised by clients, protocols and their collaborators.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ClientError {
    /// The identity provider could not be reached or refused the exchange.
    /// Whether a retry helps is the concrete protocol's call.
    #[error("provider error: {0}")]
    Provider(String),

    /// The provider answered, but its response could not be understood.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request context failed (session store unavailable, etc.).
    #[error("web context error: {0}")]
    Context(String),

    /// The authenticator failed before it could reach a verdict.
    #[error("validation fault: {0}")]
    Validation(String),

    /// The profile builder could not map validated credentials.
    #[error("profile build failed: {0}")]
    ProfileBuild(String),

    /// No client is registered under the requested name.
    #[error("client not found: {0}")]
    ClientNotFound(String),

    /// A client with the same name is already registered.
    #[error("duplicate client name: {0}")]
    DuplicateClient(String),

    /// A configured or computed URL does not parse.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
