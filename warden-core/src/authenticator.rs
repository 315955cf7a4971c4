//! Collaborators that turn credentials into an identity.

use crate::context::WebContext;
use crate::credentials::Credentials;
use crate::error::ClientError;
use crate::profile::UserProfile;
use async_trait::async_trait;

/// An authenticator's verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// The credentials check out. The authenticator may have enriched them
    /// (e.g. with an access token obtained from the provider).
    Valid(Credentials),
    /// The credentials were rejected. A normal outcome, not a fault.
    Invalid {
        /// Why they were rejected, for logs.
        reason: String,
    },
}

impl Validation {
    /// Reject with a reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Validation::Invalid {
            reason: reason.into(),
        }
    }

    /// Whether the verdict is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }
}

/// Validates raw credentials.
///
/// Implementations:
/// - ticket/code exchange against the provider (CAS, OAuth)
/// - signature checks on assertions (SAML)
/// - username/password lookups (Basic, form)
///
/// Return `Ok(Validation::Invalid)` for rejected credentials and `Err`
/// only when no verdict could be reached.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Validate the credentials.
    async fn validate(&self, credentials: Credentials) -> Result<Validation, ClientError>;
}

/// Maps validated credentials to a user profile.
#[async_trait]
pub trait ProfileBuilder: Send + Sync {
    /// Build the profile. The context is read-only.
    async fn build(
        &self,
        credentials: &Credentials,
        ctx: &dyn WebContext,
    ) -> Result<UserProfile, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn _assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn collaborators_are_object_safe_send_sync() {
        _assert_send_sync::<Arc<dyn Authenticator>>();
        _assert_send_sync::<Arc<dyn ProfileBuilder>>();
    }

    #[test]
    fn validation_helpers() {
        let invalid = Validation::invalid("expired ticket");
        assert!(!invalid.is_valid());
        assert_eq!(
            invalid,
            Validation::Invalid {
                reason: "expired ticket".into()
            }
        );
        let valid = Validation::Valid(Credentials::new("cas", serde_json::json!({})));
        assert!(valid.is_valid());
    }
}
