//! StaticAuthenticator — fixed verdicts for testing.

use crate::authenticator::{Authenticator, Validation};
use crate::credentials::Credentials;
use crate::error::ClientError;
use async_trait::async_trait;
use std::collections::HashSet;

enum Mode {
    AcceptAll,
    Accepting { field: String, values: HashSet<String> },
    RejectAll,
    Fault(String),
}

/// An authenticator with a fixed rule:
/// - [`accept_all`](Self::accept_all): every credential is valid
/// - [`accepting`](Self::accepting): valid when an evidence field holds one of the listed values
/// - [`reject_all`](Self::reject_all): every credential is invalid
/// - [`failing`](Self::failing): every call is a fault
pub struct StaticAuthenticator {
    mode: Mode,
}

impl StaticAuthenticator {
    /// Accept everything.
    pub fn accept_all() -> Self {
        Self {
            mode: Mode::AcceptAll,
        }
    }

    /// Accept credentials whose evidence `field` is one of `values`.
    pub fn accepting<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: Mode::Accepting {
                field: field.into(),
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Reject everything.
    pub fn reject_all() -> Self {
        Self {
            mode: Mode::RejectAll,
        }
    }

    /// Fail every validation with [`ClientError::Validation`].
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            mode: Mode::Fault(message.into()),
        }
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn validate(&self, credentials: Credentials) -> Result<Validation, ClientError> {
        match &self.mode {
            Mode::AcceptAll => Ok(Validation::Valid(credentials)),
            Mode::Accepting { field, values } => {
                match credentials.evidence_str(field) {
                    Some(value) if values.contains(value) => Ok(Validation::Valid(credentials)),
                    _ => Ok(Validation::invalid(format!("{field} not accepted"))),
                }
            }
            Mode::RejectAll => Ok(Validation::invalid("rejected")),
            Mode::Fault(message) => Err(ClientError::Validation(message.clone())),
        }
    }
}
