//! Credentials — opaque evidence of a completed provider handshake.

use crate::id::ClientName;
use serde::{Deserialize, Serialize};

/// Protocol-specific evidence produced by a callback.
///
/// The core never looks inside the evidence; it only cares whether
/// credentials are present (`Some`) or absent (`None`). Protocols choose
/// the evidence shape (a CAS ticket, an OAuth code, a username/password
/// pair) and their [`Authenticator`](crate::Authenticator) interprets it.
///
/// The `Debug` impl redacts the evidence, which routinely carries
/// secrets.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    client_name: Option<ClientName>,
    protocol: String,
    evidence: serde_json::Value,
}

impl Credentials {
    /// Create credentials tagged with the protocol that produced them.
    pub fn new(protocol: impl Into<String>, evidence: serde_json::Value) -> Self {
        Self {
            client_name: None,
            protocol: protocol.into(),
            evidence,
        }
    }

    /// Attach the name of the client that retrieved these credentials.
    pub fn with_client_name(mut self, name: ClientName) -> Self {
        self.client_name = Some(name);
        self
    }

    /// The client that retrieved these credentials, once stamped.
    pub fn client_name(&self) -> Option<&ClientName> {
        self.client_name.as_ref()
    }

    /// The protocol tag.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// The raw evidence.
    pub fn evidence(&self) -> &serde_json::Value {
        &self.evidence
    }

    /// A string field of the evidence, when it is a JSON object.
    pub fn evidence_str(&self, field: &str) -> Option<&str> {
        self.evidence.get(field).and_then(serde_json::Value::as_str)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_name", &self.client_name)
            .field("protocol", &self.protocol)
            .field("evidence", &"[REDACTED]")
            .finish()
    }
}
