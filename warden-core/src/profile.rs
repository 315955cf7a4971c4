//! User profiles — resolved identities.

use crate::id::{ClientName, ProfileId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator between client name and id in [`UserProfile::typed_id`].
pub const TYPED_ID_SEPARATOR: char = '#';

/// The identity resolved from validated credentials.
///
/// Created once per successful authentication and immutable once handed
/// to the caller. Attributes are protocol-specific and kept as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    id: ProfileId,
    client_name: Option<ClientName>,
    #[serde(default)]
    attributes: BTreeMap<String, serde_json::Value>,
}

impl UserProfile {
    /// Create a profile with the provider-supplied identifier.
    pub fn new(id: impl Into<ProfileId>) -> Self {
        Self {
            id: id.into(),
            client_name: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Attach the name of the client that authenticated this user.
    pub fn with_client_name(mut self, name: ClientName) -> Self {
        self.client_name = Some(name);
        self
    }

    /// The provider-supplied identifier.
    pub fn id(&self) -> &ProfileId {
        &self.id
    }

    /// The authenticating client, once stamped.
    pub fn client_name(&self) -> Option<&ClientName> {
        self.client_name.as_ref()
    }

    /// Identifier qualified by client, unique across providers:
    /// `"<client_name>#<id>"`, or just the id when no client is stamped.
    pub fn typed_id(&self) -> String {
        match &self.client_name {
            Some(client) => format!("{client}{TYPED_ID_SEPARATOR}{}", self.id),
            None => self.id.to_string(),
        }
    }

    /// A single attribute.
    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }

    /// All attributes.
    pub fn attributes(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.attributes
    }
}
