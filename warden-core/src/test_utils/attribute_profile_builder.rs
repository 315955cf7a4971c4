//! AttributeProfileBuilder — maps JSON evidence straight onto a profile.

use crate::authenticator::ProfileBuilder;
use crate::context::WebContext;
use crate::credentials::Credentials;
use crate::error::ClientError;
use crate::profile::UserProfile;
use async_trait::async_trait;

/// Builds a profile from object-shaped evidence: the `id_field` becomes
/// the profile id, every other field except the `secret_fields` becomes
/// an attribute.
pub struct AttributeProfileBuilder {
    id_field: String,
    secret_fields: Vec<String>,
}

impl AttributeProfileBuilder {
    /// Use `id_field` as the profile id.
    pub fn new(id_field: impl Into<String>) -> Self {
        Self {
            id_field: id_field.into(),
            secret_fields: Vec::new(),
        }
    }

    /// Never copy `field` into the profile.
    pub fn without(mut self, field: impl Into<String>) -> Self {
        self.secret_fields.push(field.into());
        self
    }
}

#[async_trait]
impl ProfileBuilder for AttributeProfileBuilder {
    async fn build(
        &self,
        credentials: &Credentials,
        _ctx: &dyn WebContext,
    ) -> Result<UserProfile, ClientError> {
        let id = credentials.evidence_str(&self.id_field).ok_or_else(|| {
            ClientError::ProfileBuild(format!("evidence has no `{}` field", self.id_field))
        })?;
        let mut profile = UserProfile::new(id);
        if let Some(fields) = credentials.evidence().as_object() {
            for (name, value) in fields {
                if *name == self.id_field || self.secret_fields.contains(name) {
                    continue;
                }
                profile = profile.with_attribute(name.clone(), value.clone());
            }
        }
        Ok(profile)
    }
}
