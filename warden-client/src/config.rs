//! Client configuration.

use crate::callback::append_query;
use serde::{Deserialize, Serialize};
use warden_core::{AttemptPolicy, ClientError, ClientName, DEFAULT_CLIENT_NAME_PARAMETER, WebContext};

/// Default name of the callback parameter asking for the deferred
/// provider redirect of an indirect client.
pub const DEFAULT_REDIRECT_PARAMETER: &str = "requires_redirect";

/// Default value of [`DEFAULT_REDIRECT_PARAMETER`].
pub const DEFAULT_REDIRECT_PARAMETER_VALUE: &str = "1";

/// Immutable configuration of one client instance.
///
/// Serializable so it can live in config files (YAML, TOML, JSON); every
/// field except `name` and `callback_url` has a default.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Stable client name.
    pub name: ClientName,
    /// Application callback URL, absolute or relative.
    pub callback_url: String,
    /// Callback parameter naming the client.
    pub client_name_parameter: String,
    /// Callback parameter requesting the deferred provider redirect.
    pub redirect_parameter: String,
    /// Value of `redirect_parameter` that triggers the redirect.
    pub redirect_parameter_value: String,
    /// Add `client_name_parameter=<name>` to the callback URL, so that a
    /// shared callback endpoint can route to this client.
    pub include_client_name: bool,
    /// How long a failed attempt is remembered.
    pub attempts: AttemptPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: ClientName::new(""),
            callback_url: String::new(),
            client_name_parameter: DEFAULT_CLIENT_NAME_PARAMETER.to_owned(),
            redirect_parameter: DEFAULT_REDIRECT_PARAMETER.to_owned(),
            redirect_parameter_value: DEFAULT_REDIRECT_PARAMETER_VALUE.to_owned(),
            include_client_name: true,
            attempts: AttemptPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration with defaults for everything but name and callback.
    pub fn new(name: impl Into<ClientName>, callback_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callback_url: callback_url.into(),
            ..Self::default()
        }
    }

    /// Use a different client name parameter.
    pub fn with_client_name_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.client_name_parameter = parameter.into();
        self
    }

    /// Use a different deferred-redirect parameter and value.
    pub fn with_redirect_parameter(
        mut self,
        parameter: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.redirect_parameter = parameter.into();
        self.redirect_parameter_value = value.into();
        self
    }

    /// Whether to add the client name to the callback URL.
    pub fn include_client_name(mut self, include: bool) -> Self {
        self.include_client_name = include;
        self
    }

    /// Set the failed-attempt policy.
    pub fn with_attempt_policy(mut self, policy: AttemptPolicy) -> Self {
        self.attempts = policy;
        self
    }

    /// Reject configurations no client could work with.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.name.as_str().trim().is_empty() {
            return Err(ClientError::Config("client name is empty".into()));
        }
        if self.callback_url.trim().is_empty() {
            return Err(ClientError::Config(format!(
                "client `{}` has no callback url",
                self.name
            )));
        }
        if self.client_name_parameter.is_empty() || self.redirect_parameter.is_empty() {
            return Err(ClientError::Config(format!(
                "client `{}` has an empty callback parameter name",
                self.name
            )));
        }
        self.indirect_redirect_url().map(|_| ())
    }

    /// The callback parameter naming this client, when the callback URL
    /// carries it.
    pub fn callback_parameter(&self) -> Option<&str> {
        self.include_client_name
            .then_some(self.client_name_parameter.as_str())
    }

    /// The callback URL the provider should return to.
    pub fn contextual_callback_url(&self) -> Result<String, ClientError> {
        if self.include_client_name {
            append_query(
                &self.callback_url,
                &[(self.client_name_parameter.as_str(), self.name.as_str())],
            )
        } else {
            Ok(self.callback_url.clone())
        }
    }

    /// The callback URL an indirect client redirects to first.
    pub fn indirect_redirect_url(&self) -> Result<String, ClientError> {
        append_query(
            &self.contextual_callback_url()?,
            &[(
                self.redirect_parameter.as_str(),
                self.redirect_parameter_value.as_str(),
            )],
        )
    }

    /// Whether the current request asks for the deferred provider redirect.
    pub fn is_redirect_requested(&self, ctx: &dyn WebContext) -> bool {
        ctx.request_parameter(&self.redirect_parameter)
            .is_some_and(|v| v == self.redirect_parameter_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use warden_core::DurationMs;
    use warden_core::test_utils::MemoryContext;

    #[test]
    fn deserializes_with_defaults() {
        let config: ClientConfig = serde_json::from_value(json!({
            "name": "saml",
            "callback_url": "https://app.example/callback"
        }))
        .unwrap();
        assert_eq!(config, ClientConfig::new("saml", "https://app.example/callback"));
        assert_eq!(config.redirect_parameter, "requires_redirect");
        assert!(config.include_client_name);
        assert_eq!(config.attempts, AttemptPolicy::default());
    }

    #[test]
    fn deserializes_overrides() {
        let config: ClientConfig = serde_json::from_value(json!({
            "name": "cas",
            "callback_url": "/cb",
            "redirect_parameter": "needs_client_redirection",
            "redirect_parameter_value": "true",
            "include_client_name": false,
            "attempts": { "ttl": 30000 }
        }))
        .unwrap();
        assert_eq!(config.attempts.ttl, DurationMs::from_secs(30));
        assert_eq!(
            config.indirect_redirect_url().unwrap(),
            "/cb?needs_client_redirection=true"
        );
    }

    #[test]
    fn urls_carry_client_name_and_redirect_flag() {
        let config = ClientConfig::new("saml", "https://app.example/callback");
        assert_eq!(
            config.contextual_callback_url().unwrap(),
            "https://app.example/callback?client_name=saml"
        );
        assert_eq!(
            config.indirect_redirect_url().unwrap(),
            "https://app.example/callback?client_name=saml&requires_redirect=1"
        );
    }

    #[test]
    fn callback_parameter_follows_include_flag() {
        let config = ClientConfig::new("cas", "/cb").with_client_name_parameter("provider");
        assert_eq!(config.callback_parameter(), Some("provider"));
        assert_eq!(config.include_client_name(false).callback_parameter(), None);
    }

    #[test]
    fn validate_rejects_unusable_configs() {
        assert!(matches!(
            ClientConfig::new("", "/cb").validate(),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("cas", " ").validate(),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("cas", "/cb")
                .with_redirect_parameter("", "1")
                .validate(),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("cas", "https://[::1/cb").validate(),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(ClientConfig::new("cas", "/cb").validate().is_ok());
    }

    #[test]
    fn detects_redirect_request() {
        let config = ClientConfig::new("saml", "/callback");
        assert!(config.is_redirect_requested(&MemoryContext::get("/callback?requires_redirect=1")));
        assert!(!config.is_redirect_requested(&MemoryContext::get("/callback?requires_redirect=0")));
        assert!(!config.is_redirect_requested(&MemoryContext::get("/callback")));
    }
}
