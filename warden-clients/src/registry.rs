//! The client registry.
//!
//! Each client publishes how its callbacks are addressed: by a named
//! query parameter holding the client name, or not at all. At most one
//! registered client may use unnamed callbacks; it receives every
//! callback that names no client.

use std::sync::Arc;
use warden_core::{Client, ClientError, ClientName, WebContext};

/// The configured clients, selected by stable name.
///
/// Clients are kept in registration order. Names are unique.
#[derive(Default)]
pub struct Clients {
    clients: Vec<Arc<dyn Client>>,
}

impl Clients {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a client.
    ///
    /// Rejects a name already in use, and a second client whose callbacks
    /// carry no client name (the two could not be told apart).
    pub fn register(&mut self, client: Arc<dyn Client>) -> Result<(), ClientError> {
        if self.clients.iter().any(|c| c.name() == client.name()) {
            return Err(ClientError::DuplicateClient(client.name().to_string()));
        }
        if client.callback_parameter().is_none() {
            if let Some(unnamed) = self.unnamed() {
                return Err(ClientError::Config(format!(
                    "clients `{}` and `{}` both use callbacks without a client name",
                    unnamed.name(),
                    client.name()
                )));
            }
        }
        self.clients.push(client);
        Ok(())
    }

    /// Add a client (builder form).
    pub fn with_client(mut self, client: Arc<dyn Client>) -> Result<Self, ClientError> {
        self.register(client)?;
        Ok(self)
    }

    /// The client registered under `name`.
    pub fn find_by_name(&self, name: &str) -> Result<&Arc<dyn Client>, ClientError> {
        self.clients
            .iter()
            .find(|c| c.name().as_str() == name)
            .ok_or_else(|| ClientError::ClientNotFound(name.to_owned()))
    }

    /// The client a callback request is addressed to.
    ///
    /// A client matches when its callback parameter holds its name. A
    /// request naming no client goes to the client with unnamed
    /// callbacks, if there is one. A request naming an unknown client is
    /// an error.
    pub fn find_client(&self, ctx: &dyn WebContext) -> Result<&Arc<dyn Client>, ClientError> {
        let mut named = None;
        for client in &self.clients {
            let Some(parameter) = client.callback_parameter() else {
                continue;
            };
            match ctx.request_parameter(parameter) {
                Some(value) if value == client.name().as_str() => return Ok(client),
                Some(value) => named = named.or(Some(value)),
                None => {}
            }
        }
        if let Some(name) = named {
            return Err(ClientError::ClientNotFound(name));
        }
        self.unnamed()
            .ok_or_else(|| ClientError::ClientNotFound("callback names no client".to_owned()))
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &ClientName> {
        self.clients.iter().map(|c| c.name())
    }

    /// Number of registered clients.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether no client is registered.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    fn unnamed(&self) -> Option<&Arc<dyn Client>> {
        self.clients.iter().find(|c| c.callback_parameter().is_none())
    }
}
