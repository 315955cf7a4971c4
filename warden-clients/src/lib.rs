#![deny(missing_docs)]
//! Client registry and callback routing for warden.
//!
//! [`Clients`] holds the configured clients and selects one by its stable
//! name, either explicitly or from the callback parameter each client
//! publishes. [`AuthFlow`] is the thin integration layer a web
//! framework calls: it derives the per-request inputs (AJAX, prior
//! failure), invokes the client, and is the single place where an
//! [`HttpAction`](warden_core::HttpAction) is committed to the response.

mod flow;
mod registry;

pub use flow::{AuthFlow, CallbackOutcome};
pub use registry::Clients;
