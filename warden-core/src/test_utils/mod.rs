//! In-memory implementations for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations that prove the trait APIs are usable.

mod attribute_profile_builder;
mod memory_context;
mod static_authenticator;

pub use attribute_profile_builder::AttributeProfileBuilder;
pub use memory_context::MemoryContext;
pub use static_authenticator::StaticAuthenticator;
