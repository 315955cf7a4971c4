//! Reference protocols for testing.
//!
//! Available behind the `test-utils` feature flag. None of these speaks a
//! real identity-provider protocol; they reproduce the shapes real
//! protocols take (ticket in a query parameter, inline header, slow
//! provider) so the shared client logic can be exercised end to end.

mod header_protocol;
mod parameter_protocol;
mod slow_protocol;

pub use header_protocol::HeaderProtocol;
pub use parameter_protocol::ParameterProtocol;
pub use slow_protocol::SlowProtocol;
