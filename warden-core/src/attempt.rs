//! Failed-attempt tracking.
//!
//! When a callback yields no credentials, the failure is remembered in the
//! session so that a later redirect for a protected target answers 403
//! instead of sending the user round the same failing loop. The record is
//! a session attribute named `"<client>$attempted_authentication"` holding
//! the failure time in epoch milliseconds. Records older than
//! [`AttemptPolicy::ttl`] are ignored; a zero TTL never expires.

use crate::context::WebContext;
use crate::duration::DurationMs;
use crate::error::ClientError;
use crate::id::ClientName;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Suffix of the session attribute recording a failed attempt.
pub const ATTEMPT_SUFFIX: &str = "$attempted_authentication";

/// How long a failed attempt is remembered.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttemptPolicy {
    /// Age after which a recorded failure no longer counts.
    /// [`DurationMs::ZERO`] keeps it for the session's lifetime.
    pub ttl: DurationMs,
}

impl AttemptPolicy {
    /// Default time-to-live of a failure record: ten minutes.
    pub const DEFAULT_TTL: DurationMs = DurationMs::from_secs(600);

    /// Policy with the given time-to-live.
    pub fn with_ttl(ttl: DurationMs) -> Self {
        Self { ttl }
    }
}

impl Default for AttemptPolicy {
    fn default() -> Self {
        Self {
            ttl: Self::DEFAULT_TTL,
        }
    }
}

/// Reads and writes failed-attempt records in the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttemptTracker {
    policy: AttemptPolicy,
}

impl AttemptTracker {
    /// Create a tracker with the given policy.
    pub fn new(policy: AttemptPolicy) -> Self {
        Self { policy }
    }

    /// The policy in effect.
    pub fn policy(&self) -> AttemptPolicy {
        self.policy
    }

    /// Session attribute name used for `client`.
    pub fn session_key(client: &ClientName) -> String {
        format!("{client}{ATTEMPT_SUFFIX}")
    }

    /// Remember that `client` produced no credentials now.
    pub fn record_failure(
        &self,
        ctx: &mut dyn WebContext,
        client: &ClientName,
    ) -> Result<(), ClientError> {
        self.record_failure_at(ctx, client, SystemTime::now())
    }

    /// Remember a failure at an explicit instant.
    pub fn record_failure_at(
        &self,
        ctx: &mut dyn WebContext,
        client: &ClientName,
        at: SystemTime,
    ) -> Result<(), ClientError> {
        ctx.set_session_attribute(
            &Self::session_key(client),
            serde_json::Value::from(epoch_millis(at)),
        )
    }

    /// Forget any failure for `client`.
    pub fn clear(&self, ctx: &mut dyn WebContext, client: &ClientName) -> Result<(), ClientError> {
        ctx.remove_session_attribute(&Self::session_key(client))
    }

    /// Whether `client` has an unexpired failure on record.
    pub fn has_failed(&self, ctx: &dyn WebContext, client: &ClientName) -> bool {
        self.has_failed_at(ctx, client, SystemTime::now())
    }

    /// [`has_failed`](Self::has_failed) evaluated at an explicit instant.
    ///
    /// A record that is not a timestamp counts as a failure with no
    /// known age, so it never expires.
    pub fn has_failed_at(&self, ctx: &dyn WebContext, client: &ClientName, now: SystemTime) -> bool {
        let Some(record) = ctx.session_attribute(&Self::session_key(client)) else {
            return false;
        };
        let Some(recorded_at) = record.as_u64() else {
            return !record.is_null();
        };
        if self.policy.ttl.is_zero() {
            return true;
        }
        let recorded_at = UNIX_EPOCH + DurationMs::from_millis(recorded_at).to_std();
        match now.duration_since(recorded_at) {
            Ok(age) => age < self.policy.ttl.to_std(),
            // Recorded in the future: clock skew, not expiry.
            Err(_) => true,
        }
    }
}

fn epoch_millis(at: SystemTime) -> u64 {
    at.duration_since(UNIX_EPOCH)
        .map(DurationMs::from)
        .unwrap_or(DurationMs::ZERO)
        .as_millis()
}
