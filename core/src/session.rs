//! Per-request session scoping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Identity and ordering scope for a single pipeline request.
///
/// A session is created per request and never reused. The sequence token
/// is strictly monotonic process-wide, so two requests from the same
/// caller in the same second still get distinct session ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSession {
    /// Caller identity the request runs under.
    pub caller_id: String,
    /// Unix-time seconds when the session was opened.
    pub started_at: u64,
    /// Process-wide monotonic sequence number.
    pub token: u64,
}

impl RequestSession {
    /// Opens a fresh session for `caller_id`.
    #[must_use]
    pub fn begin(caller_id: impl Into<String>) -> Self {
        let started_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        Self {
            caller_id: caller_id.into(),
            started_at,
            token: SEQUENCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Session id in `caller-seconds-token` form, for log correlation.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}-{}-{}", self.caller_id, self.started_at, self.token)
    }
}
