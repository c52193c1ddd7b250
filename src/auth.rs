//! Mock session tokens.
//!
//! Tokens are a fixed prefix plus a millisecond stamp. They are not random,
//! not stored and never verified, so they must not be treated as credentials.

use crate::clock::Clock;
use std::{
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
    time::Duration,
};
use tracing::debug;

pub const SESSION_TOKEN_PREFIX: &str = "demo-session-";
pub const CSRF_TOKEN_PREFIX: &str = "csrf-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedTokens {
    pub session_token: String,
    pub csrf_token: String,
    /// Stamp embedded in both tokens, in Unix milliseconds.
    pub issued_at_ms: i64,
    pub expires_at_ms: i64,
}

pub struct TokenIssuer {
    clock: Arc<dyn Clock>,
    ttl: Duration,
    last_stamp_ms: AtomicI64,
}

impl TokenIssuer {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            last_stamp_ms: AtomicI64::new(0),
        }
    }

    /// Stamps are strictly increasing per issuer, so two calls within the same
    /// millisecond still produce distinct tokens.
    pub fn issue(&self) -> IssuedTokens {
        let now_ms = self.clock.now().timestamp_millis();
        let next = |last: i64| now_ms.max(last.saturating_add(1));

        let previous = self
            .last_stamp_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(next(last)))
            .unwrap_or_else(|last| last);
        let stamp = next(previous);

        let ttl_ms = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        debug!("Issued mock tokens with stamp {}", stamp);

        IssuedTokens {
            session_token: format!("{SESSION_TOKEN_PREFIX}{stamp}"),
            csrf_token: format!("{CSRF_TOKEN_PREFIX}{stamp}"),
            issued_at_ms: stamp,
            expires_at_ms: stamp.saturating_add(ttl_ms),
        }
    }
}
