//! Self-destruct confirmation codes.
//!
//! This module provides the `ConfirmationCodeService` which issues one-time-use six digit
//! codes keyed by gadget id. Codes live only in process memory with a 5 minute TTL: they
//! are removed on successful use, removed by a timer when the TTL elapses, and replaced
//! when a new code is issued for the same gadget.

use dashmap::DashMap;
use rand::Rng;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

/// Time-to-live for confirmation codes.
pub const CONFIRMATION_CODE_TTL: Duration = Duration::from_secs(5 * 60);

/// Stored code with its issue number and expiration timestamp.
struct PendingCode {
    /// The six digit code.
    code: String,
    /// Unique per `generate` call; lets an expiry timer recognise its own code.
    issue: u64,
    /// Timestamp when this code expires.
    expires_at: Instant,
}

impl PendingCode {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    fn matches(&self, input: &str) -> bool {
        self.code == input
    }
}

/// A code removed from the vault by [`ConfirmationCodeService::redeem`].
pub struct RedeemedCode(PendingCode);

/// A freshly issued confirmation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    pub code: String,
    pub expires_in: Duration,
}

impl IssuedCode {
    /// Lifetime in the `"5 minutes"` form used in API responses.
    pub fn expires_in_label(&self) -> String {
        let secs = self.expires_in.as_secs();
        match (secs / 60, secs % 60) {
            (1, 0) => "1 minute".to_string(),
            (minutes, 0) => format!("{} minutes", minutes),
            _ => format!("{} seconds", secs),
        }
    }
}

/// In-memory vault of pending self-destruct confirmation codes.
///
/// Keyed by gadget id. Operations on one id are atomic with respect to each other (the
/// map shards lock per key), while different ids never contend on the same entry.
/// Cloning is cheap: clones share the same map.
#[derive(Clone)]
pub struct ConfirmationCodeService {
    codes: Arc<DashMap<Uuid, PendingCode>>,
    next_issue: Arc<AtomicU64>,
    ttl: Duration,
}

impl ConfirmationCodeService {
    /// Creates an empty vault with the standard 5 minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(CONFIRMATION_CODE_TTL)
    }

    /// Creates an empty vault with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            codes: Arc::new(DashMap::new()),
            next_issue: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    /// Issues a new code for `gadget_id`, replacing any pending one.
    ///
    /// Spawns a timer that removes the code once the TTL elapses. The timer only removes
    /// the entry it created; if a newer code was issued in the meantime it is left alone.
    /// Must be called from within a tokio runtime.
    ///
    /// # Arguments
    /// - `gadget_id` - Gadget the code authorises to self-destruct
    ///
    /// # Returns
    /// - `IssuedCode` - The six digit code and its lifetime
    pub fn generate(&self, gadget_id: Uuid) -> IssuedCode {
        let code = Self::generate_random_code();
        let issue = self.next_issue.fetch_add(1, Ordering::Relaxed);

        self.codes.insert(
            gadget_id,
            PendingCode {
                code: code.clone(),
                issue,
                expires_at: Instant::now() + self.ttl,
            },
        );

        let codes = Arc::clone(&self.codes);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if codes
                .remove_if(&gadget_id, |_, pending| pending.issue == issue)
                .is_some()
            {
                tracing::debug!(%gadget_id, "Confirmation code expired unused");
            }
        });

        IssuedCode {
            code,
            expires_in: self.ttl,
        }
    }

    /// Validates `input_code` for `gadget_id` and consumes it on success.
    ///
    /// # Returns
    /// - `true` - A pending, unexpired code matched exactly and has been removed
    /// - `false` - No code, wrong code, or expired code (a wrong guess keeps the code)
    #[cfg(test)]
    pub fn consume(&self, gadget_id: Uuid, input_code: &str) -> bool {
        self.redeem(gadget_id, input_code).is_some()
    }

    /// Like [`consume`](Self::consume), but hands back the removed code so it can be
    /// [`restore`](Self::restore)d if the action it authorised does not go through.
    pub fn redeem(&self, gadget_id: Uuid, input_code: &str) -> Option<RedeemedCode> {
        self.codes
            .remove_if(&gadget_id, |_, pending| {
                !pending.is_expired() && pending.matches(input_code)
            })
            .map(|(_, pending)| RedeemedCode(pending))
    }

    /// Puts a redeemed code back with its original deadline.
    ///
    /// Does nothing if the code has expired meanwhile or a newer code was issued for the
    /// gadget. The expiry timer of the original issue still applies.
    pub fn restore(&self, gadget_id: Uuid, redeemed: RedeemedCode) {
        let RedeemedCode(pending) = redeemed;
        if pending.is_expired() {
            return;
        }

        self.codes.entry(gadget_id).or_insert(pending);
    }

    /// Drops any pending code for `gadget_id`.
    pub fn invalidate(&self, gadget_id: Uuid) {
        self.codes.remove(&gadget_id);
    }

    /// Uniform six digit code in `100000..=999999`.
    fn generate_random_code() -> String {
        rand::rng().random_range(100_000..=999_999u32).to_string()
    }

    /// Checks whether a code is stored for `gadget_id`, expired or not.
    #[cfg(test)]
    pub fn has_pending_code(&self, gadget_id: Uuid) -> bool {
        self.codes.contains_key(&gadget_id)
    }
}

impl Default for ConfirmationCodeService {
    fn default() -> Self {
        Self::new()
    }
}
