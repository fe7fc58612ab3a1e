//! Idempotency keys for booking attempts.
//!
//! Keys are scoped per user. A claimed key is `Pending` until its attempt
//! succeeds, then `Completed` with the booking until the TTL runs out. A
//! failed attempt frees the key so the client can retry.
//!
//! [`PendingKey`] owns a handle to the store, so an attempt that outlives
//! its caller's deadline still settles the key when it finishes.

use chrono::{DateTime, Duration, Utc};
use eventease_core::environment::Clock;
use eventease_core::{Booking, IdempotencyKey, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

type Slot = (UserId, IdempotencyKey);

#[derive(Debug)]
enum Entry {
    Pending,
    Completed {
        booking: Booking,
        expires_at: DateTime<Utc>,
    },
}

/// Result of claiming a key.
#[derive(Debug)]
pub enum Claim {
    /// First use; the attempt may proceed
    Fresh(PendingKey),
    /// The key already produced this booking
    Replay(Booking),
    /// Another attempt with this key is still running
    InFlight,
}

/// Per-user idempotency key store.
pub struct IdempotencyStore {
    entries: Mutex<HashMap<Slot, Entry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for IdempotencyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdempotencyStore")
            .field("keys", &self.lock().len())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl IdempotencyStore {
    /// Create a store remembering completed keys for `ttl`
    #[must_use]
    pub fn new(ttl: std::time::Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
            clock,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Slot, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims `key` for `user_id`.
    pub fn claim(self: &Arc<Self>, user_id: UserId, key: &IdempotencyKey) -> Claim {
        let now = self.clock.now();
        let mut entries = self.lock();
        entries.retain(|_, entry| match entry {
            Entry::Pending => true,
            Entry::Completed { expires_at, .. } => *expires_at > now,
        });

        let slot = (user_id, key.clone());
        if let Some(entry) = entries.get(&slot) {
            return match entry {
                Entry::Pending => Claim::InFlight,
                Entry::Completed { booking, .. } => Claim::Replay(booking.clone()),
            };
        }

        entries.insert(slot.clone(), Entry::Pending);
        Claim::Fresh(PendingKey {
            store: Arc::clone(self),
            slot: Some(slot),
        })
    }

    /// Number of remembered keys, pending included
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// No keys remembered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// A claimed key. Dropping it without [`complete`](Self::complete) frees the key.
#[derive(Debug)]
pub struct PendingKey {
    store: Arc<IdempotencyStore>,
    slot: Option<Slot>,
}

impl PendingKey {
    /// Records the booking produced under this key.
    pub fn complete(mut self, booking: &Booking) {
        if let Some(slot) = self.slot.take() {
            let expires_at = self
                .store
                .clock
                .now()
                .checked_add_signed(self.store.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            self.store.lock().insert(
                slot,
                Entry::Completed {
                    booking: booking.clone(),
                    expires_at,
                },
            );
        }
    }
}

impl Drop for PendingKey {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            self.store.lock().remove(&slot);
        }
    }
}
