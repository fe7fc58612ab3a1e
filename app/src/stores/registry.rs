//! In-memory booking registry.

use super::poisoned;
use eventease_core::providers::BookingRegistry;
use eventease_core::{
    Booking, BookingError, BookingId, BoxFuture, EventId, Result, UserId,
};
use futures::future;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

#[derive(Default)]
struct Inner {
    /// Keyed by insertion sequence so iteration is insertion order
    bookings: BTreeMap<u64, Booking>,
    index: HashMap<BookingId, u64>,
    next_seq: u64,
}

impl Inner {
    fn filtered(&self, keep: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        self.bookings.values().filter(|b| keep(b)).cloned().collect()
    }
}

/// Booking records in insertion order.
#[derive(Default)]
pub struct InMemoryRegistry {
    inner: RwLock<Inner>,
}

impl std::fmt::Debug for InMemoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bookings = self.inner.read().map(|inner| inner.index.len()).unwrap_or_default();
        f.debug_struct("InMemoryRegistry").field("bookings", &bookings).finish()
    }
}

impl InMemoryRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_now(&self, booking: Booking) -> Result<Booking> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        if inner.index.contains_key(&booking.id) {
            return Err(BookingError::Validation(format!(
                "booking {} already exists",
                booking.id
            )));
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.index.insert(booking.id, seq);
        inner.bookings.insert(seq, booking.clone());
        Ok(booking)
    }

    fn get_now(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .index
            .get(&booking_id)
            .and_then(|seq| inner.bookings.get(seq))
            .cloned())
    }

    fn remove_now(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        Ok(inner
            .index
            .remove(&booking_id)
            .and_then(|seq| inner.bookings.remove(&seq)))
    }

    fn list_where(&self, keep: impl Fn(&Booking) -> bool) -> Result<Vec<Booking>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.filtered(keep))
    }

    fn remove_by_event_now(&self, event_id: EventId) -> Result<Vec<Booking>> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let doomed: Vec<u64> = inner
            .bookings
            .iter()
            .filter(|(_, booking)| booking.event_id == event_id)
            .map(|(seq, _)| *seq)
            .collect();

        let mut removed = Vec::with_capacity(doomed.len());
        for seq in doomed {
            if let Some(booking) = inner.bookings.remove(&seq) {
                inner.index.remove(&booking.id);
                removed.push(booking);
            }
        }
        Ok(removed)
    }
}

impl BookingRegistry for InMemoryRegistry {
    fn insert(&self, booking: Booking) -> BoxFuture<'_, Result<Booking>> {
        Box::pin(future::ready(self.insert_now(booking)))
    }

    fn get(&self, booking_id: BookingId) -> BoxFuture<'_, Result<Option<Booking>>> {
        Box::pin(future::ready(self.get_now(booking_id)))
    }

    fn remove(&self, booking_id: BookingId) -> BoxFuture<'_, Result<Option<Booking>>> {
        Box::pin(future::ready(self.remove_now(booking_id)))
    }

    fn list_by_user(&self, user_id: UserId) -> BoxFuture<'_, Result<Vec<Booking>>> {
        Box::pin(future::ready(self.list_where(|b| b.user_id == user_id)))
    }

    fn list_by_event(&self, event_id: EventId) -> BoxFuture<'_, Result<Vec<Booking>>> {
        Box::pin(future::ready(self.list_where(|b| b.event_id == event_id)))
    }

    fn remove_by_event(&self, event_id: EventId) -> BoxFuture<'_, Result<Vec<Booking>>> {
        Box::pin(future::ready(self.remove_by_event_now(event_id)))
    }

    fn list(&self) -> BoxFuture<'_, Result<Vec<Booking>>> {
        Box::pin(future::ready(self.list_where(|_| true)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use eventease_core::environment::Clock;
    use eventease_testing::{fixtures, test_clock};

    fn booking_for(event: &eventease_core::Event, user: &eventease_core::User) -> Booking {
        Booking::snapshot(BookingId::new(), event, user, test_clock().now())
    }

    #[test]
    fn test_views_keep_insertion_order() {
        let registry = InMemoryRegistry::new();
        let alice = fixtures::alice();
        let bob = fixtures::attendee("Bob");
        let concert = fixtures::event(UserId::new(), 10);
        let talk = fixtures::event(UserId::new(), 10);

        let first = registry.insert_now(booking_for(&concert, &alice)).unwrap();
        let second = registry.insert_now(booking_for(&talk, &alice)).unwrap();
        let third = registry.insert_now(booking_for(&concert, &bob)).unwrap();

        let mine: Vec<BookingId> = registry
            .list_where(|b| b.user_id == alice.id)
            .unwrap()
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(mine, vec![first.id, second.id]);

        let concert_ids: Vec<BookingId> = registry
            .list_where(|b| b.event_id == concert.id)
            .unwrap()
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(concert_ids, vec![first.id, third.id]);
    }

    #[test]
    fn test_remove_yields_record_once() {
        let registry = InMemoryRegistry::new();
        let booking = registry
            .insert_now(booking_for(&fixtures::event(UserId::new(), 1), &fixtures::alice()))
            .unwrap();

        assert!(registry.remove_now(booking.id).unwrap().is_some());
        assert!(registry.remove_now(booking.id).unwrap().is_none());
        assert!(registry.get_now(booking.id).unwrap().is_none());
    }

    #[test]
    fn test_remove_by_event_leaves_other_events() {
        let registry = InMemoryRegistry::new();
        let alice = fixtures::alice();
        let doomed = fixtures::event(UserId::new(), 5);
        let kept = fixtures::event(UserId::new(), 5);
        registry.insert_now(booking_for(&doomed, &alice)).unwrap();
        let survivor = registry.insert_now(booking_for(&kept, &alice)).unwrap();
        registry.insert_now(booking_for(&doomed, &alice)).unwrap();

        assert_eq!(registry.remove_by_event_now(doomed.id).unwrap().len(), 2);
        let left = registry.list_where(|_| true).unwrap();
        assert_eq!(left, vec![survivor]);
    }
}
