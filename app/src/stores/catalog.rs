//! In-memory event catalog and inventory ledger.
//!
//! Both traits are served by one store so the seat counter and the event
//! record can never disagree about whether an event exists.
//!
//! ```text
//! reserve_seat / release_seat   read lock  + CAS on the event's AtomicU32
//! update / remove / insert      write lock (excludes every CAS)
//! ```

use super::poisoned;
use eventease_core::providers::{EventCatalog, InventoryLedger, SeatRelease};
use eventease_core::{BookingError, BoxFuture, Event, EventId, EventUpdate, Result};
use futures::future;
use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU32, Ordering};

struct Entry {
    /// Record with a stale `seats_available`; `seats` is authoritative
    event: Event,
    seats: AtomicU32,
}

impl Entry {
    fn new(event: Event) -> Self {
        let seats = AtomicU32::new(event.seats_available);
        Self { event, seats }
    }

    fn snapshot(&self) -> Event {
        let mut event = self.event.clone();
        event.seats_available = self.seats.load(Ordering::SeqCst);
        event
    }
}

#[derive(Default)]
struct Inner {
    entries: HashMap<EventId, Entry>,
    /// Newest first
    order: VecDeque<EventId>,
}

/// Event records with lock-free seat reservation.
#[derive(Default)]
pub struct InMemoryCatalog {
    inner: RwLock<Inner>,
}

impl std::fmt::Debug for InMemoryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let events = self.inner.read().map(|inner| inner.entries.len()).unwrap_or_default();
        f.debug_struct("InMemoryCatalog").field("events", &events).finish()
    }
}

impl InMemoryCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn reserve_now(&self, event_id: EventId) -> Result<bool> {
        let inner = self.inner.read().map_err(poisoned)?;
        let entry = inner
            .entries
            .get(&event_id)
            .ok_or_else(|| BookingError::event_not_found(event_id))?;

        Ok(entry
            .seats
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |seats| seats.checked_sub(1))
            .is_ok())
    }

    fn release_now(&self, event_id: EventId) -> Result<SeatRelease> {
        let inner = self.inner.read().map_err(poisoned)?;
        let Some(entry) = inner.entries.get(&event_id) else {
            return Ok(SeatRelease::EventGone);
        };

        let capacity = entry.event.capacity;
        let released = entry
            .seats
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |seats| {
                (seats < capacity).then_some(seats + 1)
            })
            .is_ok();

        Ok(if released {
            SeatRelease::Released
        } else {
            SeatRelease::AtCapacity
        })
    }

    fn seats_now(&self, event_id: EventId) -> Result<u32> {
        let inner = self.inner.read().map_err(poisoned)?;
        inner
            .entries
            .get(&event_id)
            .map(|entry| entry.seats.load(Ordering::SeqCst))
            .ok_or_else(|| BookingError::event_not_found(event_id))
    }

    fn insert_now(&self, event: Event) -> Result<Event> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        if inner.entries.contains_key(&event.id) {
            return Err(BookingError::Validation(format!(
                "event {} already exists",
                event.id
            )));
        }

        inner.order.push_front(event.id);
        inner.entries.insert(event.id, Entry::new(event.clone()));
        Ok(event)
    }

    fn get_now(&self, event_id: EventId) -> Result<Option<Event>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.entries.get(&event_id).map(Entry::snapshot))
    }

    fn update_now(&self, event_id: EventId, update: EventUpdate) -> Result<Event> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let entry = inner
            .entries
            .get_mut(&event_id)
            .ok_or_else(|| BookingError::event_not_found(event_id))?;

        let mut event = entry.snapshot();
        event.apply_update(update)?;

        entry.seats.store(event.seats_available, Ordering::SeqCst);
        entry.event = event.clone();
        Ok(event)
    }

    fn remove_now(&self, event_id: EventId) -> Result<Option<Event>> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let removed = inner.entries.remove(&event_id).map(|entry| entry.snapshot());
        if removed.is_some() {
            inner.order.retain(|id| *id != event_id);
        }
        Ok(removed)
    }

    fn list_now(&self) -> Result<Vec<Event>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.entries.get(id).map(Entry::snapshot))
            .collect())
    }
}

impl InventoryLedger for InMemoryCatalog {
    fn reserve_seat(&self, event_id: EventId) -> BoxFuture<'_, Result<bool>> {
        Box::pin(future::ready(self.reserve_now(event_id)))
    }

    fn release_seat(&self, event_id: EventId) -> BoxFuture<'_, Result<SeatRelease>> {
        Box::pin(future::ready(self.release_now(event_id)))
    }

    fn seats_available(&self, event_id: EventId) -> BoxFuture<'_, Result<u32>> {
        Box::pin(future::ready(self.seats_now(event_id)))
    }
}

impl EventCatalog for InMemoryCatalog {
    fn insert(&self, event: Event) -> BoxFuture<'_, Result<Event>> {
        Box::pin(future::ready(self.insert_now(event)))
    }

    fn get(&self, event_id: EventId) -> BoxFuture<'_, Result<Option<Event>>> {
        Box::pin(future::ready(self.get_now(event_id)))
    }

    fn update(&self, event_id: EventId, update: EventUpdate) -> BoxFuture<'_, Result<Event>> {
        Box::pin(future::ready(self.update_now(event_id, update)))
    }

    fn remove(&self, event_id: EventId) -> BoxFuture<'_, Result<Option<Event>>> {
        Box::pin(future::ready(self.remove_now(event_id)))
    }

    fn list(&self) -> BoxFuture<'_, Result<Vec<Event>>> {
        Box::pin(future::ready(self.list_now()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use eventease_core::UserId;
    use eventease_testing::fixtures;

    fn catalog_with(seats: u32) -> (InMemoryCatalog, EventId) {
        let catalog = InMemoryCatalog::new();
        let event = fixtures::event(UserId::new(), seats);
        let id = event.id;
        catalog.insert_now(event).unwrap();
        (catalog, id)
    }

    #[test]
    fn test_reserve_until_depleted() {
        let (catalog, id) = catalog_with(2);
        assert!(catalog.reserve_now(id).unwrap());
        assert!(catalog.reserve_now(id).unwrap());
        assert!(!catalog.reserve_now(id).unwrap());
        assert_eq!(catalog.seats_now(id).unwrap(), 0);
    }

    #[test]
    fn test_reserve_unknown_event_is_not_found() {
        let catalog = InMemoryCatalog::new();
        let err = catalog.reserve_now(EventId::new()).unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_release_is_capped_at_capacity() {
        let (catalog, id) = catalog_with(1);
        assert_eq!(catalog.release_now(id).unwrap(), SeatRelease::AtCapacity);
        assert_eq!(catalog.seats_now(id).unwrap(), 1);

        assert!(catalog.reserve_now(id).unwrap());
        assert_eq!(catalog.release_now(id).unwrap(), SeatRelease::Released);
        assert_eq!(catalog.seats_now(id).unwrap(), 1);
    }

    #[test]
    fn test_release_on_missing_event_is_noop() {
        let catalog = InMemoryCatalog::new();
        assert_eq!(
            catalog.release_now(EventId::new()).unwrap(),
            SeatRelease::EventGone
        );
    }

    #[test]
    fn test_list_is_newest_first() {
        let catalog = InMemoryCatalog::new();
        let owner = UserId::new();
        let first = catalog.insert_now(fixtures::event(owner, 1)).unwrap();
        let second = catalog.insert_now(fixtures::event(owner, 1)).unwrap();

        let ids: Vec<EventId> = catalog.list_now().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_update_keeps_booked_seats_counted() {
        let (catalog, id) = catalog_with(10);
        for _ in 0..3 {
            assert!(catalog.reserve_now(id).unwrap());
        }

        let updated = catalog
            .update_now(
                id,
                EventUpdate {
                    seats_available: Some(20),
                    ..EventUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.seats_available, 20);
        assert_eq!(updated.capacity, 23);
        assert_eq!(catalog.seats_now(id).unwrap(), 20);
    }

    #[test]
    fn test_get_reflects_live_seat_count() {
        let (catalog, id) = catalog_with(5);
        assert!(catalog.reserve_now(id).unwrap());
        assert_eq!(catalog.get_now(id).unwrap().unwrap().seats_available, 4);
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let catalog = InMemoryCatalog::new();
        let event = fixtures::event(UserId::new(), 1);
        catalog.insert_now(event.clone()).unwrap();
        assert_eq!(catalog.insert_now(event).unwrap_err().code(), "VALIDATION");
    }

    #[test]
    fn test_remove_drops_counter() {
        let (catalog, id) = catalog_with(1);
        assert!(catalog.remove_now(id).unwrap().is_some());
        assert!(catalog.remove_now(id).unwrap().is_none());
        assert!(catalog.list_now().unwrap().is_empty());
        assert_eq!(catalog.release_now(id).unwrap(), SeatRelease::EventGone);
    }
}
