//! Booking Registry flows against in-memory services.
//!
//! Run with: `cargo test -p eventease --test booking_flow`

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use eventease::services::{BookingService, Environment};
use eventease::stores::{IdempotencyStore, InMemoryCatalog, InMemoryRegistry};
use eventease::{Config, Services};
use eventease_core::providers::{BookingRegistry, EventCatalog, InventoryLedger, SeatRelease};
use eventease_core::{
    Booking, BookingId, BoxFuture, EventId, EventUpdate, IdempotencyKey, Money, Result, User, UserId,
};
use eventease_testing::{fixtures, test_clock};
use std::sync::Arc;
use std::time::Duration;

fn services() -> Services {
    let mut config = Config::default();
    config.auth.hash_memory_kib = 1_024;
    config.auth.hash_iterations = 1;
    Services::in_memory(&config, Arc::new(test_clock()))
}

async fn enrol(services: &Services, user: User) -> User {
    services.env.directory.insert(user).await.unwrap()
}

async fn seats_of(services: &Services, event_id: EventId) -> u32 {
    services.events.get_event(event_id).await.unwrap().seats_available
}

#[tokio::test]
async fn test_create_then_cancel_restores_seats() {
    let services = services();
    let bob = fixtures::approved_organizer();
    let alice = enrol(&services, fixtures::alice()).await;
    let event = services
        .events
        .create_event(&bob, fixtures::draft("Jazz Night", 10))
        .await
        .unwrap();

    let booking = services
        .bookings
        .create_booking(event.id, &alice, None)
        .await
        .unwrap();
    assert_eq!(seats_of(&services, event.id).await, 9);
    assert_eq!(services.bookings.list_by_user(alice.id).await.unwrap(), vec![booking.clone()]);

    services.bookings.cancel_booking(booking.id).await.unwrap();
    assert_eq!(seats_of(&services, event.id).await, 10);
    assert!(services.bookings.list_by_event(event.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_depleted_event_rejects_without_record() {
    let services = services();
    let bob = fixtures::approved_organizer();
    let alice = enrol(&services, fixtures::alice()).await;
    let event = services
        .events
        .create_event(&bob, fixtures::draft("Tiny Gig", 1))
        .await
        .unwrap();

    services.bookings.create_booking(event.id, &alice, None).await.unwrap();
    let err = services
        .bookings
        .create_booking(event.id, &alice, None)
        .await
        .unwrap_err();

    assert_eq!(err.code(), "NO_SEATS");
    assert_eq!(seats_of(&services, event.id).await, 0);
    assert_eq!(services.bookings.list_by_event(event.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleting_event_removes_its_bookings() {
    let services = services();
    let bob = fixtures::approved_organizer();
    let event = services
        .events
        .create_event(&bob, fixtures::draft("Doomed Show", 5))
        .await
        .unwrap();
    let other = services
        .events
        .create_event(&bob, fixtures::draft("Surviving Show", 5))
        .await
        .unwrap();

    let alice = enrol(&services, fixtures::alice()).await;
    let carol = enrol(&services, fixtures::attendee("Carol")).await;
    services.bookings.create_booking(event.id, &alice, None).await.unwrap();
    services.bookings.create_booking(event.id, &carol, None).await.unwrap();
    let kept = services.bookings.create_booking(other.id, &alice, None).await.unwrap();

    let removed = services.events.delete_event(&bob, event.id).await.unwrap();
    assert_eq!(removed, 2);

    assert!(services.bookings.list_by_event(event.id).await.unwrap().is_empty());
    assert_eq!(services.bookings.list_by_user(alice.id).await.unwrap(), vec![kept]);
    assert_eq!(
        services.events.get_event(event.id).await.unwrap_err().code(),
        "NOT_FOUND"
    );
}

#[tokio::test]
async fn test_only_owner_or_admin_deletes() {
    let services = services();
    let bob = fixtures::approved_organizer();
    let event = services
        .events
        .create_event(&bob, fixtures::draft("Bob's Show", 5))
        .await
        .unwrap();

    let rival = fixtures::approved_organizer();
    let err = services.events.delete_event(&rival, event.id).await.unwrap_err();
    assert_eq!(err.code(), "UNAUTHORIZED");

    assert_eq!(
        services.events.delete_event(&fixtures::admin(), event.id).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_idempotent_retry_takes_one_seat() {
    let services = services();
    let bob = fixtures::approved_organizer();
    let alice = enrol(&services, fixtures::alice()).await;
    let event = services
        .events
        .create_event(&bob, fixtures::draft("Retry Fest", 3))
        .await
        .unwrap();
    let key = IdempotencyKey::parse("retry-fest-attempt-0001").unwrap();

    let first = services
        .bookings
        .create_booking(event.id, &alice, Some(&key))
        .await
        .unwrap();
    let second = services
        .bookings
        .create_booking(event.id, &alice, Some(&key))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(seats_of(&services, event.id).await, 2);

    // Keys are scoped per user
    let carol = enrol(&services, fixtures::attendee("Carol")).await;
    let carols = services
        .bookings
        .create_booking(event.id, &carol, Some(&key))
        .await
        .unwrap();
    assert_ne!(carols.id, first.id);
    assert_eq!(seats_of(&services, event.id).await, 1);
}

#[tokio::test]
async fn test_failed_attempt_does_not_poison_key() {
    let services = services();
    let bob = fixtures::approved_organizer();
    let alice = enrol(&services, fixtures::alice()).await;
    let event = services
        .events
        .create_event(&bob, fixtures::draft("Sold Out Soon", 0))
        .await
        .unwrap();
    let key = IdempotencyKey::parse("sold-out-attempt-0001").unwrap();

    let err = services
        .bookings
        .create_booking(event.id, &alice, Some(&key))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NO_SEATS");

    services
        .events
        .update_event(
            &bob,
            event.id,
            EventUpdate {
                seats_available: Some(1),
                ..EventUpdate::default()
            },
        )
        .await
        .unwrap();

    let booking = services
        .bookings
        .create_booking(event.id, &alice, Some(&key))
        .await
        .unwrap();
    assert_eq!(booking.event_id, event.id);
}

#[tokio::test]
async fn test_double_cancel_credits_one_seat() {
    let services = services();
    let bob = fixtures::approved_organizer();
    let alice = enrol(&services, fixtures::alice()).await;
    let event = services
        .events
        .create_event(&bob, fixtures::draft("Cancel Twice", 2))
        .await
        .unwrap();
    let booking = services.bookings.create_booking(event.id, &alice, None).await.unwrap();

    services.bookings.cancel_booking(booking.id).await.unwrap();
    let err = services.bookings.cancel_booking(booking.id).await.unwrap_err();

    assert_eq!(err.code(), "NOT_FOUND");
    assert_eq!(seats_of(&services, event.id).await, 2);
}

#[tokio::test]
async fn test_booking_keeps_price_snapshot() {
    let services = services();
    let bob = fixtures::approved_organizer();
    let alice = enrol(&services, fixtures::alice()).await;
    let event = services
        .events
        .create_event(&bob, fixtures::draft("Price Hike", 5))
        .await
        .unwrap();
    let booking = services.bookings.create_booking(event.id, &alice, None).await.unwrap();

    services
        .events
        .update_event(
            &bob,
            event.id,
            EventUpdate {
                ticket_price: Some(Money::from_cents(9_900)),
                ..EventUpdate::default()
            },
        )
        .await
        .unwrap();

    let stored = services.bookings.list_by_user(alice.id).await.unwrap();
    assert_eq!(stored[0].total_amount, Money::from_cents(5_000));
    assert_eq!(stored[0].id, booking.id);
}

#[tokio::test]
async fn test_editing_seats_keeps_bookings_counted() {
    let services = services();
    let bob = fixtures::approved_organizer();
    let event = services
        .events
        .create_event(&bob, fixtures::draft("Resized", 4))
        .await
        .unwrap();
    for name in ["Ann", "Ben"] {
        services
            .bookings
            .create_booking(event.id, &enrol(&services, fixtures::attendee(name)).await, None)
            .await
            .unwrap();
    }

    let updated = services
        .events
        .update_event(
            &bob,
            event.id,
            EventUpdate {
                seats_available: Some(10),
                ..EventUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.capacity, 12);

    // Both cancellations fit under the new capacity
    for booking in services.bookings.list_by_event(event.id).await.unwrap() {
        services.bookings.cancel_booking(booking.id).await.unwrap();
    }
    assert_eq!(seats_of(&services, event.id).await, 12);
}

fn booking_service(env: Environment, timeout: Duration) -> BookingService {
    let idempotency = Arc::new(IdempotencyStore::new(
        Duration::from_secs(60),
        env.clock.clone(),
    ));
    BookingService::new(env, idempotency, timeout)
}

/// Ledger whose reservations finish after the caller's deadline.
struct StalledLedger;

impl InventoryLedger for StalledLedger {
    fn reserve_seat(&self, _event_id: EventId) -> BoxFuture<'_, Result<bool>> {
        Box::pin(async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(true)
        })
    }

    fn release_seat(&self, _event_id: EventId) -> BoxFuture<'_, Result<SeatRelease>> {
        Box::pin(async { Ok(SeatRelease::Released) })
    }

    fn seats_available(&self, _event_id: EventId) -> BoxFuture<'_, Result<u32>> {
        Box::pin(async { Ok(0) })
    }
}

#[tokio::test]
async fn test_overrunning_attempt_settles_its_key() {
    let mut env = Environment::in_memory(Arc::new(test_clock()));
    env.ledger = Arc::new(StalledLedger);
    let alice = env.directory.insert(fixtures::alice()).await.unwrap();
    let event = env
        .catalog
        .insert(fixtures::event(fixtures::approved_organizer().id, 5))
        .await
        .unwrap();
    let bookings = booking_service(env, Duration::from_millis(20));
    let key = IdempotencyKey::parse("stalled-attempt-0001").unwrap();

    let err = bookings
        .create_booking(event.id, &alice, Some(&key))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "TIMEOUT");

    // The attempt keeps running, so its key is still taken
    let retry = bookings
        .create_booking(event.id, &alice, Some(&key))
        .await
        .unwrap_err();
    assert_eq!(retry.code(), "DUPLICATE_REQUEST");

    tokio::time::sleep(Duration::from_millis(500)).await;
    let replayed = bookings
        .create_booking(event.id, &alice, Some(&key))
        .await
        .unwrap();
    assert_eq!(bookings.list_by_user(alice.id).await.unwrap(), vec![replayed]);
}

/// Registry whose inserts finish after the caller's deadline.
struct SlowRegistry(InMemoryRegistry);

impl BookingRegistry for SlowRegistry {
    fn insert(&self, booking: Booking) -> BoxFuture<'_, Result<Booking>> {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            self.0.insert(booking).await
        })
    }

    fn get(&self, booking_id: BookingId) -> BoxFuture<'_, Result<Option<Booking>>> {
        self.0.get(booking_id)
    }

    fn remove(&self, booking_id: BookingId) -> BoxFuture<'_, Result<Option<Booking>>> {
        self.0.remove(booking_id)
    }

    fn list_by_user(&self, user_id: UserId) -> BoxFuture<'_, Result<Vec<Booking>>> {
        self.0.list_by_user(user_id)
    }

    fn list_by_event(&self, event_id: EventId) -> BoxFuture<'_, Result<Vec<Booking>>> {
        self.0.list_by_event(event_id)
    }

    fn remove_by_event(&self, event_id: EventId) -> BoxFuture<'_, Result<Vec<Booking>>> {
        self.0.remove_by_event(event_id)
    }

    fn list(&self) -> BoxFuture<'_, Result<Vec<Booking>>> {
        self.0.list()
    }
}

#[tokio::test]
async fn test_timed_out_booking_keeps_seat_and_record_in_step() {
    let mut env = Environment::in_memory(Arc::new(test_clock()));
    env.registry = Arc::new(SlowRegistry(InMemoryRegistry::new()));
    let alice = env.directory.insert(fixtures::alice()).await.unwrap();
    let event = env
        .catalog
        .insert(fixtures::event(UserId::new(), 5))
        .await
        .unwrap();
    let ledger = env.ledger.clone();
    let registry = env.registry.clone();
    let bookings = booking_service(env, Duration::from_millis(20));

    let err = bookings.create_booking(event.id, &alice, None).await.unwrap_err();
    assert_eq!(err.code(), "TIMEOUT");

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(registry.list_by_event(event.id).await.unwrap().len(), 1);
    assert_eq!(ledger.seats_available(event.id).await.unwrap(), 4);
}

/// Ledger whose releases finish after the caller's deadline.
struct SlowRelease(Arc<InMemoryCatalog>);

impl InventoryLedger for SlowRelease {
    fn reserve_seat(&self, event_id: EventId) -> BoxFuture<'_, Result<bool>> {
        self.0.reserve_seat(event_id)
    }

    fn release_seat(&self, event_id: EventId) -> BoxFuture<'_, Result<SeatRelease>> {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            self.0.release_seat(event_id).await
        })
    }

    fn seats_available(&self, event_id: EventId) -> BoxFuture<'_, Result<u32>> {
        self.0.seats_available(event_id)
    }
}

#[tokio::test]
async fn test_timed_out_cancel_still_credits_seat() {
    let mut env = Environment::in_memory(Arc::new(test_clock()));
    let catalog = Arc::new(InMemoryCatalog::new());
    let shared: Arc<dyn EventCatalog> = catalog.clone();
    env.catalog = shared;
    env.ledger = Arc::new(SlowRelease(catalog.clone()));
    let alice = env.directory.insert(fixtures::alice()).await.unwrap();
    let event = env
        .catalog
        .insert(fixtures::event(UserId::new(), 5))
        .await
        .unwrap();
    let bookings = booking_service(env, Duration::from_millis(20));

    let booking = bookings.create_booking(event.id, &alice, None).await.unwrap();
    assert_eq!(catalog.seats_available(event.id).await.unwrap(), 4);

    let err = bookings.cancel_booking(booking.id).await.unwrap_err();
    assert_eq!(err.code(), "TIMEOUT");

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(catalog.seats_available(event.id).await.unwrap(), 5);
    assert!(bookings.list_by_user(alice.id).await.unwrap().is_empty());
}
