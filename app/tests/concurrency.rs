//! Last-seat races.
//!
//! Verifies that concurrent attempts on a depleted-to-one event produce
//! exactly one booking and never push the seat count below zero.
//!
//! Run with: `cargo test -p eventease --test concurrency -- --nocapture`

#![allow(clippy::unwrap_used, clippy::panic)] // Test code can use unwrap and panic

use eventease::{Config, Services};
use eventease_core::{BookingError, Event, User};
use eventease_testing::{fixtures, test_clock};
use std::sync::Arc;

fn services() -> Services {
    let mut config = Config::default();
    config.auth.hash_memory_kib = 1_024;
    config.auth.hash_iterations = 1;
    Services::in_memory(&config, Arc::new(test_clock()))
}

async fn event_with(services: &Services, seats: u32) -> Event {
    services
        .events
        .create_event(&fixtures::approved_organizer(), fixtures::draft("Last Seat", seats))
        .await
        .unwrap()
}

async fn enrol(services: &Services, user: User) -> User {
    services.env.directory.insert(user).await.unwrap()
}

async fn race(services: &Services, event: &Event, attempts: usize) -> (usize, usize) {
    let mut racers = Vec::with_capacity(attempts);
    for i in 0..attempts {
        racers.push(enrol(services, fixtures::attendee(&format!("Racer{i}"))).await);
    }

    let handles: Vec<_> = racers
        .into_iter()
        .map(|user| {
            let bookings = services.bookings.clone();
            let event_id = event.id;
            tokio::spawn(async move { bookings.create_booking(event_id, &user, None).await })
        })
        .collect();

    let mut won = 0;
    let mut sold_out = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => won += 1,
            Err(BookingError::NoSeats { .. }) => sold_out += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    (won, sold_out)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_attendees_one_seat() {
    let services = services();
    let event = event_with(&services, 1).await;

    let (won, sold_out) = race(&services, &event, 2).await;

    assert_eq!(won, 1);
    assert_eq!(sold_out, 1);
    assert_eq!(services.events.get_event(event.id).await.unwrap().seats_available, 0);
    assert_eq!(services.bookings.list_by_event(event.id).await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_last_seat_concurrency_100_requests() {
    println!("🧪 100 concurrent requests for 1 seat");
    let services = services();
    let event = event_with(&services, 1).await;

    let (won, sold_out) = race(&services, &event, 100).await;
    println!("  ✓ won: {won}, sold out: {sold_out}");

    assert_eq!(won, 1);
    assert_eq!(sold_out, 99);
    assert_eq!(services.events.get_event(event.id).await.unwrap().seats_available, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_oversubscribed_event_sells_exactly_capacity() {
    let services = services();
    let event = event_with(&services, 25).await;

    let (won, sold_out) = race(&services, &event, 60).await;

    assert_eq!(won, 25);
    assert_eq!(sold_out, 35);
    assert_eq!(services.bookings.list_by_event(event.id).await.unwrap().len(), 25);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_cancels_credit_one_seat() {
    let services = services();
    let event = event_with(&services, 3).await;
    let booking = services
        .bookings
        .create_booking(event.id, &enrol(&services, fixtures::alice()).await, None)
        .await
        .unwrap();

    let booking_id = booking.id;
    let handles: Vec<_> = (0..10)
        .map(|_| {
            let bookings = services.bookings.clone();
            tokio::spawn(async move { bookings.cancel_booking(booking_id).await })
        })
        .collect();

    let mut cancelled = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            cancelled += 1;
        }
    }

    assert_eq!(cancelled, 1);
    assert_eq!(services.events.get_event(event.id).await.unwrap().seats_available, 3);
}
