//! Ready-made users and events.
//!
//! Password hashes here are placeholders; tests that log in go through the
//! authentication provider instead.

use chrono::{DateTime, Duration, Utc};
use eventease_core::environment::Clock;
use eventease_core::{Event, EventDraft, EventId, Money, OrganizerStatus, Role, User, UserId};

use crate::test_clock;

/// A plain attendee
#[must_use]
pub fn attendee(name: &str) -> User {
    User::new(
        UserId::new(),
        name,
        &format!("{}@example.com", name.to_lowercase()),
        "not-a-real-hash",
        Role::User,
    )
}

/// Alice, the demo attendee
#[must_use]
pub fn alice() -> User {
    attendee("Alice")
}

/// An organizer awaiting approval
#[must_use]
pub fn pending_organizer() -> User {
    User::new(
        UserId::new(),
        "Dana Organizer",
        "dana@example.com",
        "not-a-real-hash",
        Role::Organizer,
    )
}

/// Bob, an approved organizer
#[must_use]
pub fn approved_organizer() -> User {
    User::new(
        UserId::new(),
        "Bob Organizer",
        "bob@example.com",
        "not-a-real-hash",
        Role::Organizer,
    )
    .with_organizer_status(OrganizerStatus::Approved)
}

/// Charlie, the admin
#[must_use]
pub fn admin() -> User {
    User::new(
        UserId::new(),
        "Charlie Admin",
        "charlie@example.com",
        "not-a-real-hash",
        Role::Admin,
    )
}

/// A week after the test clock
#[must_use]
pub fn next_week() -> DateTime<Utc> {
    test_clock().now() + Duration::days(7)
}

/// Draft for a $50 music event with `seats` seats
#[must_use]
pub fn draft(title: &str, seats: u32) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: format!("{title}, live."),
        category: "Music".to_string(),
        location: "Central Park, New York".to_string(),
        starts_at: next_week(),
        ticket_price: Money::from_cents(5_000),
        seats_available: seats,
        image_url: "https://picsum.photos/seed/fixture/400/250".to_string(),
    }
}

/// A full event owned by `created_by`
#[must_use]
pub fn event(created_by: UserId, seats: u32) -> Event {
    Event {
        id: EventId::new(),
        title: "Fixture Concert".to_string(),
        description: "Fixture Concert, live.".to_string(),
        category: "Music".to_string(),
        location: "Central Park, New York".to_string(),
        starts_at: next_week(),
        ticket_price: Money::from_cents(5_000),
        seats_available: seats,
        capacity: seats,
        image_url: String::new(),
        created_by,
    }
}
