//! Demo catalog.
//!
//! Loaded through the services, so the demo booking takes its seat like any
//! other and every account password is hashed.

use crate::services::Services;
use chrono::{TimeZone, Utc};
use eventease_core::{
    BookingError, Event, EventDraft, Money, OrganizerStatus, Result, Role, User, UserId,
};

/// Password of every demo account
pub const DEMO_PASSWORD: &str = "password";

/// Accounts and events created by [`load_demo_data`].
#[derive(Clone, Debug)]
pub struct DemoData {
    /// Attendee with one booking
    pub alice: User,
    /// Approved organizer owning every event
    pub bob: User,
    /// Administrator
    pub charlie: User,
    /// Catalog, newest first
    pub events: Vec<Event>,
}

struct DemoEvent {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    location: &'static str,
    /// (year, month, day, hour, minute)
    starts_at: (i32, u32, u32, u32, u32),
    price_cents: u64,
    seats: u32,
    image_seed: &'static str,
}

/// Listed order: the first entry lists first.
const DEMO_EVENTS: [DemoEvent; 8] = [
    DemoEvent {
        title: "Summer Music Festival",
        description: "Join us for a weekend of live music, food trucks, and fun under the sun. Featuring top artists from around the globe!",
        category: "Music",
        location: "Central Park, New York",
        starts_at: (2024, 8, 15, 18, 0),
        price_cents: 7_500,
        seats: 500,
        image_seed: "musicfest",
    },
    DemoEvent {
        title: "Tech Conference 2024",
        description: "The biggest tech conference of the year. Explore the future of technology with industry leaders and innovators.",
        category: "Technology",
        location: "Moscone Center, San Francisco",
        starts_at: (2024, 9, 20, 9, 0),
        price_cents: 29_999,
        seats: 150,
        image_seed: "techconf",
    },
    DemoEvent {
        title: "Local Art Exhibition",
        description: "Discover talented local artists and their stunning creations. A perfect evening for art lovers.",
        category: "Arts",
        location: "Downtown Art Gallery",
        starts_at: (2024, 7, 30, 19, 0),
        price_cents: 2_500,
        seats: 0,
        image_seed: "artshow",
    },
    DemoEvent {
        title: "Gourmet Food & Wine Pairing",
        description: "An exclusive evening of gourmet food and fine wine pairing, guided by a master sommelier.",
        category: "Food & Drink",
        location: "The Vineyard Restaurant",
        starts_at: (2024, 8, 5, 19, 30),
        price_cents: 12_000,
        seats: 40,
        image_seed: "wine",
    },
    DemoEvent {
        title: "Morning Yoga Retreat",
        description: "Start your day with a rejuvenating yoga session in a peaceful garden setting. All levels welcome.",
        category: "Wellness",
        location: "Serenity Gardens",
        starts_at: (2024, 8, 10, 8, 0),
        price_cents: 3_000,
        seats: 25,
        image_seed: "yoga",
    },
    DemoEvent {
        title: "Startup Pitch Night",
        description: "Watch the next generation of entrepreneurs pitch their ideas to a panel of venture capitalists.",
        category: "Business",
        location: "Innovation Hub",
        starts_at: (2024, 9, 5, 18, 0),
        price_cents: 1_500,
        seats: 100,
        image_seed: "startup",
    },
    DemoEvent {
        title: "Community Charity Run 5K",
        description: "Lace up your running shoes for a good cause! All proceeds go to the local children's hospital.",
        category: "Community",
        location: "Lakeside Park",
        starts_at: (2024, 9, 15, 9, 0),
        price_cents: 2_000,
        seats: 300,
        image_seed: "charityrun",
    },
    DemoEvent {
        title: "Advanced JavaScript Workshop",
        description: "Deep dive into advanced JavaScript concepts like asynchronous programming, closures, and performance optimization.",
        category: "Technology",
        location: "Online",
        starts_at: (2024, 8, 22, 10, 0),
        price_cents: 15_000,
        seats: 50,
        image_seed: "javascript",
    },
];

impl DemoEvent {
    fn draft(&self) -> Result<EventDraft> {
        let (year, month, day, hour, minute) = self.starts_at;
        let starts_at = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .ok_or_else(|| BookingError::Validation(format!("invalid start for {}", self.title)))?;

        Ok(EventDraft {
            title: self.title.to_string(),
            description: self.description.to_string(),
            category: self.category.to_string(),
            location: self.location.to_string(),
            starts_at,
            ticket_price: Money::from_cents(self.price_cents),
            seats_available: self.seats,
            image_url: format!("https://picsum.photos/seed/{}/400/250", self.image_seed),
        })
    }
}

/// Loads three demo accounts, eight events and Alice's booking for
/// "Tech Conference 2024".
///
/// # Errors
///
/// Returns [`BookingError::EmailTaken`] if the demo accounts
/// already exist.
#[tracing::instrument(skip(services))]
pub async fn load_demo_data(services: &Services) -> Result<DemoData> {
    let auth = &services.auth;
    let alice = auth
        .provision(
            User::new(UserId::new(), "Alice", "alice@example.com", "", Role::User),
            DEMO_PASSWORD,
        )
        .await?;
    let bob = auth
        .provision(
            User::new(UserId::new(), "Bob Organizer", "bob@example.com", "", Role::Organizer)
                .with_organizer_status(OrganizerStatus::Approved),
            DEMO_PASSWORD,
        )
        .await?;
    let charlie = auth
        .provision(
            User::new(UserId::new(), "Charlie Admin", "charlie@example.com", "", Role::Admin),
            DEMO_PASSWORD,
        )
        .await?;

    // New events list first, so create them last-to-first
    for demo in DEMO_EVENTS.iter().rev() {
        services.events.create_event(&bob, demo.draft()?).await?;
    }
    let events = services.events.list_events().await?;

    if let Some(conference) = events.iter().find(|e| e.title == "Tech Conference 2024") {
        services
            .bookings
            .create_booking(conference.id, &alice, None)
            .await?;
    }
    let events = services.events.list_events().await?;

    tracing::info!(users = 3, events = events.len(), "Demo data loaded");
    Ok(DemoData {
        alice,
        bob,
        charlie,
        events,
    })
}
