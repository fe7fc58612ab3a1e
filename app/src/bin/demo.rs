//! EventEase walkthrough.
//!
//! Runs the main flows against in-memory services and prints each step:
//! - seat booking, idempotent retry and cancellation
//! - sold-out rejection and a race for the last seat
//! - organizer sign-up, the role gate, and admin approval
//! - admin analytics and an assistant answer (fallback without an API key)
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin demo
//! ```

use eventease::{Config, Services, seed};
use eventease_assistant::{Assistant, GeminiClient};
use eventease_core::access::{can_manage_events, route_after_login};
use eventease_core::environment::SystemClock;
use eventease_core::{BookingError, EventDraft, IdempotencyKey, Money, Registration, Role};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,eventease=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n============================================");
    println!("   EventEase - Live Demo");
    println!("============================================\n");

    let config = Config::from_env();
    let services = Services::in_memory(&config, Arc::new(SystemClock));
    let demo = seed::load_demo_data(&services).await?;
    println!("✓ Demo catalog loaded: {} events\n", demo.events.len());

    // ========== Booking ==========

    println!("📋 Scenario 1: Alice books the Summer Music Festival");
    let festival = demo
        .events
        .iter()
        .find(|e| e.title == "Summer Music Festival")
        .ok_or("festival missing from demo catalog")?;
    let key = IdempotencyKey::parse("demo-festival-booking-0001")?;

    let booking = services
        .bookings
        .create_booking(festival.id, &demo.alice, Some(&key))
        .await?;
    println!("  ✓ Booked {} for {}", booking.id, booking.total_amount);

    let retry = services
        .bookings
        .create_booking(festival.id, &demo.alice, Some(&key))
        .await?;
    println!("  ✓ Retry with the same key returned booking {}", retry.id);
    let seats = services.events.get_event(festival.id).await?.seats_available;
    println!("  → Seats left: {seats} (one seat taken, not two)\n");

    println!("📋 Scenario 2: Sold-out event");
    let art = demo
        .events
        .iter()
        .find(|e| e.is_sold_out())
        .ok_or("no sold-out event in demo catalog")?;
    match services.bookings.create_booking(art.id, &demo.alice, None).await {
        Err(BookingError::NoSeats { .. }) => println!("  ✓ \"{}\" rejected with NO_SEATS\n", art.title),
        other => println!("  ✗ Unexpected outcome: {other:?}\n"),
    }

    // ========== Organizer approval ==========

    println!("📋 Scenario 3: Organizer sign-up and approval");
    let dana = services
        .auth
        .register(Registration {
            name: "Dana Promoter".to_string(),
            email: "dana@example.com".to_string(),
            password: "password".to_string(),
            role: Role::Organizer,
        })
        .await?;
    let target = route_after_login(&dana);
    println!(
        "  → Dana lands on {:?} (pending notice: {}), can manage events: {}",
        target.page,
        target.pending_approval,
        can_manage_events(&dana)
    );

    let dana = services.admin.approve_organizer(&demo.charlie, dana.id).await?;
    println!(
        "  ✓ Charlie approved Dana → {:?}, can manage events: {}\n",
        route_after_login(&dana).page,
        can_manage_events(&dana)
    );

    // ========== Last-seat race ==========

    println!("📋 Scenario 4: Two attendees race for the last seat");
    let meetup = services
        .events
        .create_event(
            &dana,
            EventDraft {
                title: "Rooftop Jazz Session".to_string(),
                description: "An intimate set for exactly one lucky listener.".to_string(),
                category: "Music".to_string(),
                location: "Skyline Terrace".to_string(),
                starts_at: chrono::Utc::now() + chrono::Duration::days(14),
                ticket_price: Money::from_cents(4_000),
                seats_available: 1,
                image_url: String::new(),
            },
        )
        .await?;

    let (first, second) = tokio::join!(
        services.bookings.create_booking(meetup.id, &demo.alice, None),
        services.bookings.create_booking(meetup.id, &demo.bob, None),
    );
    let winners = [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count();
    println!("  ✓ Successful bookings: {winners} (expected 1)");

    if let Some(won) = first.ok().or(second.ok()) {
        services.bookings.cancel_booking(won.id).await?;
        let seats = services.events.get_event(meetup.id).await?.seats_available;
        println!("  ✓ Winner cancelled; seats back to {seats}\n");
    }

    // ========== Analytics ==========

    println!("📋 Scenario 5: Admin analytics");
    let summary = services.admin.analytics(&demo.charlie).await?;
    println!(
        "  → Revenue {} from {} bookings, {} users, {} events",
        summary.total_revenue, summary.total_bookings, summary.total_users, summary.total_events
    );
    for category in &summary.events_by_category {
        println!("     {:<14} {}", category.category, category.count);
    }
    println!();

    // ========== Assistant ==========

    println!("📋 Scenario 6: Ask the assistant");
    let assistant = match GeminiClient::from_env() {
        Ok(client) => Assistant::new(
            Arc::new(client),
            Duration::from_secs(config.assistant.timeout),
        ),
        Err(_) => {
            println!("  (no API key set: expect the fallback reply)");
            Assistant::disabled()
        }
    };
    let catalog = services.events.list_events().await?;
    let reply = assistant
        .answer_query("Which technology events are coming up?", &catalog, &[])
        .await;
    println!("  → {reply}\n");

    println!("============================================");
    println!("   Demo complete");
    println!("============================================\n");
    Ok(())
}
