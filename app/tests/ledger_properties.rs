//! Property tests for the Inventory Ledger and the booking round trip.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use eventease::stores::InMemoryCatalog;
use eventease::{Config, Services};
use eventease_core::providers::{EventCatalog, InventoryLedger, SeatRelease};
use eventease_core::{Money, UserId};
use eventease_testing::properties::{LedgerOp, ledger_ops, seat_count, ticket_price};
use eventease_testing::{fixtures, test_clock};
use proptest::prelude::*;
use std::sync::Arc;

proptest! {
    /// Seats equal initial - successful reserves + effective releases, and
    /// stay within 0..=capacity.
    #[test]
    fn prop_seat_count_matches_model(seats in seat_count(), ops in ledger_ops(120)) {
        tokio_test::block_on(async {
            let catalog = InMemoryCatalog::new();
            let event = catalog
                .insert(fixtures::event(UserId::new(), seats))
                .await
                .unwrap();

            let mut expected = seats;
            for op in ops {
                match op {
                    LedgerOp::Reserve => {
                        let reserved = catalog.reserve_seat(event.id).await.unwrap();
                        prop_assert_eq!(reserved, expected > 0);
                        if reserved {
                            expected -= 1;
                        }
                    }
                    LedgerOp::Release => {
                        let released = catalog.release_seat(event.id).await.unwrap();
                        if expected < seats {
                            prop_assert_eq!(released, SeatRelease::Released);
                            expected += 1;
                        } else {
                            prop_assert_eq!(released, SeatRelease::AtCapacity);
                        }
                    }
                }

                let actual = catalog.seats_available(event.id).await.unwrap();
                prop_assert_eq!(actual, expected);
                prop_assert!(actual <= seats);
            }
            Ok(())
        })?;
    }

    /// Booking then cancelling leaves the seat count where it started, and the
    /// booking carries the price it was made at.
    #[test]
    fn prop_book_then_cancel_restores_seats(seats in 1u32..50, price in ticket_price()) {
        tokio_test::block_on(async {
            let mut config = Config::default();
            config.auth.hash_memory_kib = 1_024;
            config.auth.hash_iterations = 1;
            let services = Services::in_memory(&config, Arc::new(test_clock()));

            let mut draft = fixtures::draft("Property Show", seats);
            draft.ticket_price = price;
            let event = services
                .events
                .create_event(&fixtures::approved_organizer(), draft)
                .await
                .unwrap();

            let alice = services.env.directory.insert(fixtures::alice()).await.unwrap();
            let booking = services
                .bookings
                .create_booking(event.id, &alice, None)
                .await
                .unwrap();
            prop_assert_eq!(booking.total_amount, price);
            prop_assert_eq!(
                services.events.get_event(event.id).await.unwrap().seats_available,
                seats - 1
            );

            services.bookings.cancel_booking(booking.id).await.unwrap();
            prop_assert_eq!(
                services.events.get_event(event.id).await.unwrap().seats_available,
                seats
            );
            Ok(())
        })?;
    }

    /// Revenue is the sum of booking amounts.
    #[test]
    fn prop_revenue_sums_bookings(prices in prop::collection::vec(ticket_price(), 0..20)) {
        tokio_test::block_on(async {
            let mut config = Config::default();
            config.auth.hash_memory_kib = 1_024;
            config.auth.hash_iterations = 1;
            let services = Services::in_memory(&config, Arc::new(test_clock()));
            let bob = fixtures::approved_organizer();
            let alice = services.env.directory.insert(fixtures::alice()).await.unwrap();

            let mut expected = Money::ZERO;
            for price in &prices {
                let mut draft = fixtures::draft("Priced Show", 1);
                draft.ticket_price = *price;
                let event = services.events.create_event(&bob, draft).await.unwrap();
                services.bookings.create_booking(event.id, &alice, None).await.unwrap();
                expected = expected.saturating_add(*price);
            }

            let summary = services.admin.analytics(&fixtures::admin()).await.unwrap();
            prop_assert_eq!(summary.total_revenue, expected);
            prop_assert_eq!(summary.total_bookings, prices.len());
            Ok(())
        })?;
    }
}
