//! Inventory Ledger trait.

use crate::error::Result;
use crate::types::EventId;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Outcome of crediting a seat back to an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatRelease {
    /// The counter went up by one
    Released,
    /// The counter already equals capacity; nothing changed
    AtCapacity,
    /// The event no longer exists; nothing changed
    EventGone,
}

/// Per-event seat counters.
///
/// Implementations must make `reserve_seat` a single atomic check-and-decrement
/// relative to every other reservation for the same event.
pub trait InventoryLedger: Send + Sync {
    /// Takes one seat.
    ///
    /// Returns `Ok(false)` when no seat is left.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`](crate::BookingError::NotFound) if the event does not exist
    /// - [`BookingError::Storage`](crate::BookingError::Storage) on backend failure
    fn reserve_seat(&self, event_id: EventId) -> BoxFuture<'_, Result<bool>>;

    /// Gives one seat back, never exceeding the event's capacity.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn release_seat(&self, event_id: EventId) -> BoxFuture<'_, Result<SeatRelease>>;

    /// Current number of bookable seats.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`](crate::BookingError::NotFound) if the event does not exist
    /// - [`BookingError::Storage`](crate::BookingError::Storage) on backend failure
    fn seats_available(&self, event_id: EventId) -> BoxFuture<'_, Result<u32>>;
}
