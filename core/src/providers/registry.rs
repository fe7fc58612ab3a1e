//! Booking Registry trait.

use crate::error::Result;
use crate::types::{Booking, BookingId, EventId, UserId};
use futures::future::BoxFuture;

/// Booking records keyed by id, kept in insertion order.
///
/// The registry knows nothing about seats. Callers pair every insert with a
/// successful reservation and every removal with a release (or with the event
/// itself being deleted).
pub trait BookingRegistry: Send + Sync {
    /// Appends a booking.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Validation`](crate::BookingError::Validation) if the id is already present
    /// - [`BookingError::Storage`](crate::BookingError::Storage) on backend failure
    fn insert(&self, booking: Booking) -> BoxFuture<'_, Result<Booking>>;

    /// Looks up a booking.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn get(&self, booking_id: BookingId) -> BoxFuture<'_, Result<Option<Booking>>>;

    /// Removes a booking. At most one concurrent caller receives `Some`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn remove(&self, booking_id: BookingId) -> BoxFuture<'_, Result<Option<Booking>>>;

    /// Bookings made by a user, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn list_by_user(&self, user_id: UserId) -> BoxFuture<'_, Result<Vec<Booking>>>;

    /// Bookings for an event, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn list_by_event(&self, event_id: EventId) -> BoxFuture<'_, Result<Vec<Booking>>>;

    /// Removes every booking for an event, returning them in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn remove_by_event(&self, event_id: EventId) -> BoxFuture<'_, Result<Vec<Booking>>>;

    /// Every booking, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn list(&self) -> BoxFuture<'_, Result<Vec<Booking>>>;
}
