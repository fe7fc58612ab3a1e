//! Event catalog trait.

use crate::error::Result;
use crate::types::{Event, EventId, EventUpdate};
use futures::future::BoxFuture;

/// Event records.
///
/// Listing order is newest first: a freshly inserted event appears before
/// every existing one.
pub trait EventCatalog: Send + Sync {
    /// Adds an event.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Validation`](crate::BookingError::Validation) if the id is already taken
    /// - [`BookingError::Storage`](crate::BookingError::Storage) on backend failure
    fn insert(&self, event: Event) -> BoxFuture<'_, Result<Event>>;

    /// Looks up an event, with its current seat count.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn get(&self, event_id: EventId) -> BoxFuture<'_, Result<Option<Event>>>;

    /// Applies a partial edit atomically with respect to seat reservations.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`](crate::BookingError::NotFound) if the event does not exist
    /// - [`BookingError::Validation`](crate::BookingError::Validation) for an invalid edit
    /// - [`BookingError::Storage`](crate::BookingError::Storage) on backend failure
    fn update(&self, event_id: EventId, update: EventUpdate) -> BoxFuture<'_, Result<Event>>;

    /// Removes an event, returning its last state.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn remove(&self, event_id: EventId) -> BoxFuture<'_, Result<Option<Event>>>;

    /// All events, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn list(&self) -> BoxFuture<'_, Result<Vec<Event>>>;
}
