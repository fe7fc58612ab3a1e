//! User directory trait.

use crate::error::Result;
use crate::types::{OrganizerStatus, User, UserId};
use futures::future::BoxFuture;

/// Registered accounts, unique by normalized email.
pub trait UserDirectory: Send + Sync {
    /// Adds a user.
    ///
    /// # Errors
    ///
    /// - [`BookingError::EmailTaken`](crate::BookingError::EmailTaken) if the email is registered
    /// - [`BookingError::Storage`](crate::BookingError::Storage) on backend failure
    fn insert(&self, user: User) -> BoxFuture<'_, Result<User>>;

    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn get(&self, user_id: UserId) -> BoxFuture<'_, Result<Option<User>>>;

    /// Looks up a user by email (normalized before comparison).
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn find_by_email<'a>(&'a self, email: &'a str) -> BoxFuture<'a, Result<Option<User>>>;

    /// Sets the organizer status.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`](crate::BookingError::NotFound) if the user does not exist
    /// - [`BookingError::Storage`](crate::BookingError::Storage) on backend failure
    fn set_organizer_status(
        &self,
        user_id: UserId,
        status: OrganizerStatus,
    ) -> BoxFuture<'_, Result<User>>;

    /// Removes a user, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn remove(&self, user_id: UserId) -> BoxFuture<'_, Result<Option<User>>>;

    /// Every user, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`](crate::BookingError::Storage) on backend failure.
    fn list(&self) -> BoxFuture<'_, Result<Vec<User>>>;
}
