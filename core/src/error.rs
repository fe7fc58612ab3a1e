//! Error taxonomy for booking, catalog and account operations.
//!
//! Every variant is recoverable: callers receive it as a value and decide how to
//! present it. Nothing in the core aborts on these conditions.

use crate::types::EventId;
use std::fmt;
use thiserror::Error;

/// Result alias used throughout the core and its storage backends.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Kind of entity referenced by a [`BookingError::NotFound`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// An event in the catalog
    Event,
    /// A booking in the registry
    Booking,
    /// A user in the directory
    User,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event => write!(f, "Event"),
            Self::Booking => write!(f, "Booking"),
            Self::User => write!(f, "User"),
        }
    }
}

/// Errors surfaced by booking, catalog and account operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Booking attempted against a depleted event
    #[error("No seats available for event {event_id}")]
    NoSeats {
        /// The depleted event
        event_id: EventId,
    },

    /// Operation referenced a missing booking, event or user
    #[error("{resource} {id} not found")]
    NotFound {
        /// Kind of entity
        resource: Resource,
        /// Identifier as supplied by the caller
        id: String,
    },

    /// Registration conflict
    #[error("Email {email} is already registered")]
    EmailTaken {
        /// The conflicting (normalized) email
        email: String,
    },

    /// Login mismatch
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Role/status gate rejection
    #[error("Unauthorized: {reason}")]
    Unauthorized {
        /// Why the gate rejected the caller
        reason: String,
    },

    /// Input rejected before any state changed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Same idempotency key is still being processed
    #[error("Request with idempotency key {key} is already in progress")]
    DuplicateRequest {
        /// The in-flight key
        key: String,
    },

    /// Operation exceeded its deadline
    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        /// Operation name
        operation: String,
        /// Configured deadline
        timeout_ms: u64,
    },

    /// Backend failure (lock poisoning, I/O)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BookingError {
    /// `NotFound` for an event.
    #[must_use]
    pub fn event_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound {
            resource: Resource::Event,
            id: id.to_string(),
        }
    }

    /// `NotFound` for a booking.
    #[must_use]
    pub fn booking_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound {
            resource: Resource::Booking,
            id: id.to_string(),
        }
    }

    /// `NotFound` for a user.
    #[must_use]
    pub fn user_not_found(id: impl fmt::Display) -> Self {
        Self::NotFound {
            resource: Resource::User,
            id: id.to_string(),
        }
    }

    /// `Unauthorized` with a reason.
    #[must_use]
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoSeats { .. } => "NO_SEATS",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::EmailTaken { .. } => "EMAIL_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::Validation(_) => "VALIDATION",
            Self::DuplicateRequest { .. } => "DUPLICATE_REQUEST",
            Self::Timeout { .. } => "TIMEOUT",
            Self::Storage(_) => "STORAGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        let event_id = EventId::new();
        assert_eq!(BookingError::NoSeats { event_id }.code(), "NO_SEATS");
        assert_eq!(BookingError::event_not_found(event_id).code(), "NOT_FOUND");
        assert_eq!(BookingError::InvalidCredentials.code(), "INVALID_CREDENTIALS");
        assert_eq!(BookingError::unauthorized("nope").code(), "UNAUTHORIZED");
    }

    #[test]
    fn test_not_found_message_names_resource() {
        let err = BookingError::booking_not_found("abc");
        assert_eq!(err.to_string(), "Booking abc not found");
    }
}
