//! # EventEase Core
//!
//! Domain types and contracts for the EventEase booking system.
//!
//! The crate is deliberately free of I/O. It defines:
//!
//! - **Types**: `Event`, `User`, `Booking` and their identifiers
//! - **Errors**: the recoverable [`BookingError`] taxonomy
//! - **Access**: the Role/Status Gate deciding which dashboard a user may reach
//! - **Providers**: repository traits (`InventoryLedger`, `BookingRegistry`,
//!   `EventCatalog`, `UserDirectory`) that storage backends implement
//! - **Environment**: injected dependencies such as the [`Clock`](environment::Clock)
//!
//! ## Consistency rules
//!
//! ```text
//! seats_available >= 0                      (u32, checked decrement)
//! seats_available <= capacity               (release is capped)
//! booking exists  => one seat was debited   (credited back exactly once)
//! ```
//!
//! ## Example
//!
//! ```
//! use eventease_core::access::{route_after_login, Page};
//! use eventease_core::types::{Role, User, UserId};
//!
//! let admin = User::new(UserId::new(), "Charlie", "charlie@example.com", "hash", Role::Admin);
//! assert_eq!(route_after_login(&admin).page, Page::AdminDashboard);
//! ```

pub mod access;
pub mod environment;
pub mod error;
pub mod providers;
pub mod types;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use error::{BookingError, Resource, Result};
pub use futures::future::BoxFuture;
pub use types::{
    Booking, BookingId, Event, EventDraft, EventId, EventUpdate, IdempotencyKey, Money,
    OrganizerStatus, Registration, Role, User, UserId,
};
