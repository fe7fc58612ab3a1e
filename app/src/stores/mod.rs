//! In-memory storage backends.
//!
//! Each store guards its state with a `std::sync` lock that is never held
//! across an `.await`; trait methods resolve immediately.

pub mod catalog;
pub mod directory;
pub mod idempotency;
pub mod registry;

pub use catalog::InMemoryCatalog;
pub use directory::InMemoryDirectory;
pub use idempotency::{Claim, IdempotencyStore, PendingKey};
pub use registry::InMemoryRegistry;

use eventease_core::BookingError;
use std::sync::PoisonError;

pub(crate) fn poisoned<T>(_: PoisonError<T>) -> BookingError {
    BookingError::Storage("lock poisoned".to_string())
}
