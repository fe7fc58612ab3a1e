//! Repository traits implemented by storage backends.
//!
//! The traits return [`BoxFuture`] instead of using `async fn` so they stay
//! dyn-compatible and can be injected as `Arc<dyn Trait>`. Every operation may
//! suspend on I/O in a real backend; the in-memory backend resolves immediately.
//!
//! | Trait | Owns |
//! |---|---|
//! | [`InventoryLedger`] | per-event seat counters |
//! | [`EventCatalog`] | event records |
//! | [`BookingRegistry`] | booking records, insertion-ordered |
//! | [`UserDirectory`] | accounts, unique by email |

pub mod catalog;
pub mod directory;
pub mod ledger;
pub mod registry;

pub use catalog::EventCatalog;
pub use directory::UserDirectory;
pub use ledger::{InventoryLedger, SeatRelease};
pub use registry::BookingRegistry;

#[doc(no_inline)]
pub use futures::future::BoxFuture;
