//! Application services.
//!
//! Services hold an [`Environment`] of injected repositories and implement the
//! operations exposed over HTTP. They enforce the role gate themselves, so
//! every entry point (HTTP, seed loader, demo binary) gets the same checks.

pub mod admin;
pub mod analytics;
pub mod booking;
pub mod events;

pub use admin::{AdminService, Denial};
pub use analytics::{AnalyticsSummary, CategoryCount, MonthlyRevenue};
pub use booking::BookingService;
pub use events::EventService;

use crate::auth::{AuthProvider, PasswordHashing, SessionStore};
use crate::config::Config;
use crate::stores::{IdempotencyStore, InMemoryCatalog, InMemoryDirectory, InMemoryRegistry};
use eventease_core::environment::Clock;
use eventease_core::providers::{BookingRegistry, EventCatalog, InventoryLedger, UserDirectory};
use std::sync::Arc;
use std::time::Duration;

/// Repositories and clock shared by every service.
#[derive(Clone)]
pub struct Environment {
    /// Seat counters
    pub ledger: Arc<dyn InventoryLedger>,
    /// Event records
    pub catalog: Arc<dyn EventCatalog>,
    /// Booking records
    pub registry: Arc<dyn BookingRegistry>,
    /// Accounts
    pub directory: Arc<dyn UserDirectory>,
    /// Time source
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment").finish_non_exhaustive()
    }
}

impl Environment {
    /// In-memory repositories. The catalog doubles as the inventory ledger.
    #[must_use]
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        Self {
            ledger: catalog.clone(),
            catalog,
            registry: Arc::new(InMemoryRegistry::new()),
            directory: Arc::new(InMemoryDirectory::new()),
            clock,
        }
    }
}

/// Every service, wired to one environment.
#[derive(Clone, Debug)]
pub struct Services {
    /// Repositories
    pub env: Environment,
    /// Registration, login and password checks
    pub auth: Arc<AuthProvider>,
    /// Bearer-token sessions
    pub sessions: Arc<SessionStore>,
    /// Booking Registry operations
    pub bookings: Arc<BookingService>,
    /// Event management
    pub events: Arc<EventService>,
    /// Organizer review and analytics
    pub admin: Arc<AdminService>,
}

impl Services {
    /// Wire services over `env` using `config`.
    #[must_use]
    pub fn new(env: Environment, config: &Config) -> Self {
        let hashing = PasswordHashing::new(config.auth.hash_memory_kib, config.auth.hash_iterations);
        let auth = Arc::new(AuthProvider::new(env.directory.clone(), hashing));
        let sessions = Arc::new(SessionStore::new(
            Duration::from_secs(config.auth.session_ttl),
            env.clock.clone(),
        ));

        let idempotency = Arc::new(IdempotencyStore::new(
            Duration::from_secs(config.booking.idempotency_ttl),
            env.clock.clone(),
        ));
        let bookings = Arc::new(BookingService::new(
            env.clone(),
            idempotency,
            config.booking.operation_timeout(),
        ));
        let events = Arc::new(EventService::new(env.clone()));
        let admin = Arc::new(AdminService::new(env.clone(), bookings.clone()));

        Self {
            env,
            auth,
            sessions,
            bookings,
            events,
            admin,
        }
    }

    /// In-memory services.
    #[must_use]
    pub fn in_memory(config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self::new(Environment::in_memory(clock), config)
    }
}
