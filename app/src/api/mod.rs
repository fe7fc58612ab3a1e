//! JSON API handlers, grouped by area:
//! - auth: registration, login, sessions, role-gate navigation
//! - events: catalog browsing and organizer management
//! - bookings: seat booking and cancellation
//! - admin: organizer review and analytics
//! - assistant: generated descriptions, posters and chat

pub mod admin;
pub mod assistant;
pub mod auth;
pub mod bookings;
pub mod error;
pub mod events;
pub mod idempotency;

pub use error::AppError;
pub use idempotency::{IDEMPOTENCY_KEY_HEADER, IdempotencyHeader};
