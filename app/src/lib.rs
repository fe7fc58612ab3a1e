//! EventEase: event discovery and seat booking.
//!
//! Attendees browse and book events, approved organizers publish them, and
//! admins review organizer sign-ups and watch revenue. Three pieces carry the
//! correctness guarantees:
//!
//! - **Inventory Ledger**: per-event seat counter, reserved with a single CAS
//!   so two attendees can never take the last seat
//! - **Booking Registry**: booking records with snapshotted price and attendee,
//!   kept consistent with the ledger on create, cancel and event deletion
//! - **Role/Status Gate**: who may manage events, see the admin dashboard, or
//!   open which page
//!
//! # Architecture
//!
//! ```text
//!   HTTP (axum)           api/*  ── SessionUser / IdempotencyHeader extractors
//!        │
//!        ▼
//!   Services              BookingService  EventService  AdminService  AuthProvider
//!        │                      (role gate checks live here)
//!        ▼
//!   Environment           Arc<dyn InventoryLedger>  Arc<dyn EventCatalog>
//!                         Arc<dyn BookingRegistry>  Arc<dyn UserDirectory>  Arc<dyn Clock>
//!        │
//!        ▼
//!   stores/*              in-memory implementations
//! ```
//!
//! Generated descriptions, posters and chat answers come from
//! [`eventease_assistant`], which degrades to fixed fallbacks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod config;
pub mod metrics;
pub mod seed;
pub mod server;
pub mod services;
pub mod stores;

pub use config::Config;
pub use services::{Environment, Services};
