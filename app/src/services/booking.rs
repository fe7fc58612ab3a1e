//! Booking Registry operations.
//!
//! Seat accounting rules:
//!
//! ```text
//! create   reserve_seat ─► insert record ─► event still there? ─► attendee still there? ─► Ok
//!              │ false          │ Err              │ no                  │ no
//!              ▼                ▼                  ▼                     ▼
//!          NO_SEATS       release seat       remove record,        remove record,
//!                                            NOT_FOUND             release seat, NOT_FOUND
//!
//! cancel   remove record ─► release_seat (capped, no-op if event gone)
//! ```
//!
//! Removing the record before releasing the seat means two concurrent
//! cancels of the same booking credit at most one seat.
//!
//! Both flows run on their own task. The caller's deadline only bounds the
//! wait: a flow that overruns it still finishes, so a debited seat always has
//! its booking and a removed booking always has its seat credited back.

use super::Environment;
use crate::metrics;
use crate::stores::{Claim, IdempotencyStore};
use eventease_core::providers::SeatRelease;
use eventease_core::{
    Booking, BookingError, BookingId, EventId, IdempotencyKey, Result, User, UserId,
};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;

/// Creates and cancels bookings.
#[derive(Debug)]
pub struct BookingService {
    env: Environment,
    idempotency: Arc<IdempotencyStore>,
    timeout: Duration,
}

impl BookingService {
    /// Create the service; callers wait at most `timeout` for each create/cancel.
    #[must_use]
    pub const fn new(env: Environment, idempotency: Arc<IdempotencyStore>, timeout: Duration) -> Self {
        Self {
            env,
            idempotency,
            timeout,
        }
    }

    /// Books one seat of `event_id` for `user`.
    ///
    /// With an idempotency key, a repeated call returns the booking of the
    /// first successful call instead of taking another seat. An attempt that
    /// times out keeps its key until it finishes in the background.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NoSeats`] if the event is depleted
    /// - [`BookingError::NotFound`] if the event or the attendee does not exist (or vanished mid-booking)
    /// - [`BookingError::DuplicateRequest`] if the key is still in flight
    /// - [`BookingError::Timeout`] if the operation exceeds its deadline
    #[tracing::instrument(skip(self, user, key), fields(user_id = %user.id))]
    pub async fn create_booking(
        &self,
        event_id: EventId,
        user: &User,
        key: Option<&IdempotencyKey>,
    ) -> Result<Booking> {
        let started = Instant::now();

        let pending = match key {
            None => None,
            Some(key) => match self.idempotency.claim(user.id, key) {
                Claim::Fresh(pending) => Some(pending),
                Claim::Replay(booking) => {
                    tracing::info!(booking_id = %booking.id, "Replayed booking for idempotency key");
                    metrics::record_booking("replayed");
                    return Ok(booking);
                }
                Claim::InFlight => {
                    tracing::warn!("Idempotency key already in flight");
                    return Err(BookingError::DuplicateRequest {
                        key: key.to_string(),
                    });
                }
            },
        };

        let env = self.env.clone();
        let attendee = user.clone();
        let outcome = self
            .run_detached("create_booking", async move {
                let outcome = book(&env, event_id, &attendee).await;
                if let Ok(booking) = &outcome {
                    if let Some(pending) = pending {
                        pending.complete(booking);
                    }
                    metrics::record_booking("created");
                    metrics::record_booking_duration(started.elapsed().as_secs_f64());
                    tracing::info!(booking_id = %booking.id, "Booking created");
                }
                outcome
            })
            .await;

        if let Err(error) = &outcome {
            let status = if matches!(error, BookingError::Timeout { .. }) {
                "timed_out"
            } else {
                "rejected"
            };
            metrics::record_booking(status);
            tracing::info!(code = error.code(), %error, "Booking rejected");
        }

        outcome
    }

    /// Cancels a booking and credits its seat back.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`] if the booking does not exist (including a second cancel)
    /// - [`BookingError::Timeout`] if the operation exceeds its deadline
    #[tracing::instrument(skip(self))]
    pub async fn cancel_booking(&self, booking_id: BookingId) -> Result<Booking> {
        let env = self.env.clone();
        self.run_detached("cancel_booking", async move { cancel(&env, booking_id).await })
            .await
    }

    /// Cancels a booking on behalf of `actor`: its attendee or an admin.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`] if the booking does not exist
    /// - [`BookingError::Unauthorized`] if `actor` neither owns the booking nor is an admin
    pub async fn cancel_booking_for(&self, actor: &User, booking_id: BookingId) -> Result<Booking> {
        let booking = self
            .env
            .registry
            .get(booking_id)
            .await?
            .ok_or_else(|| BookingError::booking_not_found(booking_id))?;

        if booking.user_id != actor.id && !actor.is_admin() {
            return Err(BookingError::unauthorized(
                "only the attendee or an admin can cancel this booking",
            ));
        }

        self.cancel_booking(booking_id).await
    }

    /// Bookings made by a user, in booking order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`] on backend failure.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Booking>> {
        self.env.registry.list_by_user(user_id).await
    }

    /// Bookings for an event, in booking order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`] on backend failure.
    pub async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Booking>> {
        self.env.registry.list_by_event(event_id).await
    }

    /// Spawns `work` and waits for it up to the service timeout.
    ///
    /// The task is detached on timeout, never aborted.
    async fn run_detached<T: Send + 'static>(
        &self,
        operation: &'static str,
        work: impl Future<Output = Result<T>> + Send + 'static,
    ) -> Result<T> {
        let task = tokio::spawn(work.in_current_span());
        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(error)) => Err(BookingError::Storage(format!(
                "{operation} task failed: {error}"
            ))),
            Err(_) => {
                tracing::warn!(operation, "Deadline passed, finishing in the background");
                Err(BookingError::Timeout {
                    operation: operation.to_string(),
                    timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                })
            }
        }
    }
}

async fn book(env: &Environment, event_id: EventId, user: &User) -> Result<Booking> {
    let event = env
        .catalog
        .get(event_id)
        .await?
        .ok_or_else(|| BookingError::event_not_found(event_id))?;

    if !env.ledger.reserve_seat(event_id).await? {
        return Err(BookingError::NoSeats { event_id });
    }

    let booking = Booking::snapshot(BookingId::new(), &event, user, env.clock.now());
    if let Err(error) = env.registry.insert(booking.clone()).await {
        tracing::warn!(%error, "Registry rejected booking, releasing reserved seat");
        env.ledger.release_seat(event_id).await?;
        return Err(error);
    }

    // A concurrent delete may have removed the event after our reservation
    if env.catalog.get(event_id).await?.is_none() {
        tracing::warn!(booking_id = %booking.id, "Event deleted mid-booking, rolling back");
        env.registry.remove(booking.id).await?;
        return Err(BookingError::event_not_found(event_id));
    }

    // A concurrent denial may have listed this user's bookings before our insert
    if env.directory.get(user.id).await?.is_none() {
        tracing::warn!(booking_id = %booking.id, "Attendee removed mid-booking, rolling back");
        if env.registry.remove(booking.id).await?.is_some() {
            env.ledger.release_seat(event_id).await?;
        }
        return Err(BookingError::user_not_found(user.id));
    }

    publish_seats(env, event_id).await;
    Ok(booking)
}

async fn cancel(env: &Environment, booking_id: BookingId) -> Result<Booking> {
    let booking = env
        .registry
        .remove(booking_id)
        .await?
        .ok_or_else(|| BookingError::booking_not_found(booking_id))?;

    match env.ledger.release_seat(booking.event_id).await? {
        SeatRelease::Released => publish_seats(env, booking.event_id).await,
        SeatRelease::AtCapacity => {
            tracing::warn!(event_id = %booking.event_id, "Seat release capped at capacity");
        }
        SeatRelease::EventGone => {
            tracing::debug!(event_id = %booking.event_id, "Event gone, nothing to release");
        }
    }

    metrics::record_booking("cancelled");
    tracing::info!(event_id = %booking.event_id, "Booking cancelled");
    Ok(booking)
}

async fn publish_seats(env: &Environment, event_id: EventId) {
    if let Ok(seats) = env.ledger.seats_available(event_id).await {
        metrics::record_seats_available(event_id, seats);
    }
}
