//! Organizer review and analytics.

use super::analytics::{AnalyticsSummary, summarize};
use super::{BookingService, Environment};
use crate::metrics;
use eventease_core::access::{approve_transition, ensure_deniable, require_admin};
use eventease_core::{BookingError, OrganizerStatus, Result, User, UserId};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of denying an organizer request.
#[derive(Clone, Debug, Serialize)]
pub struct Denial {
    /// The removed account
    pub user: User,
    /// Bookings of that account cancelled with their seats credited back
    pub cancelled_bookings: usize,
}

/// Admin-only operations.
#[derive(Debug)]
pub struct AdminService {
    env: Environment,
    bookings: Arc<BookingService>,
}

impl AdminService {
    /// Create the service
    #[must_use]
    pub const fn new(env: Environment, bookings: Arc<BookingService>) -> Self {
        Self { env, bookings }
    }

    /// Organizers awaiting review, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Unauthorized`] unless `admin` is an admin.
    pub async fn pending_organizers(&self, admin: &User) -> Result<Vec<User>> {
        require_admin(admin)?;
        let users = self.env.directory.list().await?;
        Ok(users.into_iter().filter(User::is_pending_organizer).collect())
    }

    /// Approves an organizer. Approving an approved organizer changes nothing.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Unauthorized`] unless `admin` is an admin
    /// - [`BookingError::NotFound`] if the user does not exist
    /// - [`BookingError::Validation`] if the user is not an organizer
    #[tracing::instrument(skip(self, admin), fields(admin_id = %admin.id))]
    pub async fn approve_organizer(&self, admin: &User, user_id: UserId) -> Result<User> {
        require_admin(admin)?;
        let user = self.user(user_id).await?;
        let status = approve_transition(&user)?;
        if user.organizer_status == Some(OrganizerStatus::Approved) {
            return Ok(user);
        }

        let user = self.env.directory.set_organizer_status(user_id, status).await?;
        metrics::record_organizer_decision("approved");
        tracing::info!("Organizer approved");
        Ok(user)
    }

    /// Denies a pending organizer: the account is removed and its bookings
    /// are cancelled with their seats credited back.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Unauthorized`] unless `admin` is an admin
    /// - [`BookingError::NotFound`] if the user does not exist
    /// - [`BookingError::Validation`] unless the user is a pending organizer
    #[tracing::instrument(skip(self, admin), fields(admin_id = %admin.id))]
    pub async fn deny_organizer(&self, admin: &User, user_id: UserId) -> Result<Denial> {
        require_admin(admin)?;
        let user = self.user(user_id).await?;
        ensure_deniable(&user)?;

        let user = self
            .env
            .directory
            .remove(user_id)
            .await?
            .ok_or_else(|| BookingError::user_not_found(user_id))?;

        let mut cancelled_bookings = 0;
        for booking in self.env.registry.list_by_user(user_id).await? {
            match self.bookings.cancel_booking(booking.id).await {
                Ok(_) => cancelled_bookings += 1,
                // Cancelled concurrently
                Err(BookingError::NotFound { .. }) => {}
                Err(error) => return Err(error),
            }
        }

        metrics::record_organizer_decision("denied");
        tracing::info!(cancelled_bookings, "Organizer denied and removed");
        Ok(Denial {
            user,
            cancelled_bookings,
        })
    }

    /// Dashboard figures over the whole system.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Unauthorized`] unless `admin` is an admin.
    pub async fn analytics(&self, admin: &User) -> Result<AnalyticsSummary> {
        require_admin(admin)?;
        let users = self.env.directory.list().await?;
        let events = self.env.catalog.list().await?;
        let bookings = self.env.registry.list().await?;
        Ok(summarize(&users, &events, &bookings))
    }

    async fn user(&self, user_id: UserId) -> Result<User> {
        self.env
            .directory
            .get(user_id)
            .await?
            .ok_or_else(|| BookingError::user_not_found(user_id))
    }
}
