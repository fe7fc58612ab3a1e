//! Role/Status Gate.
//!
//! Pure decisions about where a user may go and what they may do. Navigation
//! decisions never fail: a request for a page the user may not see resolves to
//! the User Dashboard instead. Operation guards (`require_*`) return
//! [`BookingError::Unauthorized`] so the caller can report the rejection.
//!
//! ```text
//! role       organizer status   dashboard
//! ─────────  ────────────────   ─────────────────────────────
//! ADMIN      -                  Admin Dashboard
//! ORGANIZER  approved           Organizer Dashboard
//! ORGANIZER  pending            User Dashboard (+ pending notice)
//! USER       -                  User Dashboard
//! ```

use crate::error::{BookingError, Result};
use crate::types::{OrganizerStatus, Role, User};
use serde::{Deserialize, Serialize};

/// Top-level pages of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Public event listing
    Home,
    /// Bookings of the current user
    UserDashboard,
    /// Events of an approved organizer
    OrganizerDashboard,
    /// Analytics and organizer approvals
    AdminDashboard,
}

/// Where a user lands, and whether the pending-approval notice is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTarget {
    /// Page to show
    pub page: Page,
    /// Show the "organizer account under review" notice
    pub pending_approval: bool,
}

/// Dashboard a user is sent to after logging in.
#[must_use]
pub fn route_after_login(user: &User) -> DashboardTarget {
    match (user.role, user.organizer_status) {
        (Role::Admin, _) => DashboardTarget {
            page: Page::AdminDashboard,
            pending_approval: false,
        },
        (Role::Organizer, Some(OrganizerStatus::Approved)) => DashboardTarget {
            page: Page::OrganizerDashboard,
            pending_approval: false,
        },
        (Role::Organizer, _) => DashboardTarget {
            page: Page::UserDashboard,
            pending_approval: true,
        },
        (Role::User, _) => DashboardTarget {
            page: Page::UserDashboard,
            pending_approval: false,
        },
    }
}

/// Only approved organizers may create, edit or delete events.
#[must_use]
pub fn can_manage_events(user: &User) -> bool {
    user.is_approved_organizer()
}

/// Only admins may reach the admin dashboard.
#[must_use]
pub fn can_access_admin(user: &User) -> bool {
    user.is_admin()
}

/// Resolves a navigation request.
///
/// Anonymous visitors only see Home. Authenticated users asking for a page
/// outside their permissions get the User Dashboard.
#[must_use]
pub fn resolve_page(user: Option<&User>, requested: Page) -> Page {
    let Some(user) = user else {
        return Page::Home;
    };

    match requested {
        Page::Home | Page::UserDashboard => requested,
        Page::OrganizerDashboard if can_manage_events(user) => requested,
        Page::AdminDashboard if can_access_admin(user) => requested,
        Page::OrganizerDashboard | Page::AdminDashboard => Page::UserDashboard,
    }
}

/// Guard for event management operations.
///
/// # Errors
///
/// Returns [`BookingError::Unauthorized`] unless the user is an approved organizer.
pub fn require_event_manager(user: &User) -> Result<()> {
    if can_manage_events(user) {
        Ok(())
    } else if user.is_pending_organizer() {
        Err(BookingError::unauthorized("organizer account is pending approval"))
    } else {
        Err(BookingError::unauthorized("only approved organizers can manage events"))
    }
}

/// Guard for admin operations.
///
/// # Errors
///
/// Returns [`BookingError::Unauthorized`] unless the user is an admin.
pub fn require_admin(user: &User) -> Result<()> {
    if can_access_admin(user) {
        Ok(())
    } else {
        Err(BookingError::unauthorized("admin access required"))
    }
}

/// Organizer approval transition: `Pending → Approved`, `Approved` stays put.
///
/// # Errors
///
/// Returns [`BookingError::Validation`] if the user is not an organizer.
pub fn approve_transition(user: &User) -> Result<OrganizerStatus> {
    if user.role == Role::Organizer {
        Ok(OrganizerStatus::Approved)
    } else {
        Err(BookingError::Validation(format!(
            "user {} is not an organizer",
            user.id
        )))
    }
}

/// Denial is only possible while the request is still pending.
///
/// # Errors
///
/// Returns [`BookingError::Validation`] for non-organizers and approved organizers.
pub fn ensure_deniable(user: &User) -> Result<()> {
    if user.is_pending_organizer() {
        Ok(())
    } else {
        Err(BookingError::Validation(format!(
            "user {} has no pending organizer request",
            user.id
        )))
    }
}
