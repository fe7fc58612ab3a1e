//! Domain types for EventEase.
//!
//! Identifiers, the `Money` value object, and the three entities the booking
//! logic revolves around: [`Event`], [`User`] and [`Booking`].

use crate::error::{BookingError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random `EventId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an `EventId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Unique identifier for a user
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random `UserId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `UserId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Unique identifier for a booking
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Creates a new random `BookingId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `BookingId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

// ============================================================================
// Money Value Object (cents-based to avoid floating point errors)
// ============================================================================

/// Ticket price or revenue, in cents. Non-negative by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two money amounts with overflow checking
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Adds two money amounts, clamping at the maximum representable value
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ============================================================================
// Roles
// ============================================================================

/// Account role
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Browses and books events
    User,
    /// Creates and manages events once approved
    Organizer,
    /// Approves organizers and views analytics
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Organizer => write!(f, "organizer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Approval status of an organizer account.
///
/// `Pending` is the only non-terminal state. There is no way back from
/// `Approved`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizerStatus {
    /// Awaiting admin review
    Pending,
    /// Allowed to manage events
    Approved,
}

// ============================================================================
// Users
// ============================================================================

/// Normalizes an email for storage and lookup (trimmed, lowercased).
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A registered account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Normalized email, unique within the directory
    pub email: String,
    /// Argon2 PHC string
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Account role
    pub role: Role,
    /// Present for organizers only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_status: Option<OrganizerStatus>,
}

impl User {
    /// Creates a user. Organizers start out `Pending`.
    #[must_use]
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: &str,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: normalize_email(email),
            password_hash: password_hash.into(),
            role,
            organizer_status: (role == Role::Organizer).then_some(OrganizerStatus::Pending),
        }
    }

    /// Builder: override the organizer status (ignored for non-organizers)
    #[must_use]
    pub fn with_organizer_status(mut self, status: OrganizerStatus) -> Self {
        if self.role == Role::Organizer {
            self.organizer_status = Some(status);
        }
        self
    }

    /// True for ADMIN accounts
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// True for organizers an admin has approved
    #[must_use]
    pub fn is_approved_organizer(&self) -> bool {
        self.role == Role::Organizer && self.organizer_status == Some(OrganizerStatus::Approved)
    }

    /// True for organizers still awaiting review
    #[must_use]
    pub fn is_pending_organizer(&self) -> bool {
        self.role == Role::Organizer && self.organizer_status != Some(OrganizerStatus::Approved)
    }
}

/// Sign-up profile handed to the authentication provider.
#[derive(Clone, Debug, Deserialize)]
pub struct Registration {
    /// Display name
    pub name: String,
    /// Email (normalized on registration)
    pub email: String,
    /// Plaintext secret, hashed before storage
    pub password: String,
    /// Requested role (USER or ORGANIZER)
    pub role: Role,
}

// ============================================================================
// Events
// ============================================================================

/// A bookable event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier
    pub id: EventId,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Category (free text, e.g. "Music")
    pub category: String,
    /// Venue or "Online"
    pub location: String,
    /// Start timestamp
    pub starts_at: DateTime<Utc>,
    /// Price per ticket
    pub ticket_price: Money,
    /// Seats still bookable
    pub seats_available: u32,
    /// Seat total; `seats_available` never exceeds it
    pub capacity: u32,
    /// Image URL or data URL
    pub image_url: String,
    /// Owning organizer
    pub created_by: UserId,
}

impl Event {
    /// Builds an event from a validated draft. Capacity equals the initial seat count.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Validation`] if the draft is incomplete.
    pub fn from_draft(id: EventId, draft: EventDraft, created_by: UserId) -> Result<Self> {
        draft.validate()?;
        Ok(Self {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description,
            category: draft.category.trim().to_string(),
            location: draft.location.trim().to_string(),
            starts_at: draft.starts_at,
            ticket_price: draft.ticket_price,
            seats_available: draft.seats_available,
            capacity: draft.seats_available,
            image_url: draft.image_url,
            created_by,
        })
    }

    /// Seats currently held by bookings
    #[must_use]
    pub const fn booked_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.seats_available)
    }

    /// No seats left
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.seats_available == 0
    }

    /// Applies an edit in place.
    ///
    /// A new `seats_available` keeps already-booked seats accounted for:
    /// `capacity = new_available + booked`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Validation`] for blank required fields or a
    /// capacity overflow. The event is untouched on error.
    pub fn apply_update(&mut self, update: EventUpdate) -> Result<()> {
        for (field, value) in [
            ("title", &update.title),
            ("category", &update.category),
            ("location", &update.location),
        ] {
            if value.as_ref().is_some_and(|v| v.trim().is_empty()) {
                return Err(BookingError::Validation(format!("{field} must not be empty")));
            }
        }

        let capacity = match update.seats_available {
            Some(available) => available.checked_add(self.booked_seats()).ok_or_else(|| {
                BookingError::Validation("seat capacity overflow".to_string())
            })?,
            None => self.capacity,
        };

        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category.trim().to_string();
        }
        if let Some(location) = update.location {
            self.location = location.trim().to_string();
        }
        if let Some(starts_at) = update.starts_at {
            self.starts_at = starts_at;
        }
        if let Some(price) = update.ticket_price {
            self.ticket_price = price;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
        if let Some(available) = update.seats_available {
            self.seats_available = available;
        }
        self.capacity = capacity;
        Ok(())
    }
}

/// Fields an organizer supplies to create an event.
#[derive(Clone, Debug, Deserialize)]
pub struct EventDraft {
    /// Title
    pub title: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Category
    pub category: String,
    /// Location
    pub location: String,
    /// Start timestamp
    pub starts_at: DateTime<Utc>,
    /// Price per ticket
    pub ticket_price: Money,
    /// Initial seat count
    pub seats_available: u32,
    /// Image URL or data URL
    #[serde(default)]
    pub image_url: String,
}

impl EventDraft {
    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Validation`] naming the first blank field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("title", &self.title),
            ("category", &self.category),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(BookingError::Validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Partial edit of an event. `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EventUpdate {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New location
    pub location: Option<String>,
    /// New start timestamp
    pub starts_at: Option<DateTime<Utc>>,
    /// New ticket price (affects future bookings only)
    pub ticket_price: Option<Money>,
    /// New number of bookable seats
    pub seats_available: Option<u32>,
    /// New image
    pub image_url: Option<String>,
}

// ============================================================================
// Bookings
// ============================================================================

/// A confirmed seat for one attendee.
///
/// Price and attendee fields are snapshots taken at booking time; later edits
/// to the event or the user do not change them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier
    pub id: BookingId,
    /// Booked event
    pub event_id: EventId,
    /// Attendee account
    pub user_id: UserId,
    /// When the seat was reserved
    pub booked_at: DateTime<Utc>,
    /// Ticket price at booking time
    pub total_amount: Money,
    /// Attendee name at booking time
    pub attendee_name: String,
    /// Attendee email at booking time
    pub attendee_email: String,
}

impl Booking {
    /// Creates a booking, snapshotting the event price and the attendee details.
    #[must_use]
    pub fn snapshot(id: BookingId, event: &Event, user: &User, booked_at: DateTime<Utc>) -> Self {
        Self {
            id,
            event_id: event.id,
            user_id: user.id,
            booked_at,
            total_amount: event.ticket_price,
            attendee_name: user.name.clone(),
            attendee_email: user.email.clone(),
        }
    }
}

// ============================================================================
// Idempotency
// ============================================================================

/// Client-chosen key that makes a booking attempt safe to retry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Minimum accepted key length
    pub const MIN_LEN: usize = 16;
    /// Maximum accepted key length
    pub const MAX_LEN: usize = 128;

    /// Validates and wraps a key.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Validation`] unless the key is 16 to 128 characters.
    pub fn parse(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let len = key.chars().count();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(BookingError::Validation(format!(
                "idempotency key must be between {} and {} characters",
                Self::MIN_LEN,
                Self::MAX_LEN
            )));
        }
        Ok(Self(key))
    }

    /// The raw key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
