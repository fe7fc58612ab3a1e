//! Event management: catalog edits by organizers and public browsing.

use super::Environment;
use crate::metrics;
use eventease_core::access::require_event_manager;
use eventease_core::{
    Booking, BookingError, Event, EventDraft, EventId, EventUpdate, Result, User,
};

/// Category value that matches every event.
pub const ALL_CATEGORIES: &str = "All";

/// Catalog operations.
#[derive(Debug)]
pub struct EventService {
    env: Environment,
}

impl EventService {
    /// Create the service
    #[must_use]
    pub const fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Publishes a new event owned by `organizer`. It lists before existing events.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Unauthorized`] unless `organizer` is an approved organizer
    /// - [`BookingError::Validation`] for blank title, category or location
    #[tracing::instrument(skip(self, organizer, draft), fields(organizer_id = %organizer.id, title = %draft.title))]
    pub async fn create_event(&self, organizer: &User, draft: EventDraft) -> Result<Event> {
        require_event_manager(organizer)?;

        let event = Event::from_draft(EventId::new(), draft, organizer.id)?;
        let event = self.env.catalog.insert(event).await?;

        metrics::record_event_change("created");
        metrics::record_seats_available(event.id, event.seats_available);
        tracing::info!(event_id = %event.id, seats = event.seats_available, "Event created");
        Ok(event)
    }

    /// Edits an event owned by `organizer`.
    ///
    /// A new `seats_available` keeps existing bookings counted against capacity.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`] if the event does not exist
    /// - [`BookingError::Unauthorized`] unless `organizer` is the approved owner
    /// - [`BookingError::Validation`] for an invalid edit
    #[tracing::instrument(skip(self, organizer, update), fields(organizer_id = %organizer.id))]
    pub async fn update_event(
        &self,
        organizer: &User,
        event_id: EventId,
        update: EventUpdate,
    ) -> Result<Event> {
        require_event_manager(organizer)?;
        let event = self.get_event(event_id).await?;
        if event.created_by != organizer.id {
            return Err(BookingError::unauthorized(
                "only the organizer who created this event can edit it",
            ));
        }

        let event = self.env.catalog.update(event_id, update).await?;
        metrics::record_event_change("updated");
        metrics::record_seats_available(event.id, event.seats_available);
        tracing::info!(seats = event.seats_available, capacity = event.capacity, "Event updated");
        Ok(event)
    }

    /// Deletes an event and every booking for it. Seats are not credited back.
    ///
    /// Returns the number of bookings removed.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`] if the event does not exist
    /// - [`BookingError::Unauthorized`] unless `actor` is the approved owner or an admin
    #[tracing::instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete_event(&self, actor: &User, event_id: EventId) -> Result<usize> {
        let event = self.get_event(event_id).await?;
        if !actor.is_admin() {
            require_event_manager(actor)?;
            if event.created_by != actor.id {
                return Err(BookingError::unauthorized(
                    "only the organizer who created this event can delete it",
                ));
            }
        }

        // Event first: a booking racing this delete sees the event gone and rolls back
        self.env
            .catalog
            .remove(event_id)
            .await?
            .ok_or_else(|| BookingError::event_not_found(event_id))?;
        let removed = self.env.registry.remove_by_event(event_id).await?;

        metrics::record_event_change("deleted");
        metrics::retire_seats_available(event_id);
        tracing::info!(bookings_removed = removed.len(), "Event deleted");
        Ok(removed.len())
    }

    /// Looks up one event.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::NotFound`] if the event does not exist.
    pub async fn get_event(&self, event_id: EventId) -> Result<Event> {
        self.env
            .catalog
            .get(event_id)
            .await?
            .ok_or_else(|| BookingError::event_not_found(event_id))
    }

    /// Every event, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`] on backend failure.
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.env.catalog.list().await
    }

    /// Events whose title or description contains `query` (case-insensitive),
    /// in `category` (absent or `"All"` matches every category).
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`] on backend failure.
    pub async fn search_events(
        &self,
        query: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Event>> {
        let events = self.env.catalog.list().await?;
        Ok(filter_events(events, query, category))
    }

    /// `"All"` followed by each distinct category in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Storage`] on backend failure.
    pub async fn categories(&self) -> Result<Vec<String>> {
        let events = self.env.catalog.list().await?;
        Ok(categories_of(&events))
    }

    /// Bookings for an event, visible to its organizer and to admins.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`] if the event does not exist
    /// - [`BookingError::Unauthorized`] for anyone else
    pub async fn attendees(&self, actor: &User, event_id: EventId) -> Result<Vec<Booking>> {
        let event = self.get_event(event_id).await?;
        let owns = actor.is_approved_organizer() && event.created_by == actor.id;
        if !owns && !actor.is_admin() {
            return Err(BookingError::unauthorized(
                "only the event's organizer or an admin can view attendees",
            ));
        }
        self.env.registry.list_by_event(event_id).await
    }

    /// Events created by `organizer`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Unauthorized`] unless `organizer` is approved.
    pub async fn organizer_events(&self, organizer: &User) -> Result<Vec<Event>> {
        require_event_manager(organizer)?;
        let events = self.env.catalog.list().await?;
        Ok(events
            .into_iter()
            .filter(|event| event.created_by == organizer.id)
            .collect())
    }
}

/// Applies the search filters to `events`, keeping their order.
#[must_use]
pub fn filter_events(events: Vec<Event>, query: Option<&str>, category: Option<&str>) -> Vec<Event> {
    let needle = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);
    let category = category.filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);

    events
        .into_iter()
        .filter(|event| category.is_none_or(|c| event.category == c))
        .filter(|event| {
            needle.as_deref().is_none_or(|needle| {
                event.title.to_lowercase().contains(needle)
                    || event.description.to_lowercase().contains(needle)
            })
        })
        .collect()
}

/// `"All"` followed by each distinct category in first-seen order.
#[must_use]
pub fn categories_of(events: &[Event]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for event in events {
        if !categories[1..].contains(&event.category) {
            categories.push(event.category.clone());
        }
    }
    categories
}
