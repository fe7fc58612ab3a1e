//! Business metrics for EventEase.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `eventease_bookings_total{status}` - Booking attempts by outcome
//! - `eventease_events_total{status}` - Event catalog changes
//! - `eventease_organizers_total{decision}` - Organizer review decisions
//! - `eventease_assistant_fallbacks_total{operation}` - Generation failures served a fallback
//!
//! ## Gauges
//! - `eventease_seats_available{event_id}` - Seats left per event
//!
//! ## Histograms
//! - `eventease_booking_duration_seconds` - Time to create a booking

use eventease_core::EventId;
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Register all metric descriptions.
///
/// Call once at startup, before any metrics are recorded.
pub fn register_business_metrics() {
    describe_counter!(
        "eventease_bookings_total",
        "Booking attempts by status (created, rejected, timed_out, replayed, cancelled)"
    );
    describe_gauge!(
        "eventease_seats_available",
        "Seats still bookable per event"
    );
    describe_histogram!(
        "eventease_booking_duration_seconds",
        "Time taken to create a booking"
    );
    describe_counter!(
        "eventease_events_total",
        "Event catalog changes by status (created, updated, deleted)"
    );
    describe_counter!(
        "eventease_organizers_total",
        "Organizer review decisions (approved, denied)"
    );
    describe_counter!(
        "eventease_assistant_fallbacks_total",
        "Generative content calls answered with a fallback"
    );

    tracing::info!("Business metrics registered");
}

/// Install the Prometheus recorder and return its render handle.
///
/// # Errors
///
/// Returns an error if a global recorder is already installed.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_business_metrics();
    Ok(handle)
}

// ============================================================================
// Metric Recording Functions
// ============================================================================

/// Record a booking outcome.
///
/// # Arguments
///
/// * `status` - `created`, `rejected`, `timed_out`, `replayed` or `cancelled`
pub fn record_booking(status: &'static str) {
    metrics::counter!("eventease_bookings_total", "status" => status).increment(1);
}

/// Record how long a successful booking took.
pub fn record_booking_duration(duration_secs: f64) {
    metrics::histogram!("eventease_booking_duration_seconds").record(duration_secs);
}

/// Publish the current seat count of an event.
pub fn record_seats_available(event_id: EventId, seats: u32) {
    metrics::gauge!("eventease_seats_available", "event_id" => event_id.to_string())
        .set(f64::from(seats));
}

/// Zero the seat gauge of a deleted event so scrapes stop reporting stale seats.
pub fn retire_seats_available(event_id: EventId) {
    metrics::gauge!("eventease_seats_available", "event_id" => event_id.to_string()).set(0.0);
}

/// Record an event catalog change (`created`, `updated`, `deleted`).
pub fn record_event_change(status: &'static str) {
    metrics::counter!("eventease_events_total", "status" => status).increment(1);
}

/// Record an organizer review decision (`approved`, `denied`).
pub fn record_organizer_decision(decision: &'static str) {
    metrics::counter!("eventease_organizers_total", "decision" => decision).increment(1);
}
