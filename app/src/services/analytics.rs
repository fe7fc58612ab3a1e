//! Admin dashboard figures.

use eventease_core::{Booking, Event, Money, User};
use serde::Serialize;

/// Revenue for one booking month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    /// Short month name (`"Jan"`, `"Feb"`, ...)
    pub month: String,
    /// Sum of booking amounts
    pub revenue: Money,
}

/// Number of events in one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category name
    pub category: String,
    /// Number of events
    pub count: usize,
}

/// Totals and breakdowns shown on the admin dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalyticsSummary {
    /// Sum of all booking amounts
    pub total_revenue: Money,
    /// Registered accounts
    pub total_users: usize,
    /// Live bookings
    pub total_bookings: usize,
    /// Events in the catalog
    pub total_events: usize,
    /// Revenue per booking month, in first-seen order
    pub revenue_by_month: Vec<MonthlyRevenue>,
    /// Events per category, in first-seen order
    pub events_by_category: Vec<CategoryCount>,
}

/// Computes the dashboard figures.
#[must_use]
pub fn summarize(users: &[User], events: &[Event], bookings: &[Booking]) -> AnalyticsSummary {
    let total_revenue = bookings
        .iter()
        .fold(Money::ZERO, |sum, booking| sum.saturating_add(booking.total_amount));

    let mut revenue_by_month: Vec<MonthlyRevenue> = Vec::new();
    for booking in bookings {
        let month = booking.booked_at.format("%b").to_string();
        match revenue_by_month.iter_mut().find(|m| m.month == month) {
            Some(entry) => entry.revenue = entry.revenue.saturating_add(booking.total_amount),
            None => revenue_by_month.push(MonthlyRevenue {
                month,
                revenue: booking.total_amount,
            }),
        }
    }

    let mut events_by_category: Vec<CategoryCount> = Vec::new();
    for event in events {
        match events_by_category.iter_mut().find(|c| c.category == event.category) {
            Some(entry) => entry.count += 1,
            None => events_by_category.push(CategoryCount {
                category: event.category.clone(),
                count: 1,
            }),
        }
    }

    AnalyticsSummary {
        total_revenue,
        total_users: users.len(),
        total_bookings: bookings.len(),
        total_events: events.len(),
        revenue_by_month,
        events_by_category,
    }
}
