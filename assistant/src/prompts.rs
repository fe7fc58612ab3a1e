//! Prompt templates

use chrono::NaiveDate;
use eventease_core::Event;
use std::fmt::Write as _;

/// Prompt for a 2-3 sentence event description.
#[must_use]
pub fn event_description(title: &str, category: &str) -> String {
    format!(
        "Generate a compelling and concise event description for an event titled \"{title}\" \
         in the category of \"{category}\". The description should be around 2-3 sentences long, \
         highlighting the key aspects and creating excitement. Do not use markdown."
    )
}

/// Prompt for an event poster.
#[must_use]
pub fn event_poster(prompt: &str) -> String {
    format!(
        "A vibrant and professional event poster for: \"{prompt}\". \
         Minimalist, exciting, high quality, commercial photography."
    )
}

/// One line per event, in the order given.
#[must_use]
pub fn event_listing(catalog: &[Event]) -> String {
    let mut listing = String::new();
    for (i, event) in catalog.iter().enumerate() {
        if i > 0 {
            listing.push('\n');
        }
        let _ = write!(
            listing,
            "- {} on {} at {} for {}. Category: {}. Seats left: {}",
            event.title,
            event.starts_at.format("%-m/%-d/%Y"),
            event.location,
            event.ticket_price,
            event.category,
            event.seats_available,
        );
    }
    listing
}

/// System instruction grounding the chatbot in the current catalog.
#[must_use]
pub fn chatbot_instruction(catalog: &[Event], today: NaiveDate) -> String {
    format!(
        "You are EventEase's friendly chatbot assistant. Your goal is to help users find \
         information about events. Be concise and helpful. Today's date is {}. \
         Here is a list of available events:\n{}\n\n\
         Answer the user's questions based on this list. If you don't know the answer, \
         say that you cannot find that information. Do not make up event details.",
        today.format("%-m/%-d/%Y"),
        event_listing(catalog),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use eventease_core::{EventId, Money, UserId};

    fn event(title: &str, seats: u32) -> Event {
        Event {
            id: EventId::new(),
            title: title.to_string(),
            description: String::new(),
            category: "Technology".to_string(),
            location: "Online".to_string(),
            starts_at: Utc.with_ymd_and_hms(2024, 9, 5, 9, 0, 0).unwrap(),
            ticket_price: Money::from_cents(29_900),
            seats_available: seats,
            capacity: 200,
            image_url: String::new(),
            created_by: UserId::new(),
        }
    }

    #[test]
    fn test_description_prompt_mentions_title_and_category() {
        let prompt = event_description("Startup Pitch Night", "Business");
        assert!(prompt.contains("\"Startup Pitch Night\""));
        assert!(prompt.contains("\"Business\""));
        assert!(prompt.ends_with("Do not use markdown."));
    }

    #[test]
    fn test_event_listing_format() {
        let listing = event_listing(&[event("Tech Conference 2024", 149), event("Meetup", 0)]);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "- Tech Conference 2024 on 9/5/2024 at Online for $299.00. Category: Technology. Seats left: 149"
        );
        assert!(lines[1].ends_with("Seats left: 0"));
    }

    #[test]
    fn test_chatbot_instruction_includes_today_and_catalog() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let instruction = chatbot_instruction(&[event("Tech Conference 2024", 1)], today);
        assert!(instruction.contains("Today's date is 7/1/2024."));
        assert!(instruction.contains("- Tech Conference 2024 on 9/5/2024"));
        assert!(instruction.contains("Do not make up event details."));
    }

    #[test]
    fn test_empty_catalog_still_produces_instruction() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let instruction = chatbot_instruction(&[], today);
        assert!(instruction.contains("available events:\n\n\nAnswer"));
    }
}
