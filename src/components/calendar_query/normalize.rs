use super::models::CalendarEvent;
use crate::components::calendar_feed::RawEvent;
use crate::utils::time::format_event_time;
use rust_i18n::t;

/// Resolve a raw event into its display form
pub fn to_calendar_event(event: &RawEvent) -> CalendarEvent {
    CalendarEvent {
        name: event
            .summary
            .clone()
            .unwrap_or_else(|| t!("calendar_untitled_event").to_string()),
        start: format_event_time(&event.start),
        end: format_event_time(&event.end),
        location: event.location.clone().unwrap_or_default(),
        description: event.description.clone().unwrap_or_default(),
    }
}
