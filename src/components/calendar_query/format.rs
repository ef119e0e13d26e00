use super::models::CalendarEvent;
use rust_i18n::t;

/// Render events as numbered entries separated by blank lines
pub fn format_event_list(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return t!("calendar_no_events").to_string();
    }

    let time_label = t!("calendar_time_label");
    let location_label = t!("calendar_location_label");
    let description_label = t!("calendar_description_label");

    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let mut entry = format!(
                "{}. {}\n   {}: {} ~ {}\n",
                i + 1,
                event.name,
                time_label,
                event.start,
                event.end
            );
            if !event.location.is_empty() {
                entry.push_str(&format!("   {}: {}\n", location_label, event.location));
            }
            if !event.description.is_empty() {
                entry.push_str(&format!("   {}: {}\n", description_label, event.description));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n")
}
