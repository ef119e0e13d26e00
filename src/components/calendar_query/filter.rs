use crate::components::calendar_feed::RawEvent;
use crate::utils::time::TimeWindow;

/// Events whose `[start, end]` overlaps the window, boundaries included
pub fn filter_by_range<'a>(events: &'a [RawEvent], window: &TimeWindow) -> Vec<&'a RawEvent> {
    events
        .iter()
        .filter(|event| window.overlaps(&event.start, &event.end))
        .collect()
}

/// Summary, location and description joined by single spaces, skipping absent ones
fn searchable_text(event: &RawEvent) -> String {
    [&event.summary, &event.location, &event.description]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Events whose searchable text contains `keyword`, ignoring case
pub fn filter_by_keyword<'a>(events: &'a [RawEvent], keyword: &str) -> Vec<&'a RawEvent> {
    let needle = keyword.to_lowercase();
    events
        .iter()
        .filter(|event| searchable_text(event).to_lowercase().contains(&needle))
        .collect()
}

/// Stable ascending sort by start instant
pub fn sort_by_start(events: &mut [&RawEvent]) {
    events.sort_by_key(|event| event.start);
}
