use chrono::{DateTime, Local};

/// A VEVENT as read from the feed, before any display formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub summary: Option<String>,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub location: Option<String>,
    pub description: Option<String>,
}
