/// Display-ready view of one event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalendarEvent {
    pub name: String,
    pub start: String,
    pub end: String,
    /// Empty when the event has no location
    pub location: String,
    /// Empty when the event has no description
    pub description: String,
}
