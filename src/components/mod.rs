// Export components
pub mod calendar_feed;
pub mod calendar_query;

pub use calendar_feed::{EventSource, IcsFeed, RawEvent};
pub use calendar_query::{CalendarEvent, CalendarQueries};
