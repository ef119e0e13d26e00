mod feed;
pub mod models;
pub mod parser;
pub mod time;

pub use feed::IcsFeed;
pub use models::RawEvent;

use crate::error::CalendarResult;
use async_trait::async_trait;

/// Anything that can produce the full list of calendar events on demand
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch every VEVENT currently in the calendar, in document order
    async fn fetch_events(&self) -> CalendarResult<Vec<RawEvent>>;
}
