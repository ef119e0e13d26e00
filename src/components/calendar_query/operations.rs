use super::filter::{filter_by_keyword, filter_by_range, sort_by_start};
use super::format::format_event_list;
use super::normalize::to_calendar_event;
use crate::components::calendar_feed::{EventSource, RawEvent};
use crate::error::{validation_error, CalendarResult};
use crate::utils::time::{format_date, today_window, upcoming_window};
use chrono::{DateTime, Local};
use rust_i18n::t;
use std::sync::Arc;
use tracing::{debug, info};

/// Days looked ahead when the caller does not say
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;
/// Smallest accepted `days` value
pub const MIN_UPCOMING_DAYS: i64 = 1;
/// Largest accepted `days` value
pub const MAX_UPCOMING_DAYS: i64 = 90;

/// Check the `days` argument, applying the default when absent
pub fn validate_days(days: Option<i64>) -> CalendarResult<u32> {
    match days {
        None => Ok(DEFAULT_UPCOMING_DAYS),
        Some(days) if (MIN_UPCOMING_DAYS..=MAX_UPCOMING_DAYS).contains(&days) => Ok(days as u32),
        Some(days) => Err(validation_error(&format!(
            "days must be between {} and {}, got {}",
            MIN_UPCOMING_DAYS, MAX_UPCOMING_DAYS, days
        ))),
    }
}

/// Check the search keyword
pub fn validate_keyword(keyword: &str) -> CalendarResult<&str> {
    if keyword.is_empty() {
        return Err(validation_error("keyword must not be empty"));
    }
    Ok(keyword)
}

/// Sort, normalize and render a filtered selection
fn render(mut selected: Vec<&RawEvent>) -> String {
    sort_by_start(&mut selected);
    let events: Vec<_> = selected.into_iter().map(to_calendar_event).collect();
    format_event_list(&events)
}

/// The three calendar queries, each fetching the feed afresh
#[derive(Clone)]
pub struct CalendarQueries {
    source: Arc<dyn EventSource>,
}

impl std::fmt::Debug for CalendarQueries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarQueries").finish_non_exhaustive()
    }
}

impl CalendarQueries {
    /// Create queries backed by the given event source
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self { source }
    }

    /// Events overlapping today
    pub async fn today(&self) -> CalendarResult<String> {
        self.today_at(Local::now()).await
    }

    /// Events overlapping the local day of `now`
    pub async fn today_at(&self, now: DateTime<Local>) -> CalendarResult<String> {
        let events = self.source.fetch_events().await?;
        let window = today_window(&now);

        let selected = filter_by_range(&events, &window);
        info!("today: {} of {} events match", selected.len(), events.len());

        Ok(format!(
            "{}\n\n{}",
            t!("calendar_today_title", date = format_date(&now)),
            render(selected)
        ))
    }

    /// Events between today and the end of the day `days` from now
    pub async fn upcoming(&self, days: Option<i64>) -> CalendarResult<String> {
        self.upcoming_at(days, Local::now()).await
    }

    /// Like [`CalendarQueries::upcoming`], relative to `now`
    pub async fn upcoming_at(&self, days: Option<i64>, now: DateTime<Local>) -> CalendarResult<String> {
        let days = validate_days(days)?;
        let events = self.source.fetch_events().await?;
        let window = upcoming_window(&now, days);
        debug!("upcoming window: {} .. {}", window.start, window.end);

        let selected = filter_by_range(&events, &window);
        info!(
            "upcoming {} days: {} of {} events match",
            days,
            selected.len(),
            events.len()
        );

        Ok(format!(
            "{}\n\n{}",
            t!("calendar_upcoming_title", days = days),
            render(selected)
        ))
    }

    /// Events whose summary, location or description contain `keyword`
    pub async fn search(&self, keyword: &str) -> CalendarResult<String> {
        let keyword = validate_keyword(keyword)?;
        let events = self.source.fetch_events().await?;

        let selected = filter_by_keyword(&events, keyword);
        info!(
            "search: {} of {} events match the keyword",
            selected.len(),
            events.len()
        );

        Ok(format!(
            "{}\n\n{}",
            t!("calendar_search_title", keyword = keyword),
            render(selected)
        ))
    }
}
