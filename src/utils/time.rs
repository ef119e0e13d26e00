use chrono::{DateTime, Datelike, Duration, Local, LocalResult, NaiveDateTime, TimeZone, Weekday};
use rust_i18n::t;

/// Milliseconds in one fixed-length day
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// An inclusive `[start, end]` interval in local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl TimeWindow {
    /// Whether `[start, end]` touches or overlaps this window
    pub fn overlaps(&self, start: &DateTime<Local>, end: &DateTime<Local>) -> bool {
        *start <= self.end && *end >= self.start
    }
}

/// Resolve a wall-clock time in the host zone.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times that do not
/// exist (DST spring-forward gap) are shifted forward by an hour, and if that
/// still fails the naive value is read as UTC so this never panics.
pub fn resolve_local(naive: NaiveDateTime) -> DateTime<Local> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => Local
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| Local.from_utc_datetime(&naive)),
    }
}

/// Local midnight of the given instant's day
pub fn start_of_day(dt: &DateTime<Local>) -> DateTime<Local> {
    match dt.date_naive().and_hms_opt(0, 0, 0) {
        Some(naive) => resolve_local(naive),
        None => *dt,
    }
}

/// 23:59:59.999 local time of the given instant's day
pub fn end_of_day(dt: &DateTime<Local>) -> DateTime<Local> {
    match dt.date_naive().and_hms_milli_opt(23, 59, 59, 999) {
        Some(naive) => resolve_local(naive),
        None => *dt,
    }
}

/// Window covering the whole local day of `now`
pub fn today_window(now: &DateTime<Local>) -> TimeWindow {
    TimeWindow {
        start: start_of_day(now),
        end: end_of_day(now),
    }
}

/// Window from local midnight of `now` to the end of the day `days * 24h` later.
///
/// The offset is a fixed number of milliseconds, so across a DST change the
/// end lands an hour away from "N calendar days".
pub fn upcoming_window(now: &DateTime<Local>, days: u32) -> TimeWindow {
    let later = *now + Duration::milliseconds(i64::from(days) * MILLIS_PER_DAY);
    TimeWindow {
        start: start_of_day(now),
        end: end_of_day(&later),
    }
}

/// Localized short weekday name
pub fn weekday_short(weekday: Weekday) -> String {
    let key = match weekday {
        Weekday::Mon => "day_short_monday",
        Weekday::Tue => "day_short_tuesday",
        Weekday::Wed => "day_short_wednesday",
        Weekday::Thu => "day_short_thursday",
        Weekday::Fri => "day_short_friday",
        Weekday::Sat => "day_short_saturday",
        Weekday::Sun => "day_short_sunday",
    };
    t!(key).to_string()
}

/// Render an instant as `YYYY/MM/DD Wkd HH:MM` in the host zone
pub fn format_event_time(dt: &DateTime<Local>) -> String {
    format!(
        "{} {} {}",
        dt.format("%Y/%m/%d"),
        weekday_short(dt.weekday()),
        dt.format("%H:%M")
    )
}

/// Render the calendar date of an instant as `YYYY/M/D`
pub fn format_date(dt: &DateTime<Local>) -> String {
    format!("{}/{}/{}", dt.year(), dt.month(), dt.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).earliest().unwrap()
    }

    #[test]
    fn day_bounds() {
        let now = local(2025, 1, 15, 13, 45);
        let start = start_of_day(&now);
        let end = end_of_day(&now);

        assert_eq!(start.date_naive(), now.date_naive());
        assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));
        assert_eq!(end.date_naive(), now.date_naive());
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
        assert_eq!(end.timestamp_subsec_millis(), 999);
    }

    #[test]
    fn upcoming_window_spans_n_days() {
        let now = local(2025, 1, 15, 13, 45);
        let window = upcoming_window(&now, 7);

        assert_eq!(window.start, start_of_day(&now));
        assert_eq!(
            window.end.date_naive(),
            chrono::NaiveDate::from_ymd_opt(2025, 1, 22).unwrap()
        );
    }

    #[test]
    fn overlap_is_inclusive_on_both_ends() {
        let window = TimeWindow {
            start: local(2025, 1, 15, 0, 0),
            end: local(2025, 1, 15, 12, 0),
        };

        // Ends exactly at window start
        assert!(window.overlaps(&local(2025, 1, 14, 22, 0), &local(2025, 1, 15, 0, 0)));
        // Starts exactly at window end
        assert!(window.overlaps(&local(2025, 1, 15, 12, 0), &local(2025, 1, 15, 13, 0)));
        // Spans the whole window
        assert!(window.overlaps(&local(2025, 1, 14, 0, 0), &local(2025, 1, 16, 0, 0)));
        // Entirely before
        assert!(!window.overlaps(&local(2025, 1, 14, 8, 0), &local(2025, 1, 14, 9, 0)));
        // Entirely after
        assert!(!window.overlaps(&local(2025, 1, 15, 12, 1), &local(2025, 1, 15, 13, 0)));
    }

    #[test]
    fn event_time_layout() {
        // 2025-01-01 was a Wednesday
        let formatted = format_event_time(&local(2025, 1, 1, 9, 5));
        assert_eq!(formatted, "2025/01/01 Wed 09:05");
    }

    #[test]
    fn date_layout() {
        assert_eq!(format_date(&local(2025, 3, 7, 9, 0)), "2025/3/7");
    }
}
