use super::models::RawEvent;
use super::time::{parse_ics_duration, parse_ics_time, IcsTime};
use crate::error::{parse_error, CalendarResult};
use chrono::Duration;
use ical::parser::ical::component::IcalEvent;
use ical::property::Property;
use ical::IcalParser;
use tracing::{debug, warn};

/// Parse an iCalendar document into its VEVENT components.
///
/// Timezone, free/busy, todo and journal components are dropped. A VEVENT
/// without a usable DTSTART is skipped rather than failing the document.
pub fn parse_calendar(body: &str) -> CalendarResult<Vec<RawEvent>> {
    let body = body.trim_start_matches('\u{feff}').trim_start();
    if !body.starts_with("BEGIN:VCALENDAR") {
        return Err(parse_error("Document is not an iCalendar feed"));
    }

    let mut events = Vec::new();
    let mut calendars = 0usize;

    for calendar in IcalParser::new(body.as_bytes()) {
        let calendar = calendar
            .map_err(|e| parse_error(&format!("Malformed iCalendar document: {}", e)))?;
        calendars += 1;

        debug!(
            "Calendar has {} events, {} timezones, {} other components",
            calendar.events.len(),
            calendar.timezones.len(),
            calendar.todos.len() + calendar.journals.len() + calendar.free_busys.len()
        );

        for event in &calendar.events {
            match raw_event_from(event) {
                Ok(raw) => events.push(raw),
                Err(e) => warn!("Skipping calendar event: {}", e),
            }
        }
    }

    if calendars == 0 {
        return Err(parse_error("Document contains no VCALENDAR"));
    }

    Ok(events)
}

fn find<'a>(event: &'a IcalEvent, name: &str) -> Option<&'a Property> {
    event
        .properties
        .iter()
        .find(|property| property.name.eq_ignore_ascii_case(name))
}

fn text(event: &IcalEvent, name: &str) -> Option<String> {
    find(event, name)
        .and_then(|property| property.value.as_deref())
        .map(unescape_text)
}

fn time(event: &IcalEvent, name: &str) -> Option<CalendarResult<IcsTime>> {
    let property = find(event, name)?;
    let value = property.value.as_deref()?;
    Some(parse_ics_time(value, property.params.as_deref()))
}

/// Convert one VEVENT into a [`RawEvent`]
fn raw_event_from(event: &IcalEvent) -> CalendarResult<RawEvent> {
    let summary = text(event, "SUMMARY");
    let start = time(event, "DTSTART").ok_or_else(|| {
        parse_error(&format!(
            "event {:?} has no DTSTART",
            summary.as_deref().unwrap_or("(untitled)")
        ))
    })??;

    let end = match time(event, "DTEND") {
        Some(end) => end?.instant,
        None => {
            let duration = find(event, "DURATION")
                .and_then(|property| property.value.as_deref())
                .and_then(parse_ics_duration);
            match duration {
                Some(duration) => start.instant + duration,
                None if start.all_day => start.instant + Duration::days(1),
                None => start.instant,
            }
        }
    };

    Ok(RawEvent {
        summary,
        start: start.instant,
        end,
        location: text(event, "LOCATION"),
        description: text(event, "DESCRIPTION"),
    })
}

/// Undo RFC 5545 TEXT escaping (`\n`, `\N`, `\,`, `\;`, `\\`)
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone, Timelike, Utc};

    const FEED: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//EN\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Asia/Shanghai\r\n\
BEGIN:STANDARD\r\n\
DTSTART:19700101T000000\r\n\
TZOFFSETFROM:+0800\r\n\
TZOFFSETTO:+0800\r\n\
END:STANDARD\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:1@test\r\n\
SUMMARY:Math Exam\r\n\
DTSTART:20250101T090000Z\r\n\
DTEND:20250101T110000Z\r\n\
LOCATION:Room 101\\, Main Hall\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:2@test\r\n\
DTSTART;VALUE=DATE:20250102\r\n\
DESCRIPTION:Line one\\nLine two\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:3@test\r\n\
SUMMARY:Standup\r\n\
DTSTART:20250103T100000Z\r\n\
DURATION:PT15M\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:4@test\r\n\
SUMMARY:No start\r\n\
END:VEVENT\r\n\
BEGIN:VTODO\r\n\
UID:5@test\r\n\
SUMMARY:Not an event\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";

    #[test]
    fn keeps_only_usable_events() {
        let events = parse_calendar(FEED).unwrap();
        let names: Vec<_> = events.iter().map(|e| e.summary.clone()).collect();
        assert_eq!(
            names,
            vec![Some("Math Exam".to_string()), None, Some("Standup".to_string())]
        );
    }

    #[test]
    fn reads_fields_and_unescapes() {
        let events = parse_calendar(FEED).unwrap();
        let exam = &events[0];
        assert_eq!(exam.location.as_deref(), Some("Room 101, Main Hall"));
        assert_eq!(exam.description, None);
        assert_eq!(
            exam.start.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
        );
        assert_eq!(exam.end - exam.start, Duration::hours(2));

        assert_eq!(events[1].description.as_deref(), Some("Line one\nLine two"));
    }

    #[test]
    fn missing_end_is_derived() {
        let events = parse_calendar(FEED).unwrap();

        let all_day = &events[1];
        assert_eq!(all_day.start.hour(), 0);
        assert_eq!(all_day.start, Local.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).earliest().unwrap());
        assert_eq!(all_day.end - all_day.start, Duration::days(1));

        let standup = &events[2];
        assert_eq!(standup.end - standup.start, Duration::minutes(15));
    }

    #[test]
    fn rejects_non_calendar_documents() {
        assert!(parse_calendar("<html><body>Not found</body></html>").is_err());
        assert!(parse_calendar("").is_err());
    }

    #[test]
    fn empty_calendar_has_no_events() {
        let events = parse_calendar("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n").unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn unescape() {
        assert_eq!(unescape_text(r"a\,b\;c\\d\Ne"), "a,b;c\\d\ne");
        assert_eq!(unescape_text(r"trailing\"), "trailing\\");
    }
}
