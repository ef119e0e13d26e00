use crate::error::{parse_error, CalendarResult};
use crate::utils::time::resolve_local;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

/// Property parameters as produced by the `ical` parser
pub type PropertyParams = [(String, Vec<String>)];

/// A DTSTART/DTEND value resolved to the host zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcsTime {
    pub instant: DateTime<Local>,
    /// `VALUE=DATE` style value without a time of day
    pub all_day: bool,
}

/// Look up a parameter value, case-insensitively
fn param<'a>(params: Option<&'a PropertyParams>, name: &str) -> Option<&'a str> {
    params?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(|value| value.trim_matches('"'))
}

/// Parse an iCalendar DATE or DATE-TIME value.
///
/// Supports UTC (`19980119T070000Z`), floating (`19980118T230000`),
/// `TZID=`-qualified and `VALUE=DATE` (`19970714`) forms. Unknown TZIDs
/// are treated as floating local time.
pub fn parse_ics_time(value: &str, params: Option<&PropertyParams>) -> CalendarResult<IcsTime> {
    let value = value.trim();
    let is_date = param(params, "VALUE").is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
        || (value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()));

    if is_date {
        let date = NaiveDate::parse_from_str(value, "%Y%m%d")
            .map_err(|e| parse_error(&format!("Failed to parse date '{}': {}", value, e)))?;
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| parse_error("Failed to create datetime"))?;
        return Ok(IcsTime {
            instant: resolve_local(midnight),
            all_day: true,
        });
    }

    if let Some(utc_value) = value.strip_suffix('Z').or_else(|| value.strip_suffix('z')) {
        let naive = parse_naive(utc_value)?;
        return Ok(IcsTime {
            instant: Utc.from_utc_datetime(&naive).with_timezone(&Local),
            all_day: false,
        });
    }

    let naive = parse_naive(value)?;
    let instant = match param(params, "TZID").map(|tzid| (tzid, tzid.parse::<Tz>())) {
        Some((_, Ok(tz))) => match tz.from_local_datetime(&naive).earliest() {
            Some(dt) => dt.with_timezone(&Local),
            None => resolve_local(naive),
        },
        Some((tzid, Err(_))) => {
            debug!("Unknown TZID '{}', treating time as local", tzid);
            resolve_local(naive)
        }
        None => resolve_local(naive),
    };

    Ok(IcsTime {
        instant,
        all_day: false,
    })
}

fn parse_naive(value: &str) -> CalendarResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M"))
        .map_err(|e| parse_error(&format!("Failed to parse datetime '{}': {}", value, e)))
}

/// Parse an RFC 5545 DURATION value such as `PT1H30M`, `P2D` or `-P1W`
pub fn parse_ics_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (negative, rest) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };
    let rest = rest.strip_prefix('P').or_else(|| rest.strip_prefix('p'))?;

    let mut total = Duration::zero();
    let mut number = String::new();
    let mut in_time = false;
    let mut saw_component = false;

    for c in rest.chars() {
        match c.to_ascii_uppercase() {
            '0'..='9' => number.push(c),
            'T' if number.is_empty() => in_time = true,
            unit => {
                let amount: i64 = number.parse().ok()?;
                number.clear();
                let part = match (unit, in_time) {
                    ('W', false) => Duration::try_weeks(amount)?,
                    ('D', false) => Duration::try_days(amount)?,
                    ('H', true) => Duration::try_hours(amount)?,
                    ('M', true) => Duration::try_minutes(amount)?,
                    ('S', true) => Duration::try_seconds(amount)?,
                    _ => return None,
                };
                total = total.checked_add(&part)?;
                saw_component = true;
            }
        }
    }

    if !number.is_empty() || !saw_component {
        return None;
    }

    Some(if negative { -total } else { total })
}
