use chrono::{TimeZone, Utc};
use ics_calendar_mcp::components::calendar_feed::{EventSource, IcsFeed};
use ics_calendar_mcp::components::calendar_query::CalendarQueries;
use ics_calendar_mcp::error::Error;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use url::Url;

const FEED: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:late@test\r\n\
SUMMARY:Physics Lab\r\n\
DTSTART:20250102T130000Z\r\n\
DTEND:20250102T150000Z\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:early@test\r\n\
SUMMARY:Math Exam\r\n\
DTSTART:20250101T090000Z\r\n\
DTEND:20250101T110000Z\r\n\
LOCATION:Room 101\r\n\
DESCRIPTION:Chapters 1-4\r\n\
END:VEVENT\r\n\
BEGIN:VFREEBUSY\r\n\
UID:fb@test\r\n\
DTSTART:20250101T000000Z\r\n\
DTEND:20250102T000000Z\r\n\
END:VFREEBUSY\r\n\
END:VCALENDAR\r\n";

/// Serve `responses` in order on a local port, one per request
fn serve(responses: Vec<(u16, &'static str)>) -> Url {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();

    thread::spawn(move || {
        for (status, body) in responses {
            let request = match server.recv() {
                Ok(request) => request,
                Err(_) => return,
            };
            let response = tiny_http::Response::from_string(body).with_status_code(status);
            let _ = request.respond(response);
        }
    });

    Url::parse(&format!("http://{}/calendar.ics", addr)).unwrap()
}

fn feed(url: Url) -> IcsFeed {
    IcsFeed::new(url, Duration::from_secs(5)).unwrap()
}

/// Fetch and parse a feed over HTTP, keeping only VEVENTs in document order
#[tokio::test]
async fn test_fetches_and_parses_events() {
    let url = serve(vec![(200, FEED)]);
    let events = feed(url).fetch_events().await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].summary.as_deref(), Some("Physics Lab"));
    assert_eq!(events[1].summary.as_deref(), Some("Math Exam"));
    assert_eq!(events[1].location.as_deref(), Some("Room 101"));
    assert_eq!(
        events[1].start.with_timezone(&Utc),
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
    );
}

/// End to end search over a served feed
#[tokio::test]
async fn test_search_over_http_feed() {
    let url = serve(vec![(200, FEED)]);
    let queries = CalendarQueries::new(Arc::new(feed(url)));

    let text = queries.search("chapters").await.unwrap();
    assert!(text.contains("1. Math Exam\n"));
    assert!(text.contains("   Location: Room 101\n"));
    assert!(text.contains("   Description: Chapters 1-4\n"));
    assert!(!text.contains("Physics Lab"));
}

/// Non-success status codes are fetch errors
#[tokio::test]
async fn test_http_error_status() {
    let url = serve(vec![(404, "not found")]);
    let err = feed(url).fetch_events().await.unwrap_err();

    assert!(matches!(err, Error::Fetch(_)));
    assert!(err.to_string().contains("404"));
}

/// A body that is not iCalendar is a parse error
#[tokio::test]
async fn test_malformed_document() {
    let url = serve(vec![(200, "<html><body>Sign in</body></html>")]);
    let err = feed(url).fetch_events().await.unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
}

/// An unreachable host is a fetch error, not a hang
#[tokio::test]
async fn test_unreachable_host() {
    // Bind then drop a listener so the port is very likely closed
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = Url::parse(&format!("http://127.0.0.1:{}/calendar.ics", port)).unwrap();

    let err = feed(url).fetch_events().await.unwrap_err();
    assert!(matches!(err, Error::Fetch(_)));
}
