mod calendar;

pub use calendar::{CalendarServer, SearchArgs, UpcomingArgs};
