pub mod filter;
pub mod format;
pub mod models;
pub mod normalize;
mod operations;

pub use models::CalendarEvent;
pub use operations::{
    validate_days, validate_keyword, CalendarQueries, DEFAULT_UPCOMING_DAYS, MAX_UPCOMING_DAYS,
    MIN_UPCOMING_DAYS,
};
