use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    #[diagnostic(code(ics_calendar::http))]
    Http(#[from] reqwest::Error),

    #[error("Environment error: {0}")]
    #[diagnostic(
        code(ics_calendar::environment),
        help("Set the variable in the environment or in a .env file")
    )]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(ics_calendar::config))]
    Config(String),

    #[error("Calendar fetch error: {0}")]
    #[diagnostic(code(ics_calendar::fetch))]
    Fetch(String),

    #[error("Calendar parse error: {0}")]
    #[diagnostic(code(ics_calendar::parse))]
    Parse(String),

    #[error("Invalid parameter: {0}")]
    #[diagnostic(code(ics_calendar::validation))]
    Validation(String),

    #[error("Transport error: {0}")]
    #[diagnostic(code(ics_calendar::transport))]
    Transport(String),

    #[error(transparent)]
    #[diagnostic(code(ics_calendar::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(ics_calendar::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(ics_calendar::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("Invalid URL: {}", err))
    }
}

/// Type alias for Result with our Error type
pub type CalendarResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create fetch errors
pub fn fetch_error(message: &str) -> Error {
    Error::Fetch(message.to_string())
}

/// Helper to create parse errors
pub fn parse_error(message: &str) -> Error {
    Error::Parse(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

impl Error {
    /// Whether the error was caused by the caller's arguments rather than the feed
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
