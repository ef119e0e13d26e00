use ics_calendar_mcp::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting ics-calendar-mcp");

    // Load configuration
    let config = startup::load_config()?;

    // Serve the tools until the client disconnects or a signal arrives
    startup::start_server(config).await
}
