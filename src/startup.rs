use crate::components::calendar_feed::IcsFeed;
use crate::components::calendar_query::CalendarQueries;
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use crate::tools::CalendarServer;
use crate::utils::i18n;
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration.
///
/// Logs go to stderr; stdout carries the protocol.
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,rmcp=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config and apply the configured locale
pub fn load_config() -> miette::Result<Arc<Config>> {
    match Config::load() {
        Ok(config) => {
            let locale = i18n::set_locale(&config.locale);
            info!("Setting locale to {}", locale);
            Ok(Arc::new(config))
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Build the tool server for a config
pub fn build_server(config: &Config) -> Result<CalendarServer, Error> {
    let feed = IcsFeed::from_config(config)?;
    info!(
        "Calendar feed host: {}, fetch timeout: {}s",
        feed.url().host_str().unwrap_or("<no host>"),
        config.fetch_timeout_secs
    );

    Ok(CalendarServer::new(CalendarQueries::new(Arc::new(feed))))
}

/// Serve the calendar tools over stdio
pub async fn start_server(config: Arc<Config>) -> miette::Result<()> {
    let server = build_server(&config)?;

    let service = server.serve(stdio()).await.map_err(|e| {
        error!("Failed to start MCP transport: {}", e);
        Error::Transport(e.to_string())
    })?;
    info!("MCP server ready on stdio");

    // Wait for either the client to disconnect or a shutdown signal
    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(reason) => {
                    info!("MCP session ended: {:?}", reason);
                    Ok(())
                }
                Err(e) => {
                    error!("MCP service task error: {:?}", e);
                    Err(Error::Transport(format!("Service task error: {}", e)).into())
                }
            }
        }
        signal = shutdown::wait_for_signal() => {
            if let Err(e) = signal {
                error!("Failed to install signal handlers: {:?}", e);
                return Err(Error::Io(e).into());
            }
            info!("Received shutdown signal, stopping server...");
            Ok(())
        }
    }
}
