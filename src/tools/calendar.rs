use crate::components::calendar_query::{CalendarQueries, DEFAULT_UPCOMING_DAYS};
use crate::error::Error;
use std::future::Future;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::model::{
    CallToolResult, Content, ErrorData as McpError, Implementation, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ServerHandler};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

/// Arguments for `get_upcoming_events`
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct UpcomingArgs {
    /// Number of days to look ahead, 1 to 90 (default 7)
    #[schemars(range(min = 1, max = 90), default = "default_days")]
    pub days: Option<i64>,
}

/// Advertised default for `days`; an absent value resolves to the same number
fn default_days() -> Option<i64> {
    Some(i64::from(DEFAULT_UPCOMING_DAYS))
}

/// Arguments for `search_events`
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchArgs {
    /// Text to look for in event names, locations and descriptions
    #[schemars(length(min = 1))]
    pub keyword: String,
}

/// MCP server exposing the calendar queries as tools
#[derive(Clone)]
pub struct CalendarServer {
    queries: CalendarQueries,
    tool_router: ToolRouter<Self>,
}

/// Convert an operation error into an MCP error for the caller
fn to_mcp_error(tool: &str, err: Error) -> McpError {
    if err.is_validation() {
        warn!("Rejected '{}' call: {}", tool, err);
        McpError::invalid_params(err.to_string(), Some(json!({ "tool": tool })))
    } else {
        error!("Tool '{}' failed: {:?}", tool, err);
        McpError::internal_error(err.to_string(), None)
    }
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

#[tool_router]
impl CalendarServer {
    pub fn new(queries: CalendarQueries) -> Self {
        Self {
            queries,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Get all of today's events (classes, exams, meetings)")]
    async fn get_today_events(&self) -> Result<CallToolResult, McpError> {
        info!("Tool call: get_today_events");
        self.queries
            .today()
            .await
            .map(text_result)
            .map_err(|e| to_mcp_error("get_today_events", e))
    }

    #[tool(description = "Get events in the next N days (N between 1 and 90, default 7)")]
    async fn get_upcoming_events(
        &self,
        Parameters(UpcomingArgs { days }): Parameters<UpcomingArgs>,
    ) -> Result<CallToolResult, McpError> {
        info!("Tool call: get_upcoming_events days={:?}", days);
        self.queries
            .upcoming(days)
            .await
            .map(text_result)
            .map_err(|e| to_mcp_error("get_upcoming_events", e))
    }

    #[tool(description = "Search events by keyword in name, location and description")]
    async fn search_events(
        &self,
        Parameters(SearchArgs { keyword }): Parameters<SearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        info!("Tool call: search_events");
        self.queries
            .search(&keyword)
            .await
            .map(text_result)
            .map_err(|e| to_mcp_error("search_events", e))
    }
}

#[tool_handler]
impl ServerHandler for CalendarServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Read-only access to an iCalendar feed. Use get_today_events for today, \
                 get_upcoming_events for the next N days and search_events to find events \
                 by keyword."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
