//! Pokedex Browser MCP Server
//!
//! A Model Context Protocol server using the official Rust SDK (rmcp)
//! that exposes the list and detail views of the browser as tools.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use pokedex_browser::browser_interface::*;
use pokedex_browser::client::CatalogSource;
use pokedex_browser::logging::init_logging;
use pokedex_browser::{
    BrowserConfig, CatalogFilter, DetailSession, HttpCatalogSource, ListSession, RecordId,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tracing::info;

/// Sessions that persist across MCP tool calls
#[derive(Debug, Default)]
struct BrowserState {
    list: Option<ListSession>,
    detail: Option<DetailSession>,
}

#[derive(Debug, Clone)]
pub struct PokedexBrowserService {
    tool_router: ToolRouter<PokedexBrowserService>,
    source: HttpCatalogSource,
    state: Arc<Mutex<BrowserState>>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListPokemonRequest {
    #[schemars(description = "Exact type label to keep, e.g. 'Feu'. Omit for all types")]
    #[serde(rename = "type", default)]
    pub type_label: Option<String>,
    #[schemars(description = "Case-insensitive text matched against French, English and Japanese names")]
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ShowPokemonRequest {
    #[schemars(description = "Pokedex number of the Pokemon to show")]
    pub id: RecordId,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NavigateRequest {
    #[schemars(description = "'next' or 'previous', relative to the Pokemon currently shown")]
    pub direction: String,
}

fn internal_error(message: String) -> McpError {
    McpError {
        code: ErrorCode(-32603),
        message: Cow::from(message),
        data: None,
    }
}

#[tool_router]
impl PokedexBrowserService {
    pub fn new(source: HttpCatalogSource) -> Self {
        Self {
            tool_router: Self::tool_router(),
            source,
            state: Arc::new(Mutex::new(BrowserState::default())),
        }
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, BrowserState>, McpError> {
        self.state
            .lock()
            .map_err(|e| internal_error(format!("Browser state unavailable: {}", e)))
    }

    /// Fetches the index unless a usable list session already exists.
    ///
    /// A failed session counts as unusable, so calling again re-enters the
    /// list view. While another call's fetch is in flight this returns at
    /// once and the list view reports that it is still loading. The lock is
    /// released while the request is in flight.
    async fn ensure_list(&self) -> Result<(), McpError> {
        let token = {
            let mut state = self.lock_state()?;
            let list = state.list.get_or_insert_with(ListSession::new);
            match list.claim_load() {
                Some(token) => token,
                None => return Ok(()),
            }
        };

        let result = self.source.fetch_all().await;

        let mut state = self.lock_state()?;
        if let Some(list) = state.list.as_mut() {
            list.apply(token, result);
        }
        Ok(())
    }

    /// Loads `id` into the detail session, creating it if needed.
    async fn load_detail(&self, id: RecordId) -> Result<String, McpError> {
        let token = {
            let mut state = self.lock_state()?;
            state
                .detail
                .get_or_insert_with(|| DetailSession::new(id))
                .begin_load(id)
        };

        let result = self.source.fetch_one(id).await;

        let mut state = self.lock_state()?;
        let Some(detail) = state.detail.as_mut() else {
            return Err(internal_error("Detail session was closed".to_string()));
        };
        detail.apply(token, result);
        Ok(detail_display(detail))
    }

    #[tool(description = "List Pokemon, optionally filtered by type and by name")]
    async fn list_pokemon(
        &self,
        Parameters(request): Parameters<ListPokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_list().await?;
        let mut state = self.lock_state()?;
        let text = match state.list.as_mut() {
            Some(list) => {
                list.set_filter(CatalogFilter::new(
                    request.type_label.unwrap_or_default(),
                    request.search.unwrap_or_default(),
                ));
                list_display(list)
            }
            None => "The list view is not open.".to_string(),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "List the distinct Pokemon types, for use with list_pokemon")]
    async fn list_types(&self) -> Result<CallToolResult, McpError> {
        self.ensure_list().await?;
        let state = self.lock_state()?;
        let text = match state.list.as_ref() {
            Some(list) => types_display(list),
            None => "The list view is not open.".to_string(),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Show the full details of one Pokemon")]
    async fn show_pokemon(
        &self,
        Parameters(request): Parameters<ShowPokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = self.load_detail(request.id).await?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Show the next or previous Pokemon relative to the one currently shown")]
    async fn navigate(
        &self,
        Parameters(request): Parameters<NavigateRequest>,
    ) -> Result<CallToolResult, McpError> {
        let direction = match parse_direction(&request.direction) {
            Ok(direction) => direction,
            Err(e) => return Ok(CallToolResult::success(vec![Content::text(e)])),
        };

        let target = {
            let state = self.lock_state()?;
            match state.detail.as_ref() {
                Some(detail) => detail.navigation_target(direction),
                None => {
                    let text = "No Pokemon is currently shown. Use 'show_pokemon' first.";
                    return Ok(CallToolResult::success(vec![Content::text(text)]));
                }
            }
        };

        let text = self.load_detail(target).await?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Explain the colors used for damage multipliers")]
    async fn effectiveness_legend(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(legend_display())]))
    }
}

#[tool_handler]
impl ServerHandler for PokedexBrowserService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    info!("Pokedex Browser MCP Server starting...");

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = BrowserConfig::load(config_path.as_deref(), None)?;
    info!(api = %config.api_base_url, "using remote index");

    let service = PokedexBrowserService::new(HttpCatalogSource::new(config)?);
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;

    info!("Server running, waiting for shutdown...");
    let quit_reason = server.waiting().await?;

    info!(?quit_reason, "Pokedex Browser MCP Server exiting");
    Ok(())
}
