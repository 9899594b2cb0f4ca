//! RootVine MCP server.
//!
//! Exposes three tools over the MCP protocol:
//!
//!   resolve_music  — Find where to listen to, buy, or stream music
//!   resolve_game   — Find where to buy a game at the best price
//!   find_product   — Smart router: auto-detects category and resolves
//!
//! This is a thin client: it calls the Vine `/json` endpoints directly and
//! never ships ranking logic. All ranking and pricing happens server-side
//! at the backend; responses are schema-validated here and rendered as text
//! reports for the calling agent.

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod format;
pub mod resolve;
pub mod route;
pub mod types;
pub mod validate;

pub use resolve::{ResolveError, USER_AGENT, Vertical, VerticalResolver};
pub use route::{CategoryHint, FindOutcome, find_product};
pub use types::Response;
pub use validate::{ValidationError, validate};

//--------------------------------------------------------------------------------------------------
// Types: Tool inputs
//--------------------------------------------------------------------------------------------------

#[derive(Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResolveMusicInput {
    /// The BeatsVine page slug for the track or album. Format:
    /// artist-name-song-title (lowercase, hyphenated). Example:
    /// 'ed-sheeran-galway-girl'.
    pub slug: String,
}

#[derive(Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResolveGameInput {
    /// The game slug. Format: game-title (lowercase, hyphenated).
    /// Example: 'elden-ring'.
    pub slug: String,
}

#[derive(Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindProductInput {
    /// A natural language product query. Examples: 'Aphex Twin
    /// Windowlicker', 'Elden Ring DLC', 'where can I stream Bad Guy by
    /// Billie Eilish'.
    pub query: String,

    /// Product category. Use 'auto' (default) to detect the category
    /// automatically.
    #[serde(default)]
    pub category: Option<CategoryHint>,
}

//--------------------------------------------------------------------------------------------------
// Types: Server
//--------------------------------------------------------------------------------------------------

#[derive(Clone)]
pub struct Server {
    tool_router: ToolRouter<Self>,
    music: VerticalResolver,
    game: VerticalResolver,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Server {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self::with_resolvers(
            VerticalResolver::music(client.clone()),
            VerticalResolver::game(client),
        )
    }

    /// Server over explicit resolvers (tests point these at mock backends).
    pub fn with_resolvers(music: VerticalResolver, game: VerticalResolver) -> Self {
        Self {
            tool_router: Self::tool_router(),
            music,
            game,
        }
    }

    /// Public wrapper for resolve_music (for testing).
    pub async fn music_report(&self, slug: &str) -> String {
        match self.music.resolve(slug).await {
            Ok(response) => Vertical::Music.format(&response),
            Err(e) => format!("Could not resolve music: {e}"),
        }
    }

    /// Public wrapper for resolve_game (for testing).
    pub async fn game_report(&self, slug: &str) -> String {
        match self.game.resolve(slug).await {
            Ok(response) => Vertical::Game.format(&response),
            Err(e) => format!("Could not resolve game: {e}"),
        }
    }

    /// Public wrapper for find_product (for testing).
    pub async fn product_report(&self, query: &str, hint: CategoryHint) -> FindOutcome {
        find_product(&self.music, &self.game, query, hint).await
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations: Tool Router
//--------------------------------------------------------------------------------------------------

#[tool_router]
impl Server {
    /// Resolves a music slug via BeatsVine and renders the ranked offers.
    #[tool(
        name = "resolve_music",
        description = "Find where to listen to, buy, or stream a song or album. Returns ranked results from trusted music platforms (Spotify, Apple Music, Amazon, etc.) with prices and direct purchase/streaming links. Use this when a user asks about music, songs, albums, or artists."
    )]
    async fn resolve_music(
        &self,
        params: Parameters<ResolveMusicInput>,
    ) -> Result<CallToolResult, McpError> {
        let text = self.music_report(&params.0.slug).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Resolves a game slug via MainMenu and renders the ranked offers.
    #[tool(
        name = "resolve_game",
        description = "Find where to buy a video game at the best price. Returns ranked results from trusted game stores (Steam, PlayStation, Xbox, Nintendo, Epic, etc.) with prices, editions, and DLC info. Use this when a user asks about video games."
    )]
    async fn resolve_game(
        &self,
        params: Parameters<ResolveGameInput>,
    ) -> Result<CallToolResult, McpError> {
        let text = self.game_report(&params.0.slug).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Routes a free-text query to the right vertical and resolves it.
    #[tool(
        name = "find_product",
        description = "Find the best place to buy or access any digital product (music, games, etc). Automatically detects the product category and routes to the right resolver. Use this when you're not sure whether the user is asking about music or games, or when the query is ambiguous."
    )]
    async fn find_product(
        &self,
        params: Parameters<FindProductInput>,
    ) -> Result<CallToolResult, McpError> {
        let input = params.0;
        let hint = input.category.unwrap_or_default();
        let outcome = self.product_report(&input.query, hint).await;
        Ok(CallToolResult::success(vec![Content::text(
            outcome.formatted,
        )]))
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations: Server Handler
//--------------------------------------------------------------------------------------------------

#[tool_handler]
impl ServerHandler for Server {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: None,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
