//! Per-vertical resolution against the Vine backends.
//!
//! One resolver per vertical, each bound to a fixed backend base URL. A
//! resolve call is a single bounded HTTP GET; there are no retries and no
//! state survives the call. All ranking and pricing happens server-side —
//! this layer only fetches and validates.

use std::time::Duration;

use serde_json::Value;

use crate::types::Response;
use crate::validate::{validate, ValidationError};

/// Hard timeout for the single outbound request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Identifying client header sent on every request.
pub const USER_AGENT: &str = "rootvine-mcp/1.0.0";

const BEATSVINE_BASE: &str = "https://www.beatsvine.com";
const MAINMENU_BASE: &str = "https://www.mainmenu.gg";

//--------------------------------------------------------------------------------------------------
// Types: Vertical
//--------------------------------------------------------------------------------------------------

/// A content vertical with its own backend and rendering rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Music,
    Game,
}

impl Vertical {
    /// Display name of the backend serving this vertical.
    pub fn source(&self) -> &'static str {
        match self {
            Vertical::Music => "BeatsVine",
            Vertical::Game => "MainMenu",
        }
    }

    /// Request path for a slug, relative to the backend base.
    fn path(&self, slug: &str) -> String {
        let encoded = urlencoding::encode(slug);
        match self {
            Vertical::Music => format!("/{encoded}/json"),
            Vertical::Game => format!("/api/v1/games/{encoded}/json"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Types: Error
//--------------------------------------------------------------------------------------------------

/// Why a resolve call failed. Display strings are agent-visible verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Network failure, timeout, or unreadable/unparseable body.
    #[error("Failed to reach {backend}: {cause}")]
    Unreachable {
        backend: &'static str,
        cause: String,
    },

    /// Non-2xx status other than 404. The body is not parsed.
    #[error("{backend} returned HTTP {status}")]
    Status { backend: &'static str, status: u16 },

    /// Body parsed as JSON but violates the v1 contract.
    #[error("Response validation failed: {0}")]
    Validation(#[from] ValidationError),
}

//--------------------------------------------------------------------------------------------------
// Types: Resolver
//--------------------------------------------------------------------------------------------------

/// Fetches and validates responses for one vertical.
#[derive(Debug, Clone)]
pub struct VerticalResolver {
    client: reqwest::Client,
    vertical: Vertical,
    base: String,
}

impl VerticalResolver {
    /// Music resolver bound to the BeatsVine backend.
    pub fn music(client: reqwest::Client) -> Self {
        Self::with_base(client, Vertical::Music, BEATSVINE_BASE)
    }

    /// Game resolver bound to the MainMenu backend.
    pub fn game(client: reqwest::Client) -> Self {
        Self::with_base(client, Vertical::Game, MAINMENU_BASE)
    }

    /// Resolver against an arbitrary base URL (tests point this at a mock
    /// backend).
    pub fn with_base(client: reqwest::Client, vertical: Vertical, base: impl Into<String>) -> Self {
        Self {
            client,
            vertical,
            base: base.into(),
        }
    }

    pub fn vertical(&self) -> Vertical {
        self.vertical
    }

    /// Resolve a normalized slug against this vertical's backend.
    ///
    /// HTTP 404 is not fatal: the backend encodes "not found" inside the
    /// body via `status = "no_results"`, so a 404 body is parsed and
    /// validated like a 2xx one.
    pub async fn resolve(&self, slug: &str) -> Result<Response, ResolveError> {
        let backend = self.vertical.source();
        let url = format!("{}{}", self.base, self.vertical.path(slug));
        tracing::debug!(%url, backend, "resolving slug");

        // Identifying header goes on every request, independent of how the
        // caller built the client.
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ResolveError::Unreachable {
                backend,
                cause: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() && status.as_u16() != 404 {
            return Err(ResolveError::Status {
                backend,
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ResolveError::Unreachable {
                backend,
                cause: e.to_string(),
            })?;

        let validated = validate(body).inspect_err(|e| {
            tracing::warn!(backend, error = %e, "backend response failed validation");
        })?;

        Ok(validated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_path_shape() {
        assert_eq!(
            Vertical::Music.path("ed-sheeran-galway-girl"),
            "/ed-sheeran-galway-girl/json"
        );
    }

    #[test]
    fn test_game_path_shape() {
        assert_eq!(
            Vertical::Game.path("elden-ring"),
            "/api/v1/games/elden-ring/json"
        );
    }

    #[test]
    fn test_path_percent_encodes_slug() {
        // Slugs are normally pre-normalized, but raw tool input is only
        // URL-encoded, never rejected.
        assert_eq!(Vertical::Music.path("a b"), "/a%20b/json");
    }

    #[test]
    fn test_source_names() {
        assert_eq!(Vertical::Music.source(), "BeatsVine");
        assert_eq!(Vertical::Game.source(), "MainMenu");
    }

    #[test]
    fn test_error_display_carries_backend_name() {
        let unreachable = ResolveError::Unreachable {
            backend: Vertical::Music.source(),
            cause: "connection refused".to_string(),
        };
        assert_eq!(
            unreachable.to_string(),
            "Failed to reach BeatsVine: connection refused"
        );

        let status = ResolveError::Status {
            backend: Vertical::Game.source(),
            status: 503,
        };
        assert_eq!(status.to_string(), "MainMenu returned HTTP 503");
    }
}
