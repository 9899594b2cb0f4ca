//! Category routing for free-text product queries.
//!
//! Detection is a deliberate keyword heuristic, not a classifier: two fixed
//! substring lists, game terms checked first, music as the default. Keeping
//! it as data keeps it auditable.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::resolve::{Vertical, VerticalResolver};
use crate::types::Response;

/// Game-indicating terms. Checked before the music list; first hit wins.
const GAME_KEYWORDS: &[&str] = &[
    "game",
    "dlc",
    "expansion",
    "steam",
    "xbox",
    "playstation",
    "ps5",
    "ps4",
    "nintendo",
    "switch",
    "pc game",
    "goty",
    "edition",
    "gameplay",
];

/// Music-indicating terms. The trailing spaces on "ep " and "lp " keep
/// them from matching inside ordinary words.
const MUSIC_KEYWORDS: &[&str] = &[
    "song",
    "album",
    "track",
    "listen",
    "stream",
    "spotify",
    "apple music",
    "vinyl",
    "single",
    "ep ",
    "lp ",
    "feat",
    "ft.",
    "remix",
    "acoustic",
];

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Caller-supplied category hint. `auto` defers to keyword detection.
/// Anything outside this set is rejected at argument parsing, before any
/// network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CategoryHint {
    Music,
    Game,
    #[default]
    Auto,
}

/// Combined outcome of a routed resolution.
#[derive(Debug)]
pub struct FindOutcome {
    pub success: bool,
    /// Vertical the query was routed to.
    pub category: Vertical,
    /// Validated response, when resolution succeeded.
    pub response: Option<Response>,
    /// Report text; a `❌ ...` line when resolution failed.
    pub formatted: String,
    pub error: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Infer the vertical for a free-text query.
///
/// Pure substring containment over the lowercased query; list order is the
/// precedence order. Defaults to music when nothing matches.
pub fn detect_category(query: &str) -> Vertical {
    let q = query.to_lowercase();

    if GAME_KEYWORDS.iter().any(|kw| q.contains(kw)) {
        return Vertical::Game;
    }
    if MUSIC_KEYWORDS.iter().any(|kw| q.contains(kw)) {
        return Vertical::Music;
    }

    Vertical::Music
}

/// Normalize a query into a lookup slug.
///
/// `"Ed Sheeran Galway Girl"` becomes `"ed-sheeran-galway-girl"`: lowercase,
/// everything outside `[a-z0-9]` dropped, whitespace runs collapsed to a
/// single hyphen, no leading, trailing, or doubled hyphens. Idempotent.
pub fn query_to_slug(query: &str) -> String {
    let lowered = query.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());

    for ch in lowered.trim().chars() {
        match ch {
            'a'..='z' | '0'..='9' => slug.push(ch),
            c if c.is_whitespace() || c == '-' => {
                if !slug.is_empty() && !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            _ => {}
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Route a free-text query to the right resolver/formatter pair.
pub async fn find_product(
    music: &VerticalResolver,
    game: &VerticalResolver,
    query: &str,
    hint: CategoryHint,
) -> FindOutcome {
    let category = match hint {
        CategoryHint::Music => Vertical::Music,
        CategoryHint::Game => Vertical::Game,
        CategoryHint::Auto => detect_category(query),
    };
    let slug = query_to_slug(query);
    tracing::debug!(query, %slug, ?category, "routing product query");

    let resolver = match category {
        Vertical::Music => music,
        Vertical::Game => game,
    };

    match resolver.resolve(&slug).await {
        Ok(response) => {
            let formatted = category.format(&response);
            FindOutcome {
                success: true,
                category,
                response: Some(response),
                formatted,
                error: None,
            }
        }
        Err(e) => {
            let message = e.to_string();
            FindOutcome {
                success: false,
                category,
                response: None,
                formatted: format!("❌ {message}"),
                error: Some(message),
            }
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
