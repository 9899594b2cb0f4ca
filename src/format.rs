//! Deterministic text rendering of validated responses.
//!
//! Formatting is pure and total: any valid [`Response`] renders without
//! panicking, and missing optional fields are simply omitted. Offers are
//! emitted in received order — the backend owns ranking.

use crate::resolve::Vertical;
use crate::types::{Offer, OfferKind, Response, ResponseStatus};

impl Vertical {
    /// Render a validated response as the report for this vertical.
    pub fn format(&self, response: &Response) -> String {
        match self {
            Vertical::Music => format_music(response),
            Vertical::Game => format_game(response),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions: Music
//--------------------------------------------------------------------------------------------------

fn format_music(response: &Response) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Prefer the structured artist/title pair over the raw query text.
    match (
        non_empty(&response.query.artist),
        non_empty(&response.query.title),
    ) {
        (Some(artist), Some(title)) => lines.push(format!("🎵 {artist} — {title}")),
        _ => lines.push(format!("🎵 {}", response.query.raw)),
    }

    if let Some(cover) = &response.cover_art {
        lines.push(format!("Cover: {cover}"));
    }
    lines.push(String::new());

    if response.status == ResponseStatus::Error {
        if let Some(error) = &response.error {
            push_error(&mut lines, &error.message, error.retryable);
            return lines.join("\n");
        }
    }

    if response.status == ResponseStatus::NoResults {
        lines.push("No results found for this query.".to_string());
        push_source(&mut lines, response);
        return lines.join("\n");
    }

    for offer in &response.results {
        let price = match (&offer.price, offer.kind) {
            (Some(price), _) => format!("{} {:.2}", price.currency, price.amount),
            (None, OfferKind::Stream) => "Free".to_string(),
            (None, _) => "Price unknown".to_string(),
        };
        let action = match offer.kind {
            OfferKind::Stream => "▶️ Stream",
            _ => "🛒 Buy",
        };

        lines.push(format!(
            "{}. **{}** ({})",
            offer.rank, offer.merchant, offer.trust_tier
        ));
        lines.push(format!("   {action} — {price}"));
        lines.push(format!("   {}", attribution_link(offer)));
        lines.push(String::new());
    }

    push_warnings(&mut lines, response);
    push_source(&mut lines, response);

    lines.join("\n")
}

//--------------------------------------------------------------------------------------------------
// Functions: Game
//--------------------------------------------------------------------------------------------------

fn format_game(response: &Response) -> String {
    let mut lines: Vec<String> = Vec::new();

    let subject = non_empty(&response.query.title).unwrap_or(&response.query.raw);
    lines.push(format!("🎮 {subject}"));
    lines.push(String::new());

    if response.status == ResponseStatus::Error {
        if let Some(error) = &response.error {
            push_error(&mut lines, &error.message, error.retryable);
            return lines.join("\n");
        }
    }

    if response.status == ResponseStatus::NoResults {
        lines.push("No results found for this game.".to_string());
        push_source(&mut lines, response);
        return lines.join("\n");
    }

    for offer in &response.results {
        let price = match &offer.price {
            Some(price) => format!("{} {:.2}", price.currency, price.amount),
            None => "Price unknown".to_string(),
        };
        let edition = offer
            .edition
            .as_ref()
            .map(|e| format!(" ({e})"))
            .unwrap_or_default();

        lines.push(format!(
            "{}. **{}**{} ({})",
            offer.rank, offer.merchant, edition, offer.trust_tier
        ));
        lines.push(format!("   🛒 {price} — {}", offer.availability.label()));
        lines.push(format!("   {}", attribution_link(offer)));
        lines.push(String::new());
    }

    if let Some(dlc_count) = response.dlc_count {
        if dlc_count > 0 {
            lines.push(format!("📦 {dlc_count} DLC/expansions available"));
        }
    }

    push_warnings(&mut lines, response);
    push_source(&mut lines, response);

    lines.join("\n")
}

//--------------------------------------------------------------------------------------------------
// Functions: Helpers
//--------------------------------------------------------------------------------------------------

/// An optional field whose empty string counts as absent.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// The attribution link: `click_url` whenever non-empty, else `url`.
fn attribution_link(offer: &Offer) -> &str {
    if offer.click_url.is_empty() {
        &offer.url
    } else {
        &offer.click_url
    }
}

fn push_error(lines: &mut Vec<String>, message: &str, retryable: bool) {
    lines.push(format!("❌ Error: {message}"));
    if retryable {
        lines.push("(This error is retryable)".to_string());
    }
}

fn push_warnings(lines: &mut Vec<String>, response: &Response) {
    if !response.warnings.is_empty() {
        lines.push(format!("⚠️ Warnings: {}", response.warnings.join(", ")));
    }
}

fn push_source(lines: &mut Vec<String>, response: &Response) {
    if let Some(source_url) = &response.source_url {
        lines.push(format!("Source: {source_url}"));
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
