//! RootVine v1 response contract.
//!
//! These types mirror the exact shape of every RootVine v1 JSON response as
//! produced by the Vine backends. The v1 contract never removes a required
//! field or changes a field type; additive fields may appear at any time, so
//! unknown keys are tolerated on deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The single supported schema version. Any other value in
/// `rootvine.version` is a validation failure, never a soft warning.
pub const ROOTVINE_VERSION: &str = "1.0";

/// Required prefix of every `response_id`.
pub const RESPONSE_ID_PREFIX: &str = "rv_resp_";

//--------------------------------------------------------------------------------------------------
// Enums
//--------------------------------------------------------------------------------------------------

/// Merchant trust tier, assigned server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustTier {
    Authoritative,
    Verified,
    Listed,
}

impl fmt::Display for TrustTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrustTier::Authoritative => "authoritative",
            TrustTier::Verified => "verified",
            TrustTier::Listed => "listed",
        })
    }
}

/// What kind of offer a result is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferKind {
    Purchase,
    Stream,
    Subscription,
}

/// Stock status as reported by the merchant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    Preorder,
    Available,
    Unknown,
}

impl Availability {
    /// Human-readable label (`in_stock` renders as `in stock`).
    pub fn label(&self) -> &'static str {
        match self {
            Availability::InStock => "in stock",
            Availability::Preorder => "preorder",
            Availability::Available => "available",
            Availability::Unknown => "unknown",
        }
    }
}

/// Overall outcome reported inside the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    Partial,
    NoResults,
    Error,
}

/// Envelope category. Note the plural `games` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Music,
    Games,
}

/// Query type as echoed back by the backend (singular `game`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Music,
    Game,
}

//--------------------------------------------------------------------------------------------------
// Response body
//--------------------------------------------------------------------------------------------------

/// A price in a single currency. `currency` is a 3-letter ISO code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    pub currency: String,
}

/// Why the backend ranked a result where it did. `code` is a backend-owned
/// vocabulary (e.g. `LOWEST_PRICE_T1`, `ONLY_RESULT`) and is deliberately
/// not a closed enum on this side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReason {
    pub code: String,
    pub summary: String,
    pub details: Map<String, Value>,
}

/// One ranked offer. Ranks are dense from 1 and the backend owns the order;
/// this crate never re-sorts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub rank: u32,
    pub merchant: String,
    pub merchant_id: String,
    pub trust_tier: TrustTier,
    pub price: Option<Price>,
    pub url: String,
    /// Attribution link. Preferred over `url` whenever non-empty.
    pub click_url: String,
    #[serde(rename = "type")]
    pub kind: OfferKind,
    pub availability: Availability,
    pub ranking_reason: RankingReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_freshness: Option<String>,
    /// Games only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
}

/// Backend-reported failure. Present exactly when `status` is `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendError {
    /// Backend-defined code (e.g. `SOURCE_TIMEOUT`, `NOT_FOUND`).
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

/// The query as understood by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryEcho {
    #[serde(rename = "type")]
    pub kind: QueryKind,
    pub raw: String,
    pub normalized: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Versioning and provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub version: String,
    pub resolved_at: String,
    pub ttl_seconds: i64,
    pub resolver: String,
    pub category: Category,
    pub schema_url: String,
}

/// Agent-facing hints carried in every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpHint {
    pub package: String,
    pub tool_hint: String,
}

/// A complete RootVine v1 response. Constructed entirely by the backend,
/// read-only once validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub rootvine: Envelope,
    pub response_id: String,
    pub status: ResponseStatus,
    pub query: QueryEcho,
    pub results: Vec<Offer>,
    pub warnings: Vec<String>,
    pub partial_sources: Vec<String>,
    pub error: Option<BackendError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Games only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dlc_count: Option<u32>,
    pub mcp: McpHint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trust_tier_wire_names() {
        let tier: TrustTier = serde_json::from_str("\"authoritative\"").unwrap();
        assert_eq!(tier, TrustTier::Authoritative);
        assert_eq!(tier.to_string(), "authoritative");
    }

    #[test]
    fn test_availability_labels() {
        assert_eq!(Availability::InStock.label(), "in stock");
        assert_eq!(Availability::Preorder.label(), "preorder");
        assert_eq!(Availability::Available.label(), "available");
        assert_eq!(Availability::Unknown.label(), "unknown");
    }

    #[test]
    fn test_status_wire_names() {
        let status: ResponseStatus = serde_json::from_str("\"no_results\"").unwrap();
        assert_eq!(status, ResponseStatus::NoResults);
    }

    #[test]
    fn test_category_is_plural_games() {
        let cat: Category = serde_json::from_str("\"games\"").unwrap();
        assert_eq!(cat, Category::Games);
        assert!(serde_json::from_str::<Category>("\"game\"").is_err());
    }
}
