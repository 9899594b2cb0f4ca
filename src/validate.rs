//! Schema validation of untyped backend JSON.
//!
//! Every body coming back from a Vine endpoint passes through [`validate`]
//! before anything else sees it. A misbehaving backend is caught here rather
//! than leaking a half-formed response to the agent.

use serde_json::Value;
use url::Url;

use crate::types::{Response, RESPONSE_ID_PREFIX, ROOTVINE_VERSION};

//--------------------------------------------------------------------------------------------------
// Types: Error
//--------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Missing required field, wrong type, or out-of-enum value. The message
    /// carries serde's field path.
    #[error("{0}")]
    Shape(String),

    #[error("rootvine.version is {found:?}, expected \"1.0\"")]
    Version { found: String },

    #[error("response_id {0:?} does not start with \"rv_resp_\"")]
    ResponseIdPrefix(String),

    #[error("rootvine.ttl_seconds is {0}, must be >= 0")]
    NegativeTtl(i64),

    #[error("results[{index}].rank is {rank}, must be >= 1")]
    RankOutOfRange { index: usize, rank: u32 },

    #[error("results[{index}].{field} is not an absolute URL: {detail}")]
    BadUrl {
        index: usize,
        field: &'static str,
        detail: String,
    },

    #[error("results[{index}].price.currency {currency:?} is not a 3-letter code")]
    BadCurrency { index: usize, currency: String },
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate arbitrary parsed JSON against the v1 contract.
///
/// Returns the fully typed [`Response`] or the first violation found. Pure:
/// no side effects, no partial results.
pub fn validate(data: Value) -> Result<Response, ValidationError> {
    let response: Response =
        serde_json::from_value(data).map_err(|e| ValidationError::Shape(e.to_string()))?;
    check_invariants(&response)?;
    Ok(response)
}

/// Bounds and formats that serde's type layer cannot express.
fn check_invariants(response: &Response) -> Result<(), ValidationError> {
    if response.rootvine.version != ROOTVINE_VERSION {
        return Err(ValidationError::Version {
            found: response.rootvine.version.clone(),
        });
    }

    if !response.response_id.starts_with(RESPONSE_ID_PREFIX) {
        return Err(ValidationError::ResponseIdPrefix(
            response.response_id.clone(),
        ));
    }

    if response.rootvine.ttl_seconds < 0 {
        return Err(ValidationError::NegativeTtl(response.rootvine.ttl_seconds));
    }

    for (index, offer) in response.results.iter().enumerate() {
        if offer.rank < 1 {
            return Err(ValidationError::RankOutOfRange {
                index,
                rank: offer.rank,
            });
        }

        check_url(index, "url", &offer.url)?;
        check_url(index, "click_url", &offer.click_url)?;

        if let Some(price) = &offer.price {
            if price.currency.chars().count() != 3 {
                return Err(ValidationError::BadCurrency {
                    index,
                    currency: price.currency.clone(),
                });
            }
        }
    }

    Ok(())
}

fn check_url(index: usize, field: &'static str, raw: &str) -> Result<(), ValidationError> {
    Url::parse(raw).map_err(|e| ValidationError::BadUrl {
        index,
        field,
        detail: e.to_string(),
    })?;
    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{ResponseStatus, TrustTier};

    fn valid_body() -> Value {
        json!({
            "rootvine": {
                "version": "1.0",
                "resolved_at": "2025-11-02T10:15:00Z",
                "ttl_seconds": 900,
                "resolver": "beatsvine",
                "category": "music",
                "schema_url": "https://www.rootvine.org/schema/v1"
            },
            "response_id": "rv_resp_01HTESTTESTTEST",
            "status": "success",
            "query": {
                "type": "music",
                "raw": "Ed Sheeran Galway Girl",
                "normalized": "ed-sheeran-galway-girl",
                "artist": "Ed Sheeran",
                "title": "Galway Girl"
            },
            "results": [
                {
                    "rank": 1,
                    "merchant": "Spotify",
                    "merchant_id": "spotify",
                    "trust_tier": "authoritative",
                    "price": null,
                    "url": "https://open.spotify.com/track/abc",
                    "click_url": "https://www.beatsvine.com/r/abc",
                    "type": "stream",
                    "availability": "available",
                    "ranking_reason": {
                        "code": "FREE_STREAM_T1",
                        "summary": "Free tier-1 stream",
                        "details": {}
                    }
                },
                {
                    "rank": 2,
                    "merchant": "Amazon Music",
                    "merchant_id": "amazon",
                    "trust_tier": "verified",
                    "price": { "amount": 1.29, "currency": "USD" },
                    "url": "https://music.amazon.com/x",
                    "click_url": "https://www.beatsvine.com/r/x",
                    "type": "purchase",
                    "availability": "in_stock",
                    "ranking_reason": {
                        "code": "LOWEST_PRICE_T2",
                        "summary": "Cheapest verified purchase",
                        "details": { "compared": 4 }
                    }
                }
            ],
            "warnings": [],
            "partial_sources": [],
            "error": null,
            "source_url": "https://www.beatsvine.com/ed-sheeran-galway-girl",
            "mcp": {
                "package": "rootvine-mcp",
                "tool_hint": "resolve_music"
            }
        })
    }

    #[test]
    fn test_valid_body_passes() {
        let response = validate(valid_body()).unwrap();
        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].trust_tier, TrustTier::Authoritative);
        assert_eq!(response.query.artist.as_deref(), Some("Ed Sheeran"));
    }

    #[test]
    fn test_missing_version_field_fails() {
        let mut body = valid_body();
        body["rootvine"]
            .as_object_mut()
            .unwrap()
            .remove("version");
        let err = validate(body).unwrap_err();
        assert!(matches!(err, ValidationError::Shape(_)));
        assert!(err.to_string().contains("version"), "got: {err}");
    }

    #[test]
    fn test_wrong_version_literal_fails() {
        let mut body = valid_body();
        body["rootvine"]["version"] = json!("2.0");
        let err = validate(body).unwrap_err();
        assert!(matches!(err, ValidationError::Version { .. }));
        assert!(err.to_string().contains("2.0"));
    }

    #[test]
    fn test_bad_response_id_prefix_fails() {
        let mut body = valid_body();
        body["response_id"] = json!("resp_123");
        let err = validate(body).unwrap_err();
        assert!(matches!(err, ValidationError::ResponseIdPrefix(_)));
    }

    #[test]
    fn test_out_of_enum_trust_tier_fails() {
        let mut body = valid_body();
        body["results"][0]["trust_tier"] = json!("platinum");
        let err = validate(body).unwrap_err();
        assert!(matches!(err, ValidationError::Shape(_)));
    }

    #[test]
    fn test_out_of_enum_status_fails() {
        let mut body = valid_body();
        body["status"] = json!("maybe");
        assert!(validate(body).is_err());
    }

    #[test]
    fn test_relative_url_fails() {
        let mut body = valid_body();
        body["results"][1]["url"] = json!("/x");
        let err = validate(body).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::BadUrl { field: "url", .. }
        ));
    }

    #[test]
    fn test_relative_click_url_fails() {
        let mut body = valid_body();
        body["results"][0]["click_url"] = json!("not a url");
        let err = validate(body).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::BadUrl {
                field: "click_url",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_rank_fails() {
        let mut body = valid_body();
        body["results"][0]["rank"] = json!(0);
        let err = validate(body).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::RankOutOfRange { index: 0, rank: 0 }
        ));
    }

    #[test]
    fn test_bad_currency_length_fails() {
        let mut body = valid_body();
        body["results"][1]["price"]["currency"] = json!("US");
        let err = validate(body).unwrap_err();
        assert!(matches!(err, ValidationError::BadCurrency { index: 1, .. }));
    }

    #[test]
    fn test_negative_ttl_fails() {
        let mut body = valid_body();
        body["rootvine"]["ttl_seconds"] = json!(-1);
        let err = validate(body).unwrap_err();
        assert!(matches!(err, ValidationError::NegativeTtl(-1)));
    }

    #[test]
    fn test_missing_required_top_level_field_fails() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("results");
        assert!(validate(body).is_err());
    }

    #[test]
    fn test_unknown_extra_fields_tolerated() {
        // v1 responses may gain additive fields without a version bump.
        let mut body = valid_body();
        body["experimental_hint"] = json!("ignored");
        assert!(validate(body).is_ok());
    }
}
