//! Limit/offset pagination for list endpoints.
//!
//! Query parameters are parsed leniently: a missing, empty, or non-numeric
//! `limit`/`offset` falls back to its default instead of failing the
//! request. Defaults are `limit=10`, `offset=0`; `limit` is clamped to
//! `1..=100` and `offset` is floored at zero.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse::<i64>().ok()))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: i64, limit: i64, offset: i64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset + limit < total,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default 10)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub limit: Option<i64>,
    /// Number of items to skip (default 0)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn meta(&self, total: i64) -> PaginationMeta {
        PaginationMeta::new(total, self.limit(), self.offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unspecified() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_custom_values() {
        let params = PaginationParams::new(Some(20), Some(40));
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_limit_is_clamped() {
        let cases = [(Some(0), 1), (Some(-3), 1), (Some(1), 1), (Some(100), 100), (Some(150), 100)];

        for (input, expected) in cases {
            assert_eq!(PaginationParams::new(input, None).limit(), expected);
        }
    }

    #[test]
    fn test_negative_offset_is_floored() {
        assert_eq!(PaginationParams::new(None, Some(-5)).offset(), 0);
    }

    #[test]
    fn test_deserialize_numeric_strings() {
        let json = r#"{"limit":"25","offset":"50"}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_deserialize_garbage_degrades_to_defaults() {
        let json = r#"{"limit":"ten","offset":"abc"}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_deserialize_empty_and_missing() {
        let params: PaginationParams = serde_json::from_str(r#"{"limit":""}"#).unwrap();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_meta_has_more() {
        assert!(PaginationMeta::new(25, 10, 0).has_more);
        assert!(PaginationMeta::new(25, 10, 10).has_more);
        assert!(!PaginationMeta::new(25, 10, 20).has_more);
        assert!(!PaginationMeta::new(0, 10, 0).has_more);
    }

    #[test]
    fn test_meta_serialize() {
        let meta = PaginationParams::new(Some(20), Some(40)).meta(100);
        let serialized = serde_json::to_string(&meta).unwrap();
        assert!(serialized.contains(r#""total":100"#));
        assert!(serialized.contains(r#""limit":20"#));
        assert!(serialized.contains(r#""offset":40"#));
        assert!(serialized.contains(r#""has_more":true"#));
    }
}
