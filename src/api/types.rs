//! Wire types for the inventory service.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Reason attached to stock-set commands issued from the inventory view.
pub const ADJUST_REASON: &str = "Ajuste manual";
/// Reason attached to movements recorded from the inventory view.
pub const MOVEMENT_REASON: &str = "Movimiento manual";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    #[serde(default)]
    pub ean13: Option<String>,
    pub name: String,
    /// Signed: the server does not stop a movement from taking stock below zero.
    pub stock_qty: i64,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn has_negative_stock(&self) -> bool {
        self.stock_qty < 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub id: i64,
    pub product_id: i64,
    pub delta: i64,
    pub qty_before: i64,
    pub qty_after: i64,
    /// Classification assigned by the server: `IN`, `OUT` or `ADJUST`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Movement {
    /// `qty_after == qty_before + delta` and neither side is negative. The
    /// server is authoritative; this is only used to flag suspicious rows.
    pub fn is_consistent(&self) -> bool {
        self.qty_before >= 0
            && self.qty_after >= 0
            && self.qty_before.checked_add(self.delta) == Some(self.qty_after)
    }
}

/// Parse a server timestamp.
///
/// RFC 3339 values are converted to UTC. Values without an offset (what the
/// service emits for its naive `utcnow` columns) are read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => Ok(timestamp.with_timezone(&Utc)),
        Err(_) => raw.parse::<NaiveDateTime>().map(|naive| naive.and_utc()),
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Body of `PATCH /api/products/{id}/stock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub quantity: u32,
    pub reason: String,
}

/// Body of `POST /api/movements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovement {
    pub product_id: i64,
    pub delta: i64,
    pub reason: String,
}

/// Body of `POST /api/products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub sku: String,
    pub ean13: String,
    pub name: String,
    pub stock_qty: u32,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Filter for `GET /api/movements`. Unset fields are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementQuery {
    pub product_id: Option<i64>,
    pub limit: Option<u32>,
}

impl MovementQuery {
    /// Query pairs in the order the server documents them.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.product_id {
            pairs.push(("product_id", id.to_string()));
        }
        if let Some(limit) = self.limit.filter(|limit| *limit > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}
