//! Shared normalization rules every provider applies on the way out.
//!
//! Upstream APIs disagree on units (integer satoshis vs whole coins),
//! timestamp formats (epoch seconds vs ISO text), and what a missing market
//! looks like. These helpers pin the conventions all adapters share:
//! balances in whole units, timezone-aware instants, and prices that are
//! either positive or an error - never a silent zero.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::errors::ProviderError;

/// Convert an integer subunit amount into whole units by an exact decimal
/// shift - no float math.
///
/// The scale is hard-coded at each call site: it is specific to a provider
/// and asset (satoshi-style chains and NXT's NQT use 8; Winkdex reports
/// whole US cents, scale 2), never assumed globally.
pub fn from_subunit(raw: i64, scale: u32) -> Decimal {
    Decimal::new(raw, scale)
}

/// Interpret unix seconds as a UTC instant.
pub fn instant_from_unix(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

/// Parse an RFC 3339 timestamp, tolerating the offset-less variant some
/// explorers emit (treated as UTC).
pub fn instant_from_rfc3339(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Validate a parsed price.
///
/// Upstreams signal "no market" in creative ways - `null`, `0`, an empty
/// string coerced to zero. None of those may surface as a real quote, so
/// anything non-positive becomes [`ProviderError::NoData`].
pub fn positive_price(provider: &str, value: Decimal) -> Result<Decimal, ProviderError> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(ProviderError::NoData {
            provider: provider.to_string(),
            message: format!("non-positive price {}", value),
        })
    }
}
