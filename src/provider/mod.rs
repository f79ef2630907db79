//! Provider abstractions and upstream adapters.
//!
//! This module contains:
//! - The `CoinDataProvider` trait that all adapters implement
//! - Provider capability declarations
//! - Concrete adapters, one per upstream service or explorer family
//! - The registry that instantiates the full provider set
//!
//! # Architecture
//!
//! Adapters are thin: each one knows its upstream's URLs, response shapes,
//! and unit scales, and nothing else. Everything adapters share lives
//! elsewhere - transport behind [`HttpTransport`](crate::transport::HttpTransport),
//! unit and timestamp conversion in [`normalize`](crate::normalize), the
//! error taxonomy in [`errors`](crate::errors). Explorer software that runs
//! on many hosts (Abe, Insight) is adapted once and instantiated per host.

mod capabilities;
mod registry;
mod traits;

// Upstream adapters
pub mod abe;
pub mod bit_easy;
pub mod bitstamp;
pub mod block_cypher;
pub mod block_strap;
pub mod blockchain_info;
pub mod blockr;
pub mod btc_e;
pub mod bter;
pub mod chain_so;
pub mod coin_swap;
pub mod coin_tape;
pub mod cryptap;
pub mod crypto_id;
pub mod cryptonator;
pub mod feathercoin;
pub mod insight;
pub mod nxt_portal;
pub mod toshi;
pub mod winkdex;

// Re-exports
pub use capabilities::ProviderCapabilities;
pub use registry::all_providers;
pub use traits::CoinDataProvider;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::errors::ProviderError;
use crate::transport::{TransportError, TransportResponse};

/// Decode a JSON response body, mapping decode failures to
/// [`ProviderError::MalformedResponse`].
pub(crate) fn decode_json<T: DeserializeOwned>(
    provider: &'static str,
    response: &TransportResponse,
) -> Result<T, ProviderError> {
    response
        .json()
        .map_err(|error| ProviderError::MalformedResponse {
            provider: provider.to_string(),
            message: error.to_string(),
        })
}

/// Parse a plain-text decimal body. Several explorers answer balance
/// queries with a bare number and nothing else.
pub(crate) fn decode_decimal_text(
    provider: &'static str,
    text: &str,
) -> Result<Decimal, ProviderError> {
    text.trim()
        .parse::<Decimal>()
        .map_err(|error| ProviderError::MalformedResponse {
            provider: provider.to_string(),
            message: format!("expected a decimal body: {}", error),
        })
}

/// Parse a plain-text integer body (subunit balances).
pub(crate) fn decode_i64_text(provider: &'static str, text: &str) -> Result<i64, ProviderError> {
    text.trim()
        .parse::<i64>()
        .map_err(|error| ProviderError::MalformedResponse {
            provider: provider.to_string(),
            message: format!("expected an integer body: {}", error),
        })
}

/// Interpret a transport failure on a broadcast endpoint.
///
/// Push upstreams whose only failure channel is the HTTP status answer
/// 4xx when they refuse a transaction; that is a verdict on the
/// transaction, not a transport fault. Anything else passes through
/// unmodified.
pub(crate) fn broadcast_rejection(
    provider: &'static str,
    error: TransportError,
) -> ProviderError {
    match error {
        TransportError::Http { status, .. } if (400..500).contains(&status) => {
            ProviderError::BroadcastRejected {
                provider: provider.to_string(),
                reason: format!("HTTP {}", status),
            }
        }
        other => ProviderError::Transport(other),
    }
}
