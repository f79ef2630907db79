//! Chainfetch
//!
//! Normalized access to public cryptocurrency data services: market
//! prices, address balances, transaction histories, broadcast relays and
//! fee estimates, each served by whichever upstreams carry the asset.
//!
//! # Overview
//!
//! Public blockchain and market APIs disagree on everything: units
//! (integer satoshis vs whole coins), timestamp formats, response
//! envelopes, and how failure is signaled. This crate hides that spread
//! behind one trait:
//!
//! - One [`CoinDataProvider`] implementation per upstream service
//! - Declared [`ProviderCapabilities`] instead of trial-and-error discovery
//! - Uniform output units: whole coins for amounts, satoshis for fees,
//!   UTC instants for dates, most-recent-first transaction lists
//! - A three-way failure taxonomy ([`FailureKind`]) that keeps "cannot
//!   serve", "nothing there" and "upstream broke" apart
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |      Caller      |
//! +------------------+
//!          |
//!          v
//! +------------------+     +----------------------+
//! | CoinDataProvider | <-- | all_providers roster |
//! +------------------+     +----------------------+
//!          |
//!          v
//! +------------------+
//! |  HttpTransport   |  (reqwest in production, mock in tests)
//! +------------------+
//!          |
//!          v
//!     upstream API
//! ```
//!
//! Adapters never open sockets themselves; they describe requests to an
//! injected [`HttpTransport`]. That keeps every adapter testable against
//! canned bodies and keeps client policy (timeouts, pooling) in one
//! place.
//!
//! # Core Types
//!
//! - [`AssetPair`] - case-folded crypto/fiat pair
//! - [`Price`] - exchange rate plus the source it came from
//! - [`Transaction`] - normalized history entry
//! - [`FeeSchedule`] - fee-rate table keyed by confirmation delay
//! - [`ProviderError`] / [`FailureKind`] - typed failures and their
//!   caller-visible classification

pub mod errors;
pub mod models;
pub mod normalize;
pub mod provider;
pub mod transport;

// Re-export all public types from models
pub use models::{AssetPair, FeeSample, FeeSchedule, Price, Transaction};

// Re-export error types
pub use errors::{FailureKind, ProviderError};

// Re-export transport types
pub use transport::{HttpTransport, ReqwestTransport, TransportError, TransportResponse};

// Re-export provider contract and roster
pub use provider::{all_providers, CoinDataProvider, ProviderCapabilities};

// Re-export provider types
pub use provider::abe::{AbeExplorer, AbeHost};
pub use provider::bit_easy::BitEasyProvider;
pub use provider::bitstamp::BitstampProvider;
pub use provider::block_cypher::BlockCypherProvider;
pub use provider::block_strap::BlockStrapProvider;
pub use provider::blockchain_info::BlockchainInfoProvider;
pub use provider::blockr::BlockrProvider;
pub use provider::btc_e::BtcEProvider;
pub use provider::bter::BterProvider;
pub use provider::chain_so::ChainSoProvider;
pub use provider::coin_swap::CoinSwapProvider;
pub use provider::coin_tape::CoinTapeProvider;
pub use provider::cryptap::CryptapProvider;
pub use provider::crypto_id::CryptoIdProvider;
pub use provider::cryptonator::CryptonatorProvider;
pub use provider::feathercoin::FeathercoinProvider;
pub use provider::insight::{InsightExplorer, InsightHost};
pub use provider::nxt_portal::NxtPortalProvider;
pub use provider::toshi::ToshiProvider;
pub use provider::winkdex::WinkdexProvider;
