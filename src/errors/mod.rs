//! Error types and failure classification for the provider layer.
//!
//! This module provides:
//! - [`ProviderError`]: The error enum returned by every provider capability
//! - [`FailureKind`]: The three-way classification callers dispatch on

mod kind;

pub use kind::FailureKind;

use thiserror::Error;

use crate::transport::TransportError;

/// Errors a provider capability method may return.
///
/// Each variant is classified into a [`FailureKind`] via the
/// [`kind`](Self::kind) method. Nothing in this crate panics on a bad
/// upstream response; every failure is one of these typed outcomes, and a
/// value is never silently substituted (a price of zero never means
/// "unknown").
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider does not serve this crypto/fiat combination.
    /// Detected from the inputs alone, before any network call.
    #[error("{provider} does not serve the pair {crypto}/{fiat}")]
    UnsupportedPair {
        /// The provider that refused the pair
        provider: String,
        /// Requested crypto symbol (folded to lowercase)
        crypto: String,
        /// Requested fiat symbol (folded to lowercase)
        fiat: String,
    },

    /// The asset is outside the provider's declared supported set.
    /// Detected from the inputs alone, before any network call.
    #[error("{provider} does not support the asset {crypto}")]
    UnsupportedAsset {
        /// The provider that refused the asset
        provider: String,
        /// Requested crypto symbol
        crypto: String,
    },

    /// The provider does not implement this capability at all.
    /// Returned by the trait's default method bodies.
    #[error("{operation} is not supported by {provider}")]
    NotSupported {
        /// The provider that lacks the capability
        provider: String,
        /// Name of the capability method
        operation: String,
    },

    /// The upstream API was reached but reported no data for the entity:
    /// an empty result set, an unknown market, a zero-length price list.
    #[error("no upstream data from {provider}: {message}")]
    NoData {
        /// The provider whose upstream came back empty
        provider: String,
        /// What exactly was missing
        message: String,
    },

    /// The provider's fee table has no entry whose delay bound fits within
    /// the caller's acceptable block delay.
    #[error("{provider} has no fee rate within {acceptable_delay} blocks")]
    NoFeeData {
        /// The fee provider consulted
        provider: String,
        /// The caller's acceptable confirmation delay, in blocks
        acceptable_delay: u32,
    },

    /// The upstream API reports the broadcast transaction invalid.
    #[error("{provider} rejected the transaction: {reason}")]
    BroadcastRejected {
        /// The provider that relayed the rejection
        provider: String,
        /// Upstream's stated reason, when it gives one
        reason: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("unusable response from {provider}: {message}")]
    MalformedResponse {
        /// The provider whose response was unusable
        provider: String,
        /// Decoding failure detail
        message: String,
    },

    /// A transport-level failure, embedded unmodified.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
}

impl ProviderError {
    /// Returns the caller-visible classification of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainfetch::errors::{FailureKind, ProviderError};
    ///
    /// let error = ProviderError::UnsupportedPair {
    ///     provider: "bitstamp".to_string(),
    ///     crypto: "btc".to_string(),
    ///     fiat: "eur".to_string(),
    /// };
    /// assert_eq!(error.kind(), FailureKind::Unsupported);
    ///
    /// let error = ProviderError::NoData {
    ///     provider: "chain.so".to_string(),
    ///     message: "empty price list".to_string(),
    /// };
    /// assert_eq!(error.kind(), FailureKind::NoData);
    /// ```
    pub fn kind(&self) -> FailureKind {
        match self {
            // The provider can never answer this request - pick another one
            Self::UnsupportedPair { .. }
            | Self::UnsupportedAsset { .. }
            | Self::NotSupported { .. } => FailureKind::Unsupported,

            // Upstream reached, nothing there
            Self::NoData { .. } | Self::NoFeeData { .. } => FailureKind::NoData,

            // No usable response for this call
            Self::BroadcastRejected { .. }
            | Self::MalformedResponse { .. }
            | Self::Transport(_) => FailureKind::Failed,
        }
    }
}
