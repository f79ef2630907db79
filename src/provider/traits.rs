//! Provider trait definition.
//!
//! This module defines the core `CoinDataProvider` trait that all
//! upstream adapters implement.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::ProviderError;
use crate::models::{AssetPair, Price, Transaction};

use super::capabilities::ProviderCapabilities;

/// Trait for cryptocurrency data providers.
///
/// Implement this trait to add support for a new upstream service. Every
/// operation has a default body returning [`ProviderError::NotSupported`],
/// so an adapter only writes the operations its upstream actually serves;
/// the advertised [`ProviderCapabilities`] must agree with which methods
/// are overridden.
///
/// All amounts cross this boundary in whole currency units as
/// [`Decimal`], regardless of how the upstream scales them. The one
/// exception is [`get_optimal_fee`](CoinDataProvider::get_optimal_fee),
/// which returns subunits (satoshis) because that is the unit fees are
/// quoted and paid in.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use chainfetch::provider::{CoinDataProvider, ProviderCapabilities};
///
/// struct MyExplorer {
///     transport: Arc<dyn HttpTransport>,
/// }
///
/// #[async_trait]
/// impl CoinDataProvider for MyExplorer {
///     fn id(&self) -> &'static str {
///         "my-explorer"
///     }
///
///     fn capabilities(&self) -> ProviderCapabilities {
///         ProviderCapabilities {
///             supported_cryptos: &["btc"],
///             supports_price: false,
///             supports_balance: true,
///             supports_transactions: false,
///             supports_push_tx: false,
///             supports_fee_estimate: false,
///         }
///     }
///
///     // ... override get_balance
/// }
/// ```
#[async_trait]
pub trait CoinDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// A short lowercase string like "bitstamp" or "chain.so". Used for
    /// logging, error messages, and as the price source tag.
    fn id(&self) -> &'static str;

    /// Describes what this provider can do.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Reject a currency this provider does not serve.
    ///
    /// Adapters call this before building a URL so an unsupported
    /// currency never generates network traffic.
    fn check_asset(&self, crypto: &str) -> Result<(), ProviderError> {
        if self.capabilities().supports_crypto(crypto) {
            Ok(())
        } else {
            Err(ProviderError::UnsupportedAsset {
                provider: self.id().to_string(),
                crypto: crypto.to_lowercase(),
            })
        }
    }

    /// Fetch the current exchange rate for a pair.
    ///
    /// Returns the rate in fiat per one unit of crypto, tagged with the
    /// source it came from. Providers must never return a zero or
    /// negative price; a missing market is an error.
    async fn get_current_price(&self, pair: &AssetPair) -> Result<Price, ProviderError> {
        let _ = pair;
        Err(ProviderError::NotSupported {
            provider: self.id().to_string(),
            operation: "get_current_price".to_string(),
        })
    }

    /// Fetch the confirmed balance of an address, in whole currency units.
    ///
    /// `min_confirmations` is honored where the upstream exposes a
    /// confirmation filter; providers that only serve a fixed confirmed
    /// balance document that in their adapter.
    async fn get_balance(
        &self,
        crypto: &str,
        address: &str,
        min_confirmations: u32,
    ) -> Result<Decimal, ProviderError> {
        let _ = (crypto, address, min_confirmations);
        Err(ProviderError::NotSupported {
            provider: self.id().to_string(),
            operation: "get_balance".to_string(),
        })
    }

    /// Fetch the transaction history of an address.
    ///
    /// Results are ordered most recent first, with undated entries last.
    /// Transactions below `min_confirmations` are filtered out where the
    /// upstream reports confirmation counts.
    async fn get_transactions(
        &self,
        crypto: &str,
        address: &str,
        min_confirmations: u32,
    ) -> Result<Vec<Transaction>, ProviderError> {
        let _ = (crypto, address, min_confirmations);
        Err(ProviderError::NotSupported {
            provider: self.id().to_string(),
            operation: "get_transactions".to_string(),
        })
    }

    /// Broadcast a signed raw transaction, returning the upstream's
    /// transaction id.
    async fn push_tx(&self, crypto: &str, raw_tx: &str) -> Result<String, ProviderError> {
        let _ = (crypto, raw_tx);
        Err(ProviderError::NotSupported {
            provider: self.id().to_string(),
            operation: "push_tx".to_string(),
        })
    }

    /// Estimate the total fee in subunits (satoshis) for a transaction of
    /// `tx_bytes` bytes that must confirm within `acceptable_block_delay`
    /// blocks.
    ///
    /// The estimate is the cheapest per-byte rate whose worst-case delay
    /// fits the caller's tolerance, multiplied by the transaction size.
    async fn get_optimal_fee(
        &self,
        crypto: &str,
        tx_bytes: u32,
        acceptable_block_delay: u32,
    ) -> Result<Decimal, ProviderError> {
        let _ = (crypto, tx_bytes, acceptable_block_delay);
        Err(ProviderError::NotSupported {
            provider: self.id().to_string(),
            operation: "get_optimal_fee".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;

    struct BalanceOnly;

    #[async_trait]
    impl CoinDataProvider for BalanceOnly {
        fn id(&self) -> &'static str {
            "balance-only"
        }

        fn capabilities(&self) -> ProviderCapabilities {
            ProviderCapabilities {
                supported_cryptos: &["btc"],
                supports_price: false,
                supports_balance: true,
                supports_transactions: false,
                supports_push_tx: false,
                supports_fee_estimate: false,
            }
        }
    }

    #[tokio::test]
    async fn test_default_operations_are_not_supported() {
        let provider = BalanceOnly;
        let pair = AssetPair::new("btc", "usd");

        let error = provider.get_current_price(&pair).await.unwrap_err();
        assert_eq!(error.kind(), FailureKind::Unsupported);
        assert_eq!(
            error.to_string(),
            "get_current_price is not supported by balance-only"
        );

        let error = provider.push_tx("btc", "00").await.unwrap_err();
        assert_eq!(error.kind(), FailureKind::Unsupported);
    }

    #[test]
    fn test_check_asset() {
        let provider = BalanceOnly;
        assert!(provider.check_asset("btc").is_ok());
        assert!(provider.check_asset("BTC").is_ok());

        let error = provider.check_asset("doge").unwrap_err();
        assert_eq!(error.kind(), FailureKind::Unsupported);
        assert_eq!(
            error.to_string(),
            "balance-only does not support the asset doge"
        );
    }
}
