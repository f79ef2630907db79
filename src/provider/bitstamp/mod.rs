//! Bitstamp exchange ticker.
//!
//! Serves exactly one market: the BTC/USD spot rate from the public
//! ticker endpoint. Any other pair is refused before a request is made.
//! API documentation: https://www.bitstamp.net/api/

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{AssetPair, Price};
use crate::normalize;
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const TICKER_URL: &str = "https://www.bitstamp.net/api/ticker/";
const PROVIDER_ID: &str = "bitstamp";

/// Response from the ticker endpoint
#[derive(Debug, Deserialize)]
struct TickerResponse {
    /// Last trade price, quoted as a decimal string
    last: Decimal,
}

pub struct BitstampProvider {
    transport: Arc<dyn HttpTransport>,
}

impl BitstampProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for BitstampProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supported_cryptos: &["btc"],
            supports_price: true,
            supports_balance: false,
            supports_transactions: false,
            supports_push_tx: false,
            supports_fee_estimate: false,
        }
    }

    async fn get_current_price(&self, pair: &AssetPair) -> Result<Price, ProviderError> {
        if pair.crypto() != "btc" || pair.fiat() != "usd" {
            return Err(ProviderError::UnsupportedPair {
                provider: PROVIDER_ID.to_string(),
                crypto: pair.crypto().to_string(),
                fiat: pair.fiat().to_string(),
            });
        }

        let response = self.transport.get(TICKER_URL).await?;
        let ticker: TickerResponse = decode_json(PROVIDER_ID, &response)?;
        let value = normalize::positive_price(PROVIDER_ID, ticker.last)?;
        Ok(Price::new(value, PROVIDER_ID))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;
    use crate::transport::testing::MockTransport;
    use rust_decimal_macros::dec;

    #[test]
    fn test_provider_id() {
        let provider = BitstampProvider::new(Arc::new(MockTransport::new()));
        assert_eq!(provider.id(), "bitstamp");
    }

    #[test]
    fn test_capabilities() {
        let provider = BitstampProvider::new(Arc::new(MockTransport::new()));
        let caps = provider.capabilities();
        assert!(caps.supports_price);
        assert!(!caps.supports_balance);
        assert!(!caps.supports_push_tx);
    }

    #[tokio::test]
    async fn test_usd_price() {
        let transport = Arc::new(MockTransport::new().route(
            "https://www.bitstamp.net/api/ticker/",
            r#"{"high": "416.00", "last": "410.99", "bid": "410.25", "volume": "11183.1"}"#,
        ));
        let provider = BitstampProvider::new(transport.clone());

        let price = provider
            .get_current_price(&AssetPair::new("BTC", "USD"))
            .await
            .unwrap();
        assert_eq!(price.value, dec!(410.99));
        assert_eq!(price.source, "bitstamp");
    }

    #[tokio::test]
    async fn test_repeated_calls_requery_and_agree() {
        let transport = Arc::new(MockTransport::new().route(
            "https://www.bitstamp.net/api/ticker/",
            r#"{"last": "410.99"}"#,
        ));
        let provider = BitstampProvider::new(transport.clone());
        let pair = AssetPair::new("btc", "usd");

        let first = provider.get_current_price(&pair).await.unwrap();
        let second = provider.get_current_price(&pair).await.unwrap();
        assert_eq!(first.value, second.value);
        assert_eq!(first.source, second.source);
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_non_usd_fiat_refused_without_request() {
        let transport = Arc::new(MockTransport::new());
        let provider = BitstampProvider::new(transport.clone());

        let error = provider
            .get_current_price(&AssetPair::new("btc", "eur"))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), FailureKind::Unsupported);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_non_btc_crypto_refused_without_request() {
        let transport = Arc::new(MockTransport::new());
        let provider = BitstampProvider::new(transport.clone());

        let error = provider
            .get_current_price(&AssetPair::new("ltc", "usd"))
            .await
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "bitstamp does not serve the pair ltc/usd"
        );
        assert_eq!(transport.request_count(), 0);
    }
}
