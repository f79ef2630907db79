//! Bter exchange ticker, with cross-rate fallback.
//!
//! Bter lists most altcoins against BTC only. When the requested fiat
//! market does not exist the upstream answers `result: "false"` (a
//! string), and the rate is computed from two legs instead:
//! crypto->btc times btc->fiat. Cross-rated prices are labeled
//! `"bter (calculated)"` so callers can tell them from direct quotes.
//! API documentation: https://bter.com/api

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{AssetPair, Price};
use crate::normalize;
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const BASE_URL: &str = "http://data.bter.com/api/1/ticker";
const PROVIDER_ID: &str = "bter";
const CALCULATED_SOURCE: &str = "bter (calculated)";

#[derive(Debug, Deserialize)]
struct TickerResponse {
    /// "true" or "false", as strings
    #[serde(default)]
    result: Option<String>,
    /// Missing or null when the market has never traded
    #[serde(default)]
    last: Option<Decimal>,
}

impl TickerResponse {
    fn is_missing_market(&self) -> bool {
        self.result.as_deref() == Some("false")
    }

    fn last_or_zero(&self) -> Decimal {
        self.last.unwrap_or(Decimal::ZERO)
    }
}

pub struct BterProvider {
    transport: Arc<dyn HttpTransport>,
}

impl BterProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    async fn fetch_market(
        &self,
        crypto: &str,
        fiat: &str,
    ) -> Result<TickerResponse, ProviderError> {
        let url = format!("{}/{}_{}", BASE_URL, crypto, fiat);
        let response = self.transport.get(&url).await?;
        decode_json(PROVIDER_ID, &response)
    }
}

#[async_trait]
impl CoinDataProvider for BterProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supported_cryptos: &[],
            supports_price: true,
            supports_balance: false,
            supports_transactions: false,
            supports_push_tx: false,
            supports_fee_estimate: false,
        }
    }

    async fn get_current_price(&self, pair: &AssetPair) -> Result<Price, ProviderError> {
        let direct = self.fetch_market(pair.crypto(), pair.fiat()).await?;

        if !direct.is_missing_market() {
            let value = normalize::positive_price(PROVIDER_ID, direct.last_or_zero())?;
            return Ok(Price::new(value, PROVIDER_ID));
        }

        // No direct market. Every listed coin trades against btc, so take
        // crypto->btc and btc->fiat sequentially and multiply.
        debug!("no direct {} market on bter, crossing via btc", pair);

        let crypto_btc = self.fetch_market(pair.crypto(), "btc").await?;
        let crypto_rate = normalize::positive_price(PROVIDER_ID, crypto_btc.last_or_zero())?;

        let btc_fiat = self.fetch_market("btc", pair.fiat()).await?;
        let fiat_rate = normalize::positive_price(PROVIDER_ID, btc_fiat.last_or_zero())?;

        // Both legs come off the wire; a product past Decimal is garbage.
        let value = crypto_rate.checked_mul(fiat_rate).ok_or_else(|| {
            ProviderError::MalformedResponse {
                provider: PROVIDER_ID.to_string(),
                message: format!("implausible cross rate {} * {}", crypto_rate, fiat_rate),
            }
        })?;
        Ok(Price::new(value, CALCULATED_SOURCE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;
    use crate::transport::testing::{MockTransport, RecordedRequest};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_direct_market() {
        let transport = Arc::new(MockTransport::new().route(
            "http://data.bter.com/api/1/ticker/ltc_usd",
            r#"{"result": "true", "last": 3.21, "high": 3.30, "low": 3.08}"#,
        ));
        let provider = BterProvider::new(transport.clone());

        let price = provider
            .get_current_price(&AssetPair::new("ltc", "usd"))
            .await
            .unwrap();
        assert_eq!(price.value, dec!(3.21));
        assert_eq!(price.source, "bter");
    }

    #[tokio::test]
    async fn test_cross_rate_via_btc() {
        let transport = Arc::new(
            MockTransport::new()
                .route(
                    "http://data.bter.com/api/1/ticker/doge_usd",
                    r#"{"result": "false", "message": "Error: Invalid pair"}"#,
                )
                .route(
                    "http://data.bter.com/api/1/ticker/doge_btc",
                    r#"{"result": "true", "last": 0.0000006}"#,
                )
                .route(
                    "http://data.bter.com/api/1/ticker/btc_usd",
                    r#"{"result": "true", "last": 410.00}"#,
                ),
        );
        let provider = BterProvider::new(transport.clone());

        let price = provider
            .get_current_price(&AssetPair::new("doge", "usd"))
            .await
            .unwrap();
        assert_eq!(price.value, dec!(0.000246));
        assert_eq!(price.source, "bter (calculated)");

        // The legs are fetched sequentially, direct market first.
        assert_eq!(
            transport.requests(),
            vec![
                RecordedRequest::Get {
                    url: "http://data.bter.com/api/1/ticker/doge_usd".to_string()
                },
                RecordedRequest::Get {
                    url: "http://data.bter.com/api/1/ticker/doge_btc".to_string()
                },
                RecordedRequest::Get {
                    url: "http://data.bter.com/api/1/ticker/btc_usd".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_absurd_cross_rate_is_malformed() {
        let transport = Arc::new(
            MockTransport::new()
                .route(
                    "http://data.bter.com/api/1/ticker/doge_usd",
                    r#"{"result": "false"}"#,
                )
                .route(
                    "http://data.bter.com/api/1/ticker/doge_btc",
                    r#"{"result": "true", "last": "100000000000000000000"}"#,
                )
                .route(
                    "http://data.bter.com/api/1/ticker/btc_usd",
                    r#"{"result": "true", "last": "10000000000"}"#,
                ),
        );
        let provider = BterProvider::new(transport.clone());

        let error = provider
            .get_current_price(&AssetPair::new("doge", "usd"))
            .await
            .unwrap_err();
        assert!(matches!(error, ProviderError::MalformedResponse { .. }));
        assert_eq!(error.kind(), FailureKind::Failed);
    }

    #[tokio::test]
    async fn test_null_last_is_no_data_not_zero() {
        let transport = Arc::new(MockTransport::new().route(
            "http://data.bter.com/api/1/ticker/ltc_usd",
            r#"{"result": "true", "last": null}"#,
        ));
        let provider = BterProvider::new(transport.clone());

        let error = provider
            .get_current_price(&AssetPair::new("ltc", "usd"))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), FailureKind::NoData);
    }

    #[tokio::test]
    async fn test_dead_cross_leg_is_no_data() {
        let transport = Arc::new(
            MockTransport::new()
                .route(
                    "http://data.bter.com/api/1/ticker/doge_usd",
                    r#"{"result": "false"}"#,
                )
                .route(
                    "http://data.bter.com/api/1/ticker/doge_btc",
                    r#"{"result": "true", "last": 0}"#,
                ),
        );
        let provider = BterProvider::new(transport.clone());

        let error = provider
            .get_current_price(&AssetPair::new("doge", "usd"))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), FailureKind::NoData);
    }
}
