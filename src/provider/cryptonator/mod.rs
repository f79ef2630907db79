//! Cryptonator market aggregator.
//!
//! Quotes a wide range of crypto/fiat pairs. Unknown pairs still answer
//! 200 with an empty ticker and an error string.
//! API documentation: https://www.cryptonator.com/api

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{AssetPair, Price};
use crate::normalize;
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const BASE_URL: &str = "https://www.cryptonator.com/api/ticker";
const PROVIDER_ID: &str = "cryptonator";

#[derive(Debug, Deserialize)]
struct TickerResponse {
    ticker: Option<Ticker>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Ticker {
    /// Volume-weighted price, quoted as a decimal string
    #[serde(default)]
    price: Option<Decimal>,
}

pub struct CryptonatorProvider {
    transport: Arc<dyn HttpTransport>,
}

impl CryptonatorProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for CryptonatorProvider {
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
        let url = format!("{}/{}-{}", BASE_URL, pair.crypto(), pair.fiat());

        let response = self.transport.get(&url).await?;
        let ticker: TickerResponse = decode_json(PROVIDER_ID, &response)?;

        let price = ticker.ticker.and_then(|t| t.price).ok_or_else(|| {
            ProviderError::NoData {
                provider: PROVIDER_ID.to_string(),
                message: ticker
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| format!("no ticker for {}", pair)),
            }
        })?;

        let value = normalize::positive_price(PROVIDER_ID, price)?;
        Ok(Price::new(value, PROVIDER_ID))
    }
}
