//! BTC-e exchange ticker.
//!
//! The v3 ticker keys its payload by pair name, so the response is a map
//! with one entry per requested pair. Unknown pairs come back as an error
//! object instead. API documentation: https://btc-e.com/api/documentation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{AssetPair, Price};
use crate::normalize;
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const BASE_URL: &str = "https://btc-e.com/api/3/ticker";
const PROVIDER_ID: &str = "btc-e";

/// Response from the v3 ticker endpoint.
///
/// `success`/`error` only appear on failures; on success the body is a
/// map keyed by pair name.
#[derive(Debug, Deserialize)]
struct TickerResponse {
    #[serde(default)]
    #[allow(dead_code)]
    success: Option<u8>,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    markets: HashMap<String, Ticker>,
}

#[derive(Debug, Deserialize)]
struct Ticker {
    /// Last trade price
    last: Decimal,
}

pub struct BtcEProvider {
    transport: Arc<dyn HttpTransport>,
}

impl BtcEProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for BtcEProvider {
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
        let pair_key = format!("{}_{}", pair.crypto(), pair.fiat());
        let url = format!("{}/{}", BASE_URL, pair_key);

        let response = self.transport.get(&url).await?;
        let ticker: TickerResponse = decode_json(PROVIDER_ID, &response)?;

        if let Some(error) = ticker.error {
            return Err(ProviderError::NoData {
                provider: PROVIDER_ID.to_string(),
                message: error,
            });
        }

        let market = ticker
            .markets
            .get(&pair_key)
            .ok_or_else(|| ProviderError::NoData {
                provider: PROVIDER_ID.to_string(),
                message: format!("no market for {}", pair_key),
            })?;

        let value = normalize::positive_price(PROVIDER_ID, market.last)?;
        Ok(Price::new(value, PROVIDER_ID))
    }
}
