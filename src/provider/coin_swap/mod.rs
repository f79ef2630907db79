//! Coin-Swap exchange ticker.
//!
//! The one upstream in the set that wants its market path upper-cased.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{AssetPair, Price};
use crate::normalize;
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const BASE_URL: &str = "https://api.coin-swap.net/market/stats";
const PROVIDER_ID: &str = "coin-swap";

#[derive(Debug, Deserialize)]
struct StatsResponse {
    lastprice: Decimal,
}

pub struct CoinSwapProvider {
    transport: Arc<dyn HttpTransport>,
}

impl CoinSwapProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for CoinSwapProvider {
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
        let url = format!(
            "{}/{}/{}",
            BASE_URL,
            pair.crypto().to_ascii_uppercase(),
            pair.fiat().to_ascii_uppercase()
        );

        let response = self.transport.get(&url).await?;
        let stats: StatsResponse = decode_json(PROVIDER_ID, &response)?;
        let value = normalize::positive_price(PROVIDER_ID, stats.lastprice)?;
        Ok(Price::new(value, PROVIDER_ID))
    }
}
