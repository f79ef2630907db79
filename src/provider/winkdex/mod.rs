//! Winkdex bitcoin price index.
//!
//! A volume-weighted BTC/USD index. The price comes back as an integer
//! number of US cents, the only provider in the set that does not use
//! either whole units or satoshis.
//! API documentation: http://docs.winkdex.com/

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{AssetPair, Price};
use crate::normalize;
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const PRICE_URL: &str = "https://winkdex.com/api/v0/price";
const PROVIDER_ID: &str = "winkdex";

#[derive(Debug, Deserialize)]
struct PriceResponse {
    /// Index value in whole US cents
    price: i64,
}

pub struct WinkdexProvider {
    transport: Arc<dyn HttpTransport>,
}

impl WinkdexProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for WinkdexProvider {
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

        let response = self.transport.get(PRICE_URL).await?;
        let body: PriceResponse = decode_json(PROVIDER_ID, &response)?;
        let value = normalize::positive_price(PROVIDER_ID, normalize::from_subunit(body.price, 2))?;
        Ok(Price::new(value, PROVIDER_ID))
    }
}
