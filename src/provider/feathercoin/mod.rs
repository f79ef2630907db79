//! Feathercoin.com address lookup.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const BASE_URL: &str = "http://api.feathercoin.com/";
const PROVIDER_ID: &str = "feathercoin.com";

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    /// Whole-unit balance
    balance: Decimal,
}

pub struct FeathercoinProvider {
    transport: Arc<dyn HttpTransport>,
}

impl FeathercoinProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for FeathercoinProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supported_cryptos: &["ftc"],
            supports_price: false,
            supports_balance: true,
            supports_transactions: false,
            supports_push_tx: false,
            supports_fee_estimate: false,
        }
    }

    async fn get_balance(
        &self,
        crypto: &str,
        address: &str,
        _min_confirmations: u32,
    ) -> Result<Decimal, ProviderError> {
        self.check_asset(crypto)?;
        let url = format!(
            "{}?output=balance&address={}&json=1",
            BASE_URL,
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        let body: BalanceResponse = decode_json(PROVIDER_ID, &response)?;
        Ok(body.balance)
    }
}
