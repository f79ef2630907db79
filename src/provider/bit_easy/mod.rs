//! BitEasy block explorer.
//!
//! Only the address balance endpoint works without an API key, so that
//! is the one capability exposed here.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::normalize;
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const BASE_URL: &str = "https://api.biteasy.com/blockchain/v1/addresses";
const PROVIDER_ID: &str = "biteasy";

#[derive(Debug, Deserialize)]
struct AddressResponse {
    data: AddressData,
}

#[derive(Debug, Deserialize)]
struct AddressData {
    /// Confirmed balance in satoshis
    balance: i64,
}

pub struct BitEasyProvider {
    transport: Arc<dyn HttpTransport>,
}

impl BitEasyProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for BitEasyProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
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

    async fn get_balance(
        &self,
        crypto: &str,
        address: &str,
        _min_confirmations: u32,
    ) -> Result<Decimal, ProviderError> {
        self.check_asset(crypto)?;
        let url = format!("{}/{}", BASE_URL, urlencoding::encode(address));

        let response = self.transport.get(&url).await?;
        let body: AddressResponse = decode_json(PROVIDER_ID, &response)?;
        Ok(normalize::from_subunit(body.data.balance, 8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::MockTransport;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_balance_scaled_from_satoshis() {
        let transport = Arc::new(MockTransport::new().route(
            "https://api.biteasy.com/blockchain/v1/addresses/1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
            r#"{"status": 200, "data": {"address": "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
                "balance": 6342912, "total_received": 7546580233}}"#,
        ));
        let provider = BitEasyProvider::new(transport.clone());

        let balance = provider
            .get_balance("btc", "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", 1)
            .await
            .unwrap();
        assert_eq!(balance, dec!(0.06342912));
    }
}
