//! Blockchain.info address lookup.
//!
//! API documentation: https://blockchain.info/api

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::normalize;
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const BASE_URL: &str = "http://blockchain.info/address";
const PROVIDER_ID: &str = "blockchain.info";

#[derive(Debug, Deserialize)]
struct AddressResponse {
    /// Confirmed balance in satoshis
    final_balance: i64,
}

pub struct BlockchainInfoProvider {
    transport: Arc<dyn HttpTransport>,
}

impl BlockchainInfoProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for BlockchainInfoProvider {
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
        let url = format!(
            "{}/{}?format=json",
            BASE_URL,
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        let body: AddressResponse = decode_json(PROVIDER_ID, &response)?;
        Ok(normalize::from_subunit(body.final_balance, 8))
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
            "http://blockchain.info/address/1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa?format=json",
            r#"{"address": "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", "n_tx": 1260,
                "total_received": 6625027717, "final_balance": 6625027717}"#,
        ));
        let provider = BlockchainInfoProvider::new(transport.clone());

        let balance = provider
            .get_balance("btc", "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", 1)
            .await
            .unwrap();
        assert_eq!(balance, dec!(66.25027717));
    }
}
