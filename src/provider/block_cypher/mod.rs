//! BlockCypher block explorer.
//!
//! Address balances for btc, ltc and uro. Balances come back as integer
//! subunits. API documentation: http://dev.blockcypher.com/

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::normalize;
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const BASE_URL: &str = "http://api.blockcypher.com/v1";
const PROVIDER_ID: &str = "blockcypher";

#[derive(Debug, Deserialize)]
struct AddressResponse {
    /// Confirmed balance in subunits
    balance: i64,
}

pub struct BlockCypherProvider {
    transport: Arc<dyn HttpTransport>,
}

impl BlockCypherProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for BlockCypherProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supported_cryptos: &["btc", "ltc", "uro"],
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
            "{}/{}/main/addrs/{}",
            BASE_URL,
            crypto.to_ascii_lowercase(),
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        let body: AddressResponse = decode_json(PROVIDER_ID, &response)?;
        Ok(normalize::from_subunit(body.balance, 8))
    }
}
