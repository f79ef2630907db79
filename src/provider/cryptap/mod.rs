//! Cryptap.us explorers.
//!
//! A cluster of Abe-style explorers under one domain, one path segment
//! per chain. Balances are plain-text decimals in whole units.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::ProviderError;
use crate::provider::{decode_decimal_text, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const BASE_URL: &str = "http://cryptap.us";
const PROVIDER_ID: &str = "cryptap.us";

const SUPPORTED_CRYPTOS: &[&str] = &[
    "nmc", "wds", "ber", "scn", "sc0", "wdc", "nvc", "cas", "myr",
];

pub struct CryptapProvider {
    transport: Arc<dyn HttpTransport>,
}

impl CryptapProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for CryptapProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supported_cryptos: SUPPORTED_CRYPTOS,
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
            "{}/{}/explorer/q/addressbalance/{}",
            BASE_URL,
            crypto.to_ascii_lowercase(),
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        decode_decimal_text(PROVIDER_ID, response.text())
    }
}
