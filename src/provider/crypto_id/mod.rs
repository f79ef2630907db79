//! Chainz CryptoID explorer.
//!
//! One host indexing several dozen small proof-of-work and proof-of-stake
//! chains. Balance queries answer with a bare decimal in whole units.
//! API documentation: https://chainz.cryptoid.info/api.dws

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::ProviderError;
use crate::provider::{decode_decimal_text, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const BASE_URL: &str = "http://chainz.cryptoid.info";
const PROVIDER_ID: &str = "cryptoid";

/// Chains indexed by the upstream, per its published list.
const SUPPORTED_CRYPTOS: &[&str] = &[
    "dash", "bc", "bay", "block", "cann", "uno", "vrc", "xc", "uro", "aur", "pot", "cure", "arch",
    "swift", "karm", "dgc", "lxc", "sync", "byc", "pc", "fibre", "i0c", "nobl", "gsx", "flt",
    "ccn", "rlc", "rby", "apex", "vior", "ltcd", "zeit", "carbon", "super", "dis", "ac", "vdo",
    "ioc", "xmg", "cinni", "crypt", "excl", "mne", "seed", "qslv", "maryj", "key", "oc", "ktk",
    "voot", "glc", "drkc", "mue", "gb", "piggy", "jbs", "grs", "icg", "rpc",
];

pub struct CryptoIdProvider {
    transport: Arc<dyn HttpTransport>,
}

impl CryptoIdProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for CryptoIdProvider {
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
            "{}/{}/api.dws?q=getbalance&a={}",
            BASE_URL,
            crypto.to_ascii_lowercase(),
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        decode_decimal_text(PROVIDER_ID, response.text())
    }
}
