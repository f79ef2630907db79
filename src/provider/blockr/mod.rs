//! Blockr.io explorers.
//!
//! One explorer per chain, addressed by subdomain
//! (`http://{crypto}.blockr.io/api/v1`). Covers balance, transaction
//! history and broadcast. Responses carry a `{status, data}` envelope
//! and broadcast verdicts arrive in-band with HTTP 200.
//! API documentation: http://blockr.io/documentation/api

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::Transaction;
use crate::normalize;
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const PROVIDER_ID: &str = "blockr";

// ============================================================================
// API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    data: T,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AddressInfo {
    /// Whole-unit balance
    balance: Decimal,
}

#[derive(Debug, Deserialize)]
struct AddressTxs {
    txs: Vec<BlockrTx>,
}

#[derive(Debug, Deserialize)]
struct BlockrTx {
    /// Transaction hash
    tx: String,
    /// RFC 3339 timestamp
    time_utc: String,
    /// Signed whole-unit amount; negative for spends
    amount: Decimal,
    confirmations: u32,
}

pub struct BlockrProvider {
    transport: Arc<dyn HttpTransport>,
}

impl BlockrProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    fn base_url(crypto: &str) -> String {
        format!("http://{}.blockr.io/api/v1", crypto.to_ascii_lowercase())
    }
}

#[async_trait]
impl CoinDataProvider for BlockrProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supported_cryptos: &["btc", "ltc", "ppc", "mec", "qrk", "dgc", "tbtc"],
            supports_price: false,
            supports_balance: true,
            supports_transactions: true,
            supports_push_tx: true,
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
            "{}/address/info/{}",
            Self::base_url(crypto),
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        let body: Envelope<AddressInfo> = decode_json(PROVIDER_ID, &response)?;
        Ok(body.data.balance)
    }

    async fn get_transactions(
        &self,
        crypto: &str,
        address: &str,
        min_confirmations: u32,
    ) -> Result<Vec<Transaction>, ProviderError> {
        self.check_asset(crypto)?;
        let url = format!(
            "{}/address/txs/{}",
            Self::base_url(crypto),
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        let body: Envelope<AddressTxs> = decode_json(PROVIDER_ID, &response)?;
        debug!(
            "blockr returned {} txs for {} {}",
            body.data.txs.len(),
            crypto,
            address
        );

        let mut transactions: Vec<Transaction> = body
            .data
            .txs
            .into_iter()
            .filter(|tx| tx.confirmations >= min_confirmations)
            .map(|tx| Transaction {
                txid: tx.tx,
                amount: tx.amount,
                date: normalize::instant_from_rfc3339(&tx.time_utc),
                confirmations: Some(tx.confirmations),
            })
            .collect();
        Transaction::sort_most_recent_first(&mut transactions);
        Ok(transactions)
    }

    async fn push_tx(&self, crypto: &str, raw_tx: &str) -> Result<String, ProviderError> {
        self.check_asset(crypto)?;
        let url = format!("{}/tx/push", Self::base_url(crypto));

        let response = self.transport.post_form(&url, &[("tx", raw_tx)]).await?;
        let body: Envelope<serde_json::Value> = decode_json(PROVIDER_ID, &response)?;

        if body.status != "success" {
            return Err(ProviderError::BroadcastRejected {
                provider: PROVIDER_ID.to_string(),
                reason: body
                    .message
                    .unwrap_or_else(|| format!("status \"{}\"", body.status)),
            });
        }

        // On success `data` is the bare txid string.
        body.data
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::MalformedResponse {
                provider: PROVIDER_ID.to_string(),
                message: "push response data is not a txid".to_string(),
            })
    }
}
