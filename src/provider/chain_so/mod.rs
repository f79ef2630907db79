//! Chain.so multi-chain explorer.
//!
//! One upstream for doge, btc and ltc covering four capabilities: market
//! price, address balance, received transactions, and broadcast. Every
//! response is wrapped in a `{status, data}` envelope; broadcasts carry
//! their verdict in-band, so a rejected transaction still answers 200.
//! API documentation: https://chain.so/api

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{AssetPair, Price, Transaction};
use crate::normalize;
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const BASE_URL: &str = "https://chain.so/api/v2";
const PROVIDER_ID: &str = "chain.so";

// ============================================================================
// API Response Structures
// ============================================================================

/// Envelope every endpoint wraps its payload in
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    data: T,
}

#[derive(Debug, Deserialize)]
struct PriceData {
    /// One quote per exchange the upstream aggregates; may be empty
    prices: Vec<ExchangeQuote>,
}

#[derive(Debug, Deserialize)]
struct ExchangeQuote {
    /// Quoted as a decimal string
    price: Decimal,
    exchange: String,
}

#[derive(Debug, Deserialize)]
struct BalanceData {
    /// Whole-unit decimal string
    confirmed_balance: Decimal,
}

#[derive(Debug, Deserialize)]
struct ReceivedData {
    txs: Vec<ReceivedTx>,
}

#[derive(Debug, Deserialize)]
struct ReceivedTx {
    txid: String,
    /// Whole-unit decimal string
    value: Decimal,
    confirmations: u32,
    /// Unix seconds
    time: i64,
}

/// Broadcast payload: a txid on success, the upstream's explanation
/// otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PushVerdict {
    Accepted { txid: String },
    Rejected(serde_json::Value),
}

pub struct ChainSoProvider {
    transport: Arc<dyn HttpTransport>,
}

impl ChainSoProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for ChainSoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supported_cryptos: &["doge", "btc", "ltc"],
            supports_price: true,
            supports_balance: true,
            supports_transactions: true,
            supports_push_tx: true,
            supports_fee_estimate: false,
        }
    }

    async fn get_current_price(&self, pair: &AssetPair) -> Result<Price, ProviderError> {
        self.check_asset(pair.crypto())?;
        let url = format!("{}/get_price/{}/{}", BASE_URL, pair.crypto(), pair.fiat());

        let response = self.transport.get(&url).await?;
        let body: Envelope<PriceData> = decode_json(PROVIDER_ID, &response)?;

        // The price list aggregates whatever exchanges carry the pair;
        // an unknown fiat is an empty list, not an error status.
        let quote = body
            .data
            .prices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NoData {
                provider: PROVIDER_ID.to_string(),
                message: format!("no price quotes for {}", pair),
            })?;

        let value = normalize::positive_price(PROVIDER_ID, quote.price)?;
        Ok(Price::new(value, format!("{} via chain.so", quote.exchange)))
    }

    async fn get_balance(
        &self,
        crypto: &str,
        address: &str,
        min_confirmations: u32,
    ) -> Result<Decimal, ProviderError> {
        self.check_asset(crypto)?;
        let url = format!(
            "{}/get_address_balance/{}/{}/{}",
            BASE_URL,
            crypto.to_ascii_lowercase(),
            urlencoding::encode(address),
            min_confirmations
        );

        let response = self.transport.get(&url).await?;
        let body: Envelope<BalanceData> = decode_json(PROVIDER_ID, &response)?;
        Ok(body.data.confirmed_balance)
    }

    async fn get_transactions(
        &self,
        crypto: &str,
        address: &str,
        min_confirmations: u32,
    ) -> Result<Vec<Transaction>, ProviderError> {
        self.check_asset(crypto)?;
        let url = format!(
            "{}/get_tx_received/{}/{}",
            BASE_URL,
            crypto.to_ascii_lowercase(),
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        let body: Envelope<ReceivedData> = decode_json(PROVIDER_ID, &response)?;
        debug!(
            "chain.so returned {} received txs for {}",
            body.data.txs.len(),
            address
        );

        // Upstream lists oldest first.
        let mut transactions: Vec<Transaction> = body
            .data
            .txs
            .into_iter()
            .filter(|tx| tx.confirmations >= min_confirmations)
            .map(|tx| Transaction {
                txid: tx.txid,
                amount: tx.value,
                date: normalize::instant_from_unix(tx.time),
                confirmations: Some(tx.confirmations),
            })
            .collect();
        Transaction::sort_most_recent_first(&mut transactions);
        Ok(transactions)
    }

    async fn push_tx(&self, crypto: &str, raw_tx: &str) -> Result<String, ProviderError> {
        self.check_asset(crypto)?;
        let url = format!("{}/send_tx/{}", BASE_URL, crypto.to_ascii_lowercase());

        let response = self.transport.post_form(&url, &[("tx_hex", raw_tx)]).await?;
        let body: Envelope<PushVerdict> = decode_json(PROVIDER_ID, &response)?;

        if body.status != "success" {
            let reason = match body.data {
                PushVerdict::Rejected(detail) => detail.to_string(),
                PushVerdict::Accepted { .. } => format!("status \"{}\"", body.status),
            };
            return Err(ProviderError::BroadcastRejected {
                provider: PROVIDER_ID.to_string(),
                reason,
            });
        }

        match body.data {
            PushVerdict::Accepted { txid } => Ok(txid),
            PushVerdict::Rejected(_) => Err(ProviderError::MalformedResponse {
                provider: PROVIDER_ID.to_string(),
                message: "accepted broadcast without a txid".to_string(),
            }),
        }
    }
}
