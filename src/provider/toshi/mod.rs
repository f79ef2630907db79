//! Toshi bitcoin node API.
//!
//! Toshi reports amounts as integer satoshis and keys transaction
//! history by output, so the per-address amount is assembled here by
//! summing the outputs that pay the queried address. History entries
//! carry no timestamp or confirmation count; those fields stay `None`.
//! API documentation: https://toshi.io/docs/

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::Transaction;
use crate::normalize;
use crate::provider::{
    broadcast_rejection, decode_json, CoinDataProvider, ProviderCapabilities,
};
use crate::transport::HttpTransport;

const BASE_URL: &str = "https://bitcoin.toshi.io/api/v0";
const PROVIDER_ID: &str = "toshi";

// ============================================================================
// API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct AddressResponse {
    /// Confirmed balance in satoshis
    balance: i64,
}

#[derive(Debug, Deserialize)]
struct TransactionsResponse {
    transactions: Vec<ToshiTx>,
    #[serde(default)]
    unconfirmed_transactions: Vec<ToshiTx>,
}

#[derive(Debug, Deserialize)]
struct ToshiTx {
    hash: String,
    outputs: Vec<ToshiOutput>,
}

#[derive(Debug, Deserialize)]
struct ToshiOutput {
    /// Satoshis
    amount: i64,
    /// Absent for non-standard scripts
    #[serde(default)]
    addresses: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PushResponse {
    hash: String,
}

pub struct ToshiProvider {
    transport: Arc<dyn HttpTransport>,
}

impl ToshiProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    fn received_amount(tx: &ToshiTx, address: &str) -> Result<Decimal, ProviderError> {
        // Satoshi amounts come off the wire; a total past i64 is garbage,
        // not a balance.
        let satoshis = tx
            .outputs
            .iter()
            .filter(|output| output.addresses.iter().any(|a| a == address))
            .try_fold(0i64, |total, output| total.checked_add(output.amount))
            .ok_or_else(|| ProviderError::MalformedResponse {
                provider: PROVIDER_ID.to_string(),
                message: format!("implausible output total in tx {}", tx.hash),
            })?;
        Ok(normalize::from_subunit(satoshis, 8))
    }
}

#[async_trait]
impl CoinDataProvider for ToshiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supported_cryptos: &["btc"],
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
        let url = format!("{}/addresses/{}", BASE_URL, urlencoding::encode(address));

        let response = self.transport.get(&url).await?;
        let body: AddressResponse = decode_json(PROVIDER_ID, &response)?;
        Ok(normalize::from_subunit(body.balance, 8))
    }

    async fn get_transactions(
        &self,
        crypto: &str,
        address: &str,
        min_confirmations: u32,
    ) -> Result<Vec<Transaction>, ProviderError> {
        self.check_asset(crypto)?;
        let url = format!(
            "{}/addresses/{}/transactions",
            BASE_URL,
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        let body: TransactionsResponse = decode_json(PROVIDER_ID, &response)?;

        let mut entries = body.transactions;
        // Mempool entries only count when the caller accepts zero
        // confirmations.
        if min_confirmations == 0 {
            debug!(
                "including {} unconfirmed toshi txs",
                body.unconfirmed_transactions.len()
            );
            entries.extend(body.unconfirmed_transactions);
        }

        let mut transactions = entries
            .into_iter()
            .map(|tx| {
                Ok(Transaction {
                    amount: Self::received_amount(&tx, address)?,
                    txid: tx.hash,
                    date: None,
                    confirmations: None,
                })
            })
            .collect::<Result<Vec<Transaction>, ProviderError>>()?;
        Transaction::sort_most_recent_first(&mut transactions);
        Ok(transactions)
    }

    async fn push_tx(&self, crypto: &str, raw_tx: &str) -> Result<String, ProviderError> {
        self.check_asset(crypto)?;
        let url = format!("{}/transactions/{}", BASE_URL, urlencoding::encode(raw_tx));

        // Relay is a GET of the raw hex; a refused transaction answers 4xx.
        let response = self
            .transport
            .get(&url)
            .await
            .map_err(|error| broadcast_rejection(PROVIDER_ID, error))?;
        let body: PushResponse = decode_json(PROVIDER_ID, &response)?;
        Ok(body.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;
    use crate::transport::testing::MockTransport;
    use rust_decimal_macros::dec;

    const ADDRESS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

    fn transactions_body() -> String {
        format!(
            r#"{{"transactions": [
                {{"hash": "conf1", "outputs": [
                    {{"amount": 5000000000, "addresses": ["{addr}"]}},
                    {{"amount": 123400000, "addresses": ["1SomeoneElse"]}}
                ]}},
                {{"hash": "conf2", "outputs": [
                    {{"amount": 25000000, "addresses": ["{addr}"]}},
                    {{"amount": 75000000, "addresses": ["{addr}"]}}
                ]}}
            ],
            "unconfirmed_transactions": [
                {{"hash": "pending", "outputs": [
                    {{"amount": 990000, "addresses": ["{addr}"]}}
                ]}}
            ]}}"#,
            addr = ADDRESS
        )
    }

    #[tokio::test]
    async fn test_balance_scaled_from_satoshis() {
        let transport = Arc::new(MockTransport::new().route(
            format!("https://bitcoin.toshi.io/api/v0/addresses/{}", ADDRESS),
            r#"{"balance": 6342912, "received": 7546580233, "sent": 7540237321}"#,
        ));
        let provider = ToshiProvider::new(transport.clone());

        let balance = provider.get_balance("btc", ADDRESS, 1).await.unwrap();
        assert_eq!(balance, dec!(0.06342912));
    }

    #[tokio::test]
    async fn test_amounts_sum_only_matching_outputs() {
        let transport = Arc::new(MockTransport::new().route(
            format!(
                "https://bitcoin.toshi.io/api/v0/addresses/{}/transactions",
                ADDRESS
            ),
            transactions_body(),
        ));
        let provider = ToshiProvider::new(transport.clone());

        let transactions = provider.get_transactions("btc", ADDRESS, 1).await.unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].txid, "conf1");
        assert_eq!(transactions[0].amount, dec!(50));
        assert_eq!(transactions[1].amount, dec!(1));
        assert_eq!(transactions[0].date, None);
        assert_eq!(transactions[0].confirmations, None);
    }

    #[tokio::test]
    async fn test_zero_min_confirmations_includes_mempool() {
        let transport = Arc::new(MockTransport::new().route(
            format!(
                "https://bitcoin.toshi.io/api/v0/addresses/{}/transactions",
                ADDRESS
            ),
            transactions_body(),
        ));
        let provider = ToshiProvider::new(transport.clone());

        let transactions = provider.get_transactions("btc", ADDRESS, 0).await.unwrap();
        assert_eq!(transactions.len(), 3);
        assert!(transactions.iter().any(|tx| tx.txid == "pending"));
    }

    #[tokio::test]
    async fn test_absurd_output_total_is_malformed() {
        let transport = Arc::new(MockTransport::new().route(
            format!(
                "https://bitcoin.toshi.io/api/v0/addresses/{}/transactions",
                ADDRESS
            ),
            format!(
                r#"{{"transactions": [
                    {{"hash": "huge", "outputs": [
                        {{"amount": 9223372036854775807, "addresses": ["{addr}"]}},
                        {{"amount": 9223372036854775807, "addresses": ["{addr}"]}}
                    ]}}
                ]}}"#,
                addr = ADDRESS
            ),
        ));
        let provider = ToshiProvider::new(transport.clone());

        let error = provider.get_transactions("btc", ADDRESS, 1).await.unwrap_err();
        assert!(matches!(error, ProviderError::MalformedResponse { .. }));
        assert_eq!(error.kind(), FailureKind::Failed);
    }

    #[tokio::test]
    async fn test_push_relays_hex_and_returns_hash() {
        let transport = Arc::new(MockTransport::new().route(
            "https://bitcoin.toshi.io/api/v0/transactions/01000000ab",
            r#"{"hash": "9f00aa"}"#,
        ));
        let provider = ToshiProvider::new(transport.clone());

        let txid = provider.push_tx("btc", "01000000ab").await.unwrap();
        assert_eq!(txid, "9f00aa");
    }

    #[tokio::test]
    async fn test_push_refused_with_client_error() {
        // No route: the mock answers 404, which lands in the 4xx band.
        let transport = Arc::new(MockTransport::new());
        let provider = ToshiProvider::new(transport.clone());

        let error = provider.push_tx("btc", "00").await.unwrap_err();
        assert_eq!(error.kind(), FailureKind::Failed);
        assert!(matches!(error, ProviderError::BroadcastRejected { .. }));
    }
}
