//! BlockStrap multi-chain explorer.
//!
//! History entries report value moved per direction: a received
//! transaction carries `tx_address_input_value`, a spend carries
//! `tx_address_output_value`, and the signed amount is reconstructed
//! from whichever is set. API documentation: http://docs.blockstrap.com/en/api/

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::Transaction;
use crate::normalize;
use crate::provider::{
    broadcast_rejection, decode_json, CoinDataProvider, ProviderCapabilities,
};
use crate::transport::HttpTransport;

const BASE_URL: &str = "http://api.blockstrap.com/v0";
const PROVIDER_ID: &str = "blockstrap";

// ============================================================================
// API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct AddressData<T> {
    address: T,
}

#[derive(Debug, Deserialize)]
struct BalanceRecord {
    /// Confirmed received value in subunits
    inputs_value_confirmed: i64,
}

#[derive(Debug, Deserialize)]
struct HistoryRecord {
    transactions: Vec<StrapTx>,
}

#[derive(Debug, Deserialize)]
struct StrapTx {
    /// Transaction hash
    id: String,
    /// Subunits received by the address; 0 for spends
    #[serde(default)]
    tx_address_input_value: i64,
    /// Subunits spent by the address; 0 for receives
    #[serde(default)]
    tx_address_output_value: i64,
    /// Unix seconds
    block_time: i64,
    confirmations: u32,
}

impl StrapTx {
    fn signed_amount(&self) -> Decimal {
        if self.tx_address_input_value != 0 {
            normalize::from_subunit(self.tx_address_input_value, 8)
        } else {
            -normalize::from_subunit(self.tx_address_output_value, 8)
        }
    }
}

#[derive(Debug, Deserialize)]
struct RelayRecord {
    id: String,
}

pub struct BlockStrapProvider {
    transport: Arc<dyn HttpTransport>,
}

impl BlockStrapProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for BlockStrapProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supported_cryptos: &["btc", "ltc", "drk", "doge"],
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
            "{}/{}/address/id/{}",
            BASE_URL,
            crypto.to_ascii_lowercase(),
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        let body: Envelope<AddressData<BalanceRecord>> = decode_json(PROVIDER_ID, &response)?;
        Ok(normalize::from_subunit(
            body.data.address.inputs_value_confirmed,
            8,
        ))
    }

    async fn get_transactions(
        &self,
        crypto: &str,
        address: &str,
        min_confirmations: u32,
    ) -> Result<Vec<Transaction>, ProviderError> {
        self.check_asset(crypto)?;
        let url = format!(
            "{}/{}/address/transactions/{}",
            BASE_URL,
            crypto.to_ascii_lowercase(),
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        let body: Envelope<AddressData<HistoryRecord>> = decode_json(PROVIDER_ID, &response)?;

        let mut transactions: Vec<Transaction> = body
            .data
            .address
            .transactions
            .into_iter()
            .filter(|tx| tx.confirmations >= min_confirmations)
            .map(|tx| Transaction {
                amount: tx.signed_amount(),
                date: normalize::instant_from_unix(tx.block_time),
                confirmations: Some(tx.confirmations),
                txid: tx.id,
            })
            .collect();
        Transaction::sort_most_recent_first(&mut transactions);
        Ok(transactions)
    }

    async fn push_tx(&self, crypto: &str, raw_tx: &str) -> Result<String, ProviderError> {
        self.check_asset(crypto)?;
        let url = format!(
            "{}/{}/transaction/relay/{}",
            BASE_URL,
            crypto.to_ascii_lowercase(),
            urlencoding::encode(raw_tx)
        );

        let response = self
            .transport
            .get(&url)
            .await
            .map_err(|error| broadcast_rejection(PROVIDER_ID, error))?;
        let body: Envelope<RelayRecord> = decode_json(PROVIDER_ID, &response)?;
        Ok(body.data.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::MockTransport;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_balance_from_confirmed_inputs() {
        let transport = Arc::new(MockTransport::new().route(
            "http://api.blockstrap.com/v0/doge/address/id/DDogepartyxxxxxxxxxxxxxxxxxxw1dfzr",
            r#"{"data": {"address": {"id": "DDogepartyxxxxxxxxxxxxxxxxxxw1dfzr",
                "inputs_value_confirmed": 180932883969277, "tx_count": 4}}}"#,
        ));
        let provider = BlockStrapProvider::new(transport.clone());

        let balance = provider
            .get_balance("doge", "DDogepartyxxxxxxxxxxxxxxxxxxw1dfzr", 1)
            .await
            .unwrap();
        assert_eq!(balance, dec!(1809328.83969277));
    }

    #[tokio::test]
    async fn test_spend_direction_is_negative() {
        let transport = Arc::new(MockTransport::new().route(
            "http://api.blockstrap.com/v0/btc/address/transactions/1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
            r#"{"data": {"address": {"transactions": [
                {"id": "recv1", "tx_address_input_value": 150000000,
                 "tx_address_output_value": 0, "block_time": 1420000000, "confirmations": 9000},
                {"id": "spend1", "tx_address_input_value": 0,
                 "tx_address_output_value": 25000000, "block_time": 1433000000, "confirmations": 120}
            ]}}}"#,
        ));
        let provider = BlockStrapProvider::new(transport.clone());

        let transactions = provider
            .get_transactions("btc", "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", 1)
            .await
            .unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].txid, "spend1");
        assert_eq!(transactions[0].amount, dec!(-0.25));
        assert_eq!(transactions[1].amount, dec!(1.5));
    }

    #[tokio::test]
    async fn test_push_relay() {
        let transport = Arc::new(MockTransport::new().route(
            "http://api.blockstrap.com/v0/ltc/transaction/relay/01000000ab",
            r#"{"data": {"id": "4cc5eea1"}}"#,
        ));
        let provider = BlockStrapProvider::new(transport.clone());

        let txid = provider.push_tx("ltc", "01000000ab").await.unwrap();
        assert_eq!(txid, "4cc5eea1");
    }
}
