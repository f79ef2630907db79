//! NxtPortal explorer for the NXT chain.
//!
//! NXT accounts are numeric and balances are quoted in NQT, the chain's
//! 1e-8 subunit, serialized as a decimal string.
//! API documentation: http://nxtportal.org/

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::Transaction;
use crate::normalize;
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const BASE_URL: &str = "http://nxtportal.org";
const PROVIDER_ID: &str = "nxtportal";

#[derive(Debug, Deserialize)]
struct AccountResponse {
    /// Balance in NQT, as a decimal string
    #[serde(rename = "balanceNQT")]
    balance_nqt: String,
}

#[derive(Debug, Deserialize)]
struct PortalTx {
    txid: String,
    /// Whole-unit amount
    value: Decimal,
    confirmations: u32,
    /// Unix seconds
    time: i64,
}

pub struct NxtPortalProvider {
    transport: Arc<dyn HttpTransport>,
}

impl NxtPortalProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for NxtPortalProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supported_cryptos: &["nxt"],
            supports_price: false,
            supports_balance: true,
            supports_transactions: true,
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
            "{}/nxt?requestType=getAccount&account={}",
            BASE_URL,
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        let body: AccountResponse = decode_json(PROVIDER_ID, &response)?;
        let nqt = body
            .balance_nqt
            .parse::<i64>()
            .map_err(|error| ProviderError::MalformedResponse {
                provider: PROVIDER_ID.to_string(),
                message: format!("bad balanceNQT: {}", error),
            })?;
        Ok(normalize::from_subunit(nqt, 8))
    }

    async fn get_transactions(
        &self,
        crypto: &str,
        address: &str,
        min_confirmations: u32,
    ) -> Result<Vec<Transaction>, ProviderError> {
        self.check_asset(crypto)?;
        let url = format!(
            "{}/transactions/account/{}?num=50",
            BASE_URL,
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        let entries: Vec<PortalTx> = decode_json(PROVIDER_ID, &response)?;

        let mut transactions: Vec<Transaction> = entries
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
}
