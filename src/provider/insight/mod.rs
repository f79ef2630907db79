//! Insight explorer deployments.
//!
//! Insight is Bitpay's open-source explorer, and several altcoin
//! communities ran their own instances. One adapter speaks the shared
//! API; each deployment is a static [`InsightHost`] record. The balance
//! endpoint answers plain-text satoshis, while history amounts are
//! assembled from the outputs paying the queried address.
//! API documentation: http://insight.bitpay.com/

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::Transaction;
use crate::normalize;
use crate::provider::{
    decode_i64_text, decode_json, CoinDataProvider, ProviderCapabilities,
};
use crate::transport::HttpTransport;

/// One deployment of the Insight explorer software.
#[derive(Clone, Copy, Debug)]
pub struct InsightHost {
    id: &'static str,
    domain: &'static str,
    cryptos: &'static [&'static str],
}

impl InsightHost {
    /// Describe a deployment by its id, scheme-qualified domain (no
    /// trailing slash), and the currencies it indexes.
    pub const fn new(
        id: &'static str,
        domain: &'static str,
        cryptos: &'static [&'static str],
    ) -> Self {
        Self { id, domain, cryptos }
    }
}

const BITPAY: InsightHost =
    InsightHost::new("bitpay-insight", "http://insight.bitpay.com", &["btc"]);
const THIS_IS_VTC: InsightHost =
    InsightHost::new("thisisvtc", "http://explorer.thisisvtc.com", &["vtc"]);
const BIRD_ON_WHEELS: InsightHost =
    InsightHost::new("bird-on-wheels", "http://birdonwheels5.no-ip.org:3000", &["myr"]);
const MYR_CRYPTAP: InsightHost =
    InsightHost::new("myr-cryptap", "http://insight-myr.cryptap.us", &["myr"]);
const REDDCOIN: InsightHost =
    InsightHost::new("reddcoin.com", "http://live.reddcoin.com", &["rdd"]);
const FTC_E: InsightHost = InsightHost::new("ftc-e", "http://block.ftc-c.com", &["ftc"]);

// ============================================================================
// API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct TxsResponse {
    txs: Vec<InsightTx>,
}

#[derive(Debug, Deserialize)]
struct InsightTx {
    txid: String,
    /// Absent while the tx sits in the mempool
    #[serde(default)]
    time: Option<i64>,
    /// Absent on some deployments while the tx sits in the mempool
    #[serde(default)]
    confirmations: Option<u32>,
    vout: Vec<InsightVout>,
}

#[derive(Debug, Deserialize)]
struct InsightVout {
    /// Whole-unit decimal string
    value: Decimal,
    #[serde(rename = "scriptPubKey")]
    script_pub_key: ScriptPubKey,
}

#[derive(Debug, Deserialize)]
struct ScriptPubKey {
    /// Empty for non-standard scripts
    #[serde(default)]
    addresses: Vec<String>,
}

/// Balance and history lookups against one Insight deployment.
pub struct InsightExplorer {
    host: InsightHost,
    transport: Arc<dyn HttpTransport>,
}

impl InsightExplorer {
    pub fn new(host: InsightHost, transport: Arc<dyn HttpTransport>) -> Self {
        Self { host, transport }
    }

    pub fn bitpay(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(BITPAY, transport)
    }

    pub fn this_is_vtc(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(THIS_IS_VTC, transport)
    }

    pub fn bird_on_wheels(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(BIRD_ON_WHEELS, transport)
    }

    pub fn myr_cryptap(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(MYR_CRYPTAP, transport)
    }

    pub fn reddcoin(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(REDDCOIN, transport)
    }

    pub fn ftc_e(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(FTC_E, transport)
    }

    fn received_amount(&self, tx: &InsightTx, address: &str) -> Result<Decimal, ProviderError> {
        tx.vout
            .iter()
            .filter(|vout| vout.script_pub_key.addresses.iter().any(|a| a == address))
            .try_fold(Decimal::ZERO, |total, vout| total.checked_add(vout.value))
            .ok_or_else(|| ProviderError::MalformedResponse {
                provider: self.host.id.to_string(),
                message: format!("implausible output total in tx {}", tx.txid),
            })
    }
}

#[async_trait]
impl CoinDataProvider for InsightExplorer {
    fn id(&self) -> &'static str {
        self.host.id
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supported_cryptos: self.host.cryptos,
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
            "{}/api/addr/{}/balance",
            self.host.domain,
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        let satoshis = decode_i64_text(self.host.id, response.text())?;
        Ok(normalize::from_subunit(satoshis, 8))
    }

    async fn get_transactions(
        &self,
        crypto: &str,
        address: &str,
        min_confirmations: u32,
    ) -> Result<Vec<Transaction>, ProviderError> {
        self.check_asset(crypto)?;
        let url = format!(
            "{}/api/txs/?address={}",
            self.host.domain,
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        let body: TxsResponse = decode_json(self.host.id, &response)?;
        debug!("{} returned {} txs for {}", self.host.id, body.txs.len(), address);

        // A tx without a count is unconfirmed as far as anyone knows; it
        // only passes when the caller accepts zero confirmations.
        let mut transactions = body
            .txs
            .into_iter()
            .filter(|tx| {
                tx.confirmations
                    .map_or(min_confirmations == 0, |count| count >= min_confirmations)
            })
            .map(|tx| {
                Ok(Transaction {
                    amount: self.received_amount(&tx, address)?,
                    date: tx.time.and_then(normalize::instant_from_unix),
                    confirmations: tx.confirmations,
                    txid: tx.txid,
                })
            })
            .collect::<Result<Vec<Transaction>, ProviderError>>()?;
        Transaction::sort_most_recent_first(&mut transactions);
        Ok(transactions)
    }
}
