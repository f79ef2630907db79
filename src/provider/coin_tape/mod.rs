//! CoinTape fee estimates.
//!
//! Publishes a table of observed satoshi/byte rates against worst-case
//! confirmation delay, derived from recent mempool behaviour. The
//! estimate returned here is the cheapest rate that still confirms
//! within the caller's tolerance, scaled by transaction size.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{FeeSample, FeeSchedule};
use crate::provider::{decode_json, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

const FEES_URL: &str = "http://www.cointape.com/fees";
const PROVIDER_ID: &str = "cointape";

#[derive(Debug, Deserialize)]
struct FeesResponse {
    fees: Vec<FeeRate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeeRate {
    /// Worst-case confirmation delay at this rate, in blocks
    max_delay: u32,
    /// Satoshi per byte
    max_fee: Decimal,
}

pub struct CoinTapeProvider {
    transport: Arc<dyn HttpTransport>,
}

impl CoinTapeProvider {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CoinDataProvider for CoinTapeProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supported_cryptos: &["btc"],
            supports_price: false,
            supports_balance: false,
            supports_transactions: false,
            supports_push_tx: false,
            supports_fee_estimate: true,
        }
    }

    async fn get_optimal_fee(
        &self,
        crypto: &str,
        tx_bytes: u32,
        acceptable_block_delay: u32,
    ) -> Result<Decimal, ProviderError> {
        self.check_asset(crypto)?;

        let response = self.transport.get(FEES_URL).await?;
        let body: FeesResponse = decode_json(PROVIDER_ID, &response)?;

        let schedule = FeeSchedule::new(
            body.fees
                .into_iter()
                .map(|rate| FeeSample {
                    max_delay: rate.max_delay,
                    max_fee: rate.max_fee,
                })
                .collect(),
        );

        let sample = schedule
            .cheapest_within_delay(acceptable_block_delay)
            .ok_or_else(|| ProviderError::NoFeeData {
                provider: PROVIDER_ID.to_string(),
                acceptable_delay: acceptable_block_delay,
            })?;

        // The rate comes off the wire; refuse magnitudes the total cannot hold.
        sample
            .max_fee
            .checked_mul(Decimal::from(tx_bytes))
            .ok_or_else(|| ProviderError::MalformedResponse {
                provider: PROVIDER_ID.to_string(),
                message: format!("implausible fee rate {}", sample.max_fee),
            })
    }
}
