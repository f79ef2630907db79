//! Abe explorer deployments.
//!
//! Abe is open-source block explorer software that many small chains ran
//! an instance of. All instances share one wire format - the balance
//! endpoint answers with a bare decimal number in whole units - so one
//! adapter covers the whole family and each deployment is a static
//! [`AbeHost`] record. Two independent AuroraCoin instances are listed;
//! the registry carries both so one going away does not lose the chain.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::ProviderError;
use crate::provider::{decode_decimal_text, CoinDataProvider, ProviderCapabilities};
use crate::transport::HttpTransport;

/// One deployment of the Abe explorer software.
#[derive(Clone, Copy, Debug)]
pub struct AbeHost {
    id: &'static str,
    base_url: &'static str,
    cryptos: &'static [&'static str],
}

impl AbeHost {
    /// Describe a deployment by its id, chain base URL, and the
    /// currencies it indexes.
    pub const fn new(
        id: &'static str,
        base_url: &'static str,
        cryptos: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            base_url,
            cryptos,
        }
    }
}

const BITCOIN_ABE: AbeHost =
    AbeHost::new("bitcoin-abe", "http://bitcoin-abe.info/chain/Bitcoin", &["btc"]);
const LITECOIN_ABE: AbeHost =
    AbeHost::new("litecoin-abe", "http://bitcoin-abe.info/chain/Litecoin", &["ltc"]);
const NAMECOIN_ABE: AbeHost =
    AbeHost::new("namecoin-abe", "http://bitcoin-abe.info/chain/Namecoin", &["nmc"]);
const DOGECHAIN_INFO: AbeHost =
    AbeHost::new("dogechain.info", "https://dogechain.info/chain/Dogecoin", &["doge"]);
const AURORACOIN_EU: AbeHost = AbeHost::new(
    "auroracoin.eu",
    "http://blockexplorer.auroracoin.eu/chain/AuroraCoin",
    &["aur"],
);
const ATOROX: AbeHost = AbeHost::new(
    "atorox",
    "http://auroraexplorer.atorox.net/chain/AuroraCoin",
    &["aur"],
);

/// Balance lookups against one Abe deployment.
pub struct AbeExplorer {
    host: AbeHost,
    transport: Arc<dyn HttpTransport>,
}

impl AbeExplorer {
    pub fn new(host: AbeHost, transport: Arc<dyn HttpTransport>) -> Self {
        Self { host, transport }
    }

    pub fn bitcoin_abe(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(BITCOIN_ABE, transport)
    }

    pub fn litecoin_abe(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(LITECOIN_ABE, transport)
    }

    pub fn namecoin_abe(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(NAMECOIN_ABE, transport)
    }

    pub fn dogechain_info(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(DOGECHAIN_INFO, transport)
    }

    pub fn auroracoin_eu(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(AURORACOIN_EU, transport)
    }

    pub fn atorox(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(ATOROX, transport)
    }
}

#[async_trait]
impl CoinDataProvider for AbeExplorer {
    fn id(&self) -> &'static str {
        self.host.id
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            supported_cryptos: self.host.cryptos,
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
            "{}/q/addressbalance/{}",
            self.host.base_url,
            urlencoding::encode(address)
        );

        let response = self.transport.get(&url).await?;
        decode_decimal_text(self.host.id, response.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;
    use crate::transport::testing::MockTransport;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_plain_text_balance() {
        let transport = Arc::new(MockTransport::new().route(
            "https://dogechain.info/chain/Dogecoin/q/addressbalance/DDogepartyxxxxxxxxxxxxxxxxxxw1dfzr",
            "1809328.83969277\n",
        ));
        let provider = AbeExplorer::dogechain_info(transport.clone());

        let balance = provider
            .get_balance("doge", "DDogepartyxxxxxxxxxxxxxxxxxxw1dfzr", 1)
            .await
            .unwrap();
        assert_eq!(balance, dec!(1809328.83969277));
        assert_eq!(provider.id(), "dogechain.info");
    }

    #[tokio::test]
    async fn test_error_text_is_malformed() {
        let transport = Arc::new(MockTransport::new().route(
            "http://bitcoin-abe.info/chain/Bitcoin/q/addressbalance/bogus",
            "ERROR: address invalid",
        ));
        let provider = AbeExplorer::bitcoin_abe(transport.clone());

        let error = provider.get_balance("btc", "bogus", 1).await.unwrap_err();
        assert!(matches!(error, ProviderError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_each_deployment_keeps_its_own_chain() {
        let transport = Arc::new(MockTransport::new());

        let litecoin = AbeExplorer::litecoin_abe(transport.clone());
        assert_eq!(litecoin.id(), "litecoin-abe");
        assert!(litecoin.capabilities().supports_crypto("ltc"));
        assert!(!litecoin.capabilities().supports_crypto("btc"));

        let error = litecoin.get_balance("btc", "1Abc", 1).await.unwrap_err();
        assert_eq!(error.kind(), FailureKind::Unsupported);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_both_auroracoin_deployments() {
        let transport = Arc::new(MockTransport::new());
        assert_eq!(AbeExplorer::auroracoin_eu(transport.clone()).id(), "auroracoin.eu");
        assert_eq!(AbeExplorer::atorox(transport.clone()).id(), "atorox");
        assert!(AbeExplorer::atorox(transport)
            .capabilities()
            .supports_crypto("aur"));
    }
}
