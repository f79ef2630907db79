//! Default provider roster.
//!
//! One constructor wiring every served adapter to a shared transport.
//! The order is stable so callers can rely on it for deterministic
//! fan-out. Adapters outside the roster (Toshi) are still public and can
//! be constructed directly.

use std::sync::Arc;

use crate::transport::HttpTransport;

use super::abe::AbeExplorer;
use super::bit_easy::BitEasyProvider;
use super::bitstamp::BitstampProvider;
use super::block_cypher::BlockCypherProvider;
use super::block_strap::BlockStrapProvider;
use super::blockchain_info::BlockchainInfoProvider;
use super::blockr::BlockrProvider;
use super::btc_e::BtcEProvider;
use super::bter::BterProvider;
use super::chain_so::ChainSoProvider;
use super::coin_swap::CoinSwapProvider;
use super::coin_tape::CoinTapeProvider;
use super::cryptap::CryptapProvider;
use super::crypto_id::CryptoIdProvider;
use super::cryptonator::CryptonatorProvider;
use super::feathercoin::FeathercoinProvider;
use super::insight::InsightExplorer;
use super::nxt_portal::NxtPortalProvider;
use super::winkdex::WinkdexProvider;
use super::CoinDataProvider;

/// Instantiate every rostered provider against one shared transport.
pub fn all_providers(transport: Arc<dyn HttpTransport>) -> Vec<Arc<dyn CoinDataProvider>> {
    vec![
        Arc::new(BitstampProvider::new(transport.clone())),
        Arc::new(BlockCypherProvider::new(transport.clone())),
        Arc::new(BlockrProvider::new(transport.clone())),
        Arc::new(BtcEProvider::new(transport.clone())),
        Arc::new(CryptonatorProvider::new(transport.clone())),
        Arc::new(WinkdexProvider::new(transport.clone())),
        Arc::new(BitEasyProvider::new(transport.clone())),
        Arc::new(BlockchainInfoProvider::new(transport.clone())),
        Arc::new(AbeExplorer::bitcoin_abe(transport.clone())),
        Arc::new(AbeExplorer::litecoin_abe(transport.clone())),
        Arc::new(AbeExplorer::namecoin_abe(transport.clone())),
        Arc::new(AbeExplorer::dogechain_info(transport.clone())),
        Arc::new(AbeExplorer::auroracoin_eu(transport.clone())),
        Arc::new(AbeExplorer::atorox(transport.clone())),
        Arc::new(FeathercoinProvider::new(transport.clone())),
        Arc::new(NxtPortalProvider::new(transport.clone())),
        Arc::new(CryptoIdProvider::new(transport.clone())),
        Arc::new(CryptapProvider::new(transport.clone())),
        Arc::new(BterProvider::new(transport.clone())),
        Arc::new(CoinSwapProvider::new(transport.clone())),
        Arc::new(ChainSoProvider::new(transport.clone())),
        Arc::new(BlockStrapProvider::new(transport.clone())),
        Arc::new(InsightExplorer::bitpay(transport.clone())),
        Arc::new(InsightExplorer::this_is_vtc(transport.clone())),
        Arc::new(InsightExplorer::bird_on_wheels(transport.clone())),
        Arc::new(InsightExplorer::myr_cryptap(transport.clone())),
        Arc::new(InsightExplorer::reddcoin(transport.clone())),
        Arc::new(InsightExplorer::ftc_e(transport.clone())),
        Arc::new(CoinTapeProvider::new(transport)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureKind;
    use crate::models::AssetPair;
    use crate::transport::testing::MockTransport;
    use std::collections::HashSet;

    fn roster() -> Vec<Arc<dyn CoinDataProvider>> {
        all_providers(Arc::new(MockTransport::new()))
    }

    #[test]
    fn test_roster_size() {
        assert_eq!(roster().len(), 29);
    }

    #[test]
    fn test_ids_are_unique() {
        let providers = roster();
        let ids: HashSet<&str> = providers.iter().map(|p| p.id()).collect();
        assert_eq!(ids.len(), providers.len());
    }

    #[test]
    fn test_stable_order_endpoints() {
        let providers = roster();
        assert_eq!(providers.first().unwrap().id(), "bitstamp");
        assert_eq!(providers.last().unwrap().id(), "cointape");
        assert_eq!(providers[8].id(), "bitcoin-abe");
        assert_eq!(providers[22].id(), "bitpay-insight");
    }

    #[test]
    fn test_every_provider_declares_a_capability() {
        for provider in roster() {
            let caps = provider.capabilities();
            assert!(
                caps.supports_price
                    || caps.supports_balance
                    || caps.supports_transactions
                    || caps.supports_push_tx
                    || caps.supports_fee_estimate,
                "{} declares nothing",
                provider.id()
            );
        }
    }

    #[tokio::test]
    async fn test_capability_flags_match_served_operations() {
        // Against a routeless transport a served operation dies on the
        // wire or in-band, never with Unsupported; an undeclared one must
        // refuse outright.
        for provider in roster() {
            let caps = provider.capabilities();
            let crypto = caps.supported_cryptos.first().copied().unwrap_or("btc");
            let pair = AssetPair::new(crypto, "usd");

            let attempts = [
                (
                    caps.supports_price,
                    provider.get_current_price(&pair).await.err(),
                ),
                (
                    caps.supports_balance,
                    provider.get_balance(crypto, "a1", 1).await.err(),
                ),
                (
                    caps.supports_transactions,
                    provider.get_transactions(crypto, "a1", 1).await.err(),
                ),
                (caps.supports_push_tx, provider.push_tx(crypto, "00").await.err()),
                (
                    caps.supports_fee_estimate,
                    provider.get_optimal_fee(crypto, 250, 2).await.err(),
                ),
            ];

            for (served, outcome) in attempts {
                let error = outcome.expect("routeless transport cannot satisfy a call");
                if served {
                    assert_ne!(
                        error.kind(),
                        FailureKind::Unsupported,
                        "{} refuses an operation it declares",
                        provider.id()
                    );
                } else {
                    assert_eq!(
                        error.kind(),
                        FailureKind::Unsupported,
                        "{} serves an operation it does not declare",
                        provider.id()
                    );
                }
            }
        }
    }

    #[test]
    fn test_multi_deployment_families_expand() {
        let providers = roster();
        let aur: Vec<&str> = providers
            .iter()
            .filter(|p| p.capabilities().supports_crypto("aur") && p.capabilities().supports_balance)
            .map(|p| p.id())
            .collect();
        // Independent AuroraCoin explorers plus the CryptoID index.
        assert!(aur.contains(&"auroracoin.eu"));
        assert!(aur.contains(&"atorox"));
        assert!(aur.contains(&"cryptoid"));
    }
}
