//! Provider capability declarations.
//!
//! Every provider states up front which currencies it knows and which
//! operations it implements. Callers and the registry route on these
//! declarations instead of probing endpoints and interpreting failures.

/// Describes what a provider can do.
///
/// Capabilities are static facts about the upstream service, not runtime
/// state: a provider that is temporarily down still supports the same
/// operations.
#[derive(Clone, Debug)]
pub struct ProviderCapabilities {
    /// Lowercase currency codes this provider serves. Empty means the
    /// provider is not restricted to a fixed list (market aggregators
    /// that quote whatever pairs they carry).
    pub supported_cryptos: &'static [&'static str],

    /// Whether the provider can quote an exchange rate.
    pub supports_price: bool,

    /// Whether the provider can report an address balance.
    pub supports_balance: bool,

    /// Whether the provider can list transactions for an address.
    pub supports_transactions: bool,

    /// Whether the provider can broadcast a signed transaction.
    pub supports_push_tx: bool,

    /// Whether the provider can estimate transaction fees.
    pub supports_fee_estimate: bool,
}

impl ProviderCapabilities {
    /// Check whether a currency code is inside this provider's set.
    ///
    /// Codes compare case-insensitively; an empty set accepts everything.
    pub fn supports_crypto(&self, crypto: &str) -> bool {
        self.supported_cryptos.is_empty()
            || self
                .supported_cryptos
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(crypto))
    }
}
