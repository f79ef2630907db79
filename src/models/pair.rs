use std::fmt;

/// A crypto/fiat market pair.
///
/// Both symbols are case-insensitive identifiers; the constructor folds them
/// to lowercase so every provider sees one canonical form and `BTC/USD`
/// behaves exactly like `btc/usd`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AssetPair {
    crypto: String,
    fiat: String,
}

impl AssetPair {
    /// Build a pair from raw symbols, folding both to lowercase.
    pub fn new(crypto: &str, fiat: &str) -> Self {
        Self {
            crypto: crypto.to_ascii_lowercase(),
            fiat: fiat.to_ascii_lowercase(),
        }
    }

    /// The crypto symbol, lowercase (e.g. "btc").
    pub fn crypto(&self) -> &str {
        &self.crypto
    }

    /// The fiat symbol, lowercase (e.g. "usd").
    pub fn fiat(&self) -> &str {
        &self.fiat
    }
}

impl fmt::Display for AssetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.crypto, self.fiat)
    }
}
