use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A spot price: how much fiat one whole unit of the crypto asset costs.
///
/// `source` names where the quote came from. For a direct market lookup it is
/// the provider's id (e.g. `"bitstamp"`); a provider that had to compose the
/// price from two lookups labels it distinctly (e.g. `"bter (calculated)"`)
/// so callers can tell a synthetic cross-rate from a real quote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Fiat per one whole unit of the crypto asset. Never zero or negative;
    /// a provider that cannot compute a value fails instead.
    pub value: Decimal,

    /// Label identifying the quote's origin.
    pub source: String,
}

impl Price {
    /// Create a price with the given source label.
    pub fn new(value: Decimal, source: impl Into<String>) -> Self {
        Self {
            value,
            source: source.into(),
        }
    }
}
