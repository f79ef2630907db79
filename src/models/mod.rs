//! Normalized data model
//!
//! Every value here is freshly constructed per call from an upstream HTTP
//! response; nothing is cached or shared between calls. The types:
//! - `pair` - case-folded crypto/fiat market pair (AssetPair)
//! - `price` - spot price with its source label (Price)
//! - `transaction` - per-address transaction history entry (Transaction)
//! - `fee` - fee-rate table and selection (FeeSample, FeeSchedule)

mod fee;
mod pair;
mod price;
mod transaction;

pub use fee::{FeeSample, FeeSchedule};
pub use pair::AssetPair;
pub use price::Price;
pub use transaction::Transaction;
