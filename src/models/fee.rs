use rust_decimal::Decimal;

/// One row of a provider's fee-rate table.
///
/// Reads as: paying up to `max_fee` per byte gets the transaction confirmed
/// within `max_delay` blocks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeeSample {
    /// Upper bound on confirmation delay, in blocks.
    pub max_delay: u32,

    /// Fee rate per byte, in the asset's subunit (e.g. satoshi/byte).
    pub max_fee: Decimal,
}

/// A provider's fee-rate table, keyed by acceptable confirmation delay.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeeSchedule {
    samples: Vec<FeeSample>,
}

impl FeeSchedule {
    pub fn new(samples: Vec<FeeSample>) -> Self {
        Self { samples }
    }

    /// Pick the cheapest rate that still confirms fast enough.
    ///
    /// Returns the lowest-rate sample whose `max_delay` is within the
    /// caller's `acceptable_block_delay`, or `None` when no sample
    /// qualifies. When two qualifying samples carry the same rate, the one
    /// listed earlier by the upstream wins.
    pub fn cheapest_within_delay(&self, acceptable_block_delay: u32) -> Option<&FeeSample> {
        let mut best: Option<&FeeSample> = None;
        for sample in &self.samples {
            if sample.max_delay > acceptable_block_delay {
                continue;
            }
            match best {
                Some(found) if found.max_fee <= sample.max_fee => {}
                _ => best = Some(sample),
            }
        }
        best
    }
}
