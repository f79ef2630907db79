/// Classification of a provider failure, as seen by the caller.
///
/// Every [`ProviderError`](super::ProviderError) variant maps onto exactly one
/// of these kinds via [`kind()`](super::ProviderError::kind). The consuming
/// orchestrator matches on the kind to decide what to do next; this layer
/// itself never retries or substitutes defaults.
///
/// # Behavior Summary
///
/// | Kind | Meaning | Sensible caller reaction |
/// |------|---------|--------------------------|
/// | `Unsupported` | provider structurally cannot serve this request | try a different provider |
/// | `NoData` | upstream answered but had nothing for this entity | caller decides if that is permanent |
/// | `Failed` | no usable response at all | give up on this call |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureKind {
    /// The provider can never answer this request: wrong fiat, asset outside
    /// its declared set, or a capability it does not implement. Raised before
    /// any network traffic whenever the inputs alone reveal it.
    Unsupported,

    /// The upstream API was reached and answered, but reported no data for
    /// the requested entity (empty result set, unknown pair, no matching fee
    /// sample). The entity may legitimately not exist, or the provider may
    /// simply be stale.
    NoData,

    /// The provider produced nothing usable: malformed or unexpected body,
    /// a rejected broadcast, or a transport failure passed through untouched.
    Failed,
}
