/// Classification of a proposed exchange, from the evaluating side's
/// perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    /// The evaluating side receives more value than it gives
    Win,
    /// The evaluating side gives more value than it receives
    Loss,
    /// The discrepancy is within the fairness tolerance
    Fair,
}

impl std::fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeOutcome::Win => write!(f, "win"),
            TradeOutcome::Loss => write!(f, "loss"),
            TradeOutcome::Fair => write!(f, "fair"),
        }
    }
}

/// Result of evaluating two baskets against the ledger's current values.
/// Derived purely from its inputs; never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct FairnessVerdict {
    /// Total value of the evaluating side's basket
    pub your_total: f64,

    /// Total value of the other side's basket
    pub their_total: f64,

    /// `their_total - your_total` — positive means you receive more than
    /// you give
    pub difference: f64,

    /// Difference relative to `your_total` × 100; `0` when `your_total`
    /// is zero
    pub percent_difference: f64,

    /// Classification against the caller-supplied tolerance
    pub outcome: TradeOutcome,
}
