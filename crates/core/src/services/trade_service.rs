use crate::errors::CoreError;
use crate::models::basket::{BasketEntry, TradeBasket};
use crate::models::ledger::Ledger;
use crate::models::verdict::{FairnessVerdict, TradeOutcome};

/// Builds trade baskets and evaluates exchange fairness against the
/// ledger's current values.
///
/// Read-only consumer of the ledger — never mutates it.
pub struct TradeService;

impl TradeService {
    pub fn new() -> Self {
        Self
    }

    /// Append an entry to a basket.
    ///
    /// The item must exist in the ledger at add time and the quantity must
    /// be at least 1. Entries are never deduplicated: adding the same item
    /// twice keeps two rows that count additively.
    pub fn add_entry(
        &self,
        ledger: &Ledger,
        basket: &mut TradeBasket,
        item_name: &str,
        quantity: u32,
    ) -> Result<(), CoreError> {
        if !ledger.contains(item_name) {
            return Err(CoreError::UnknownItem(item_name.to_string()));
        }
        if quantity == 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }
        basket.entries.push(BasketEntry {
            item_name: item_name.to_string(),
            quantity,
        });
        Ok(())
    }

    /// Remove and return the basket entry at `index`.
    pub fn remove_entry_at(
        &self,
        basket: &mut TradeBasket,
        index: usize,
    ) -> Result<BasketEntry, CoreError> {
        let len = basket.entries.len();
        if index >= len {
            return Err(CoreError::OutOfRange { index, len });
        }
        Ok(basket.entries.remove(index))
    }

    /// Total basket value: Σ current value × quantity.
    ///
    /// An entry whose item has since been deleted from the ledger
    /// contributes zero — baskets built before an admin deletion stay
    /// usable rather than erroring.
    #[must_use]
    pub fn total(&self, ledger: &Ledger, basket: &TradeBasket) -> f64 {
        basket
            .entries
            .iter()
            .map(|entry| {
                ledger
                    .get(&entry.item_name)
                    .map_or(0.0, |item| item.current_value() * f64::from(entry.quantity))
            })
            .sum()
    }

    /// Evaluate a proposed exchange from the perspective of `yours`.
    ///
    /// `tolerance_percent` is caller-supplied and may be any real number;
    /// the tolerance check dominates the sign of the difference, so a
    /// discrepancy within tolerance is `Fair` regardless of direction.
    #[must_use]
    pub fn evaluate(
        &self,
        ledger: &Ledger,
        yours: &TradeBasket,
        theirs: &TradeBasket,
        tolerance_percent: f64,
    ) -> FairnessVerdict {
        let your_total = self.total(ledger, yours);
        let their_total = self.total(ledger, theirs);
        let difference = their_total - your_total;
        let percent_difference = if your_total > 0.0 {
            difference / your_total * 100.0
        } else {
            0.0
        };

        let outcome = if percent_difference.abs() <= tolerance_percent {
            TradeOutcome::Fair
        } else if difference > 0.0 {
            TradeOutcome::Win
        } else {
            TradeOutcome::Loss
        };

        FairnessVerdict {
            your_total,
            their_total,
            difference,
            percent_difference,
            outcome,
        }
    }
}

impl Default for TradeService {
    fn default() -> Self {
        Self::new()
    }
}
