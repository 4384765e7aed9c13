use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::history::{ValueEntry, ValueHistory};
use crate::models::item::{Item, Rarity};
use crate::models::ledger::Ledger;

/// The administrative surface: creates, deletes and updates ledger items.
///
/// Pure business logic — no I/O, no clock. Every date-stamped operation
/// takes the date explicitly; the facade passes "today". Each operation
/// validates its inputs first and mutates nothing on failure.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Create a new item whose history has exactly one entry at `date`
    /// with `initial_value`.
    pub fn create_item(
        &self,
        ledger: &mut Ledger,
        name: impl Into<String>,
        rarity: Rarity,
        initial_value: f64,
        icon: Option<String>,
        date: NaiveDate,
    ) -> Result<(), CoreError> {
        validate_value(initial_value)?;
        ledger.insert(Item {
            name: name.into(),
            rarity,
            icon,
            history: ValueHistory::new(ValueEntry {
                date,
                value: initial_value,
            }),
        })
    }

    /// Remove an item entirely. Baskets still referencing it become stale
    /// and contribute zero to totals.
    pub fn delete_item(&self, ledger: &mut Ledger, name: &str) -> Result<Item, CoreError> {
        ledger.remove(name)
    }

    /// Set an item's current value by appending a history entry at `date`.
    ///
    /// The current value is derived from the history's last entry, so this
    /// is the only way to change it — there is no stored field to drift
    /// out of sync.
    pub fn set_current_value(
        &self,
        ledger: &mut Ledger,
        name: &str,
        value: f64,
        date: NaiveDate,
    ) -> Result<(), CoreError> {
        self.append_value(ledger, name, date, value)
    }

    /// Re-tier an item. No history implication.
    pub fn set_rarity(
        &self,
        ledger: &mut Ledger,
        name: &str,
        rarity: Rarity,
    ) -> Result<(), CoreError> {
        let item = ledger
            .get_mut(name)
            .ok_or_else(|| CoreError::UnknownItem(name.to_string()))?;
        item.rarity = rarity;
        Ok(())
    }

    /// Replace an item's display icon. No history implication.
    pub fn set_icon(
        &self,
        ledger: &mut Ledger,
        name: &str,
        icon: Option<String>,
    ) -> Result<(), CoreError> {
        let item = ledger
            .get_mut(name)
            .ok_or_else(|| CoreError::UnknownItem(name.to_string()))?;
        item.icon = icon;
        Ok(())
    }

    /// Append an observation to an item's history at its sorted position.
    /// Entries sharing `date` keep insertion order; the new entry lands
    /// after them and becomes the current value if `date` is the latest.
    pub fn append_value(
        &self,
        ledger: &mut Ledger,
        name: &str,
        date: NaiveDate,
        value: f64,
    ) -> Result<(), CoreError> {
        validate_value(value)?;
        let item = ledger
            .get_mut(name)
            .ok_or_else(|| CoreError::UnknownItem(name.to_string()))?;
        item.history.insert(ValueEntry { date, value });
        Ok(())
    }

    /// Remove and return the history entry at `index`.
    ///
    /// Refused with `InvariantViolation` if it would leave the history
    /// empty — deleting the item is the way to drop its last observation.
    pub fn remove_value_at(
        &self,
        ledger: &mut Ledger,
        name: &str,
        index: usize,
    ) -> Result<ValueEntry, CoreError> {
        let item = ledger
            .get_mut(name)
            .ok_or_else(|| CoreError::UnknownItem(name.to_string()))?;
        let len = item.history.len();
        if index >= len {
            return Err(CoreError::OutOfRange { index, len });
        }
        if len == 1 {
            return Err(CoreError::InvariantViolation(format!(
                "removing the sole history entry of '{name}' would leave it without a value — delete the item instead"
            )));
        }
        Ok(item.history.remove(index))
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

/// A value observation must be a non-negative real number.
fn validate_value(value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::InvalidValue(format!(
            "value must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(CoreError::InvalidValue(format!(
            "value must not be negative, got {value}"
        )));
    }
    Ok(())
}
