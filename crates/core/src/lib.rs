pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use models::{
    basket::{BasketEntry, TradeBasket},
    history::ValueEntry,
    item::{Item, Rarity},
    ledger::Ledger,
    metrics::{ItemMetrics, Trend},
    verdict::FairnessVerdict,
};
use services::{
    ledger_service::LedgerService, metrics_service::MetricsService, trade_service::TradeService,
};
use storage::snapshot::{LedgerSnapshot, RejectedItem};

use errors::CoreError;

/// Main entry point for the Trading Values core library.
/// Holds the ledger state and the services needed to operate on it.
#[must_use]
pub struct TradingValues {
    ledger: Ledger,
    ledger_service: LedgerService,
    metrics_service: MetricsService,
    trade_service: TradeService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for TradingValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradingValues")
            .field("items", &self.ledger.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl TradingValues {
    /// Create a tracker with an empty ledger.
    pub fn create_new() -> Self {
        Self::build(Ledger::new())
    }

    /// Create a tracker from the built-in seed dataset.
    pub fn with_seed_data() -> Self {
        let (ledger, _rejected) = LedgerSnapshot::seed().into_ledger();
        Self::build(ledger)
    }

    /// Build a tracker from a snapshot, reporting items the loader
    /// refused. The caller decides whether a partial load is acceptable
    /// or the seed dataset should be used instead.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> (Self, Vec<RejectedItem>) {
        let (ledger, rejected) = snapshot.into_ledger();
        (Self::build(ledger), rejected)
    }

    /// Load from the JSON snapshot shape the persistence collaborator
    /// exchanges. Fails only when the JSON itself is unreadable;
    /// per-item problems are reported alongside the loaded tracker.
    pub fn load_from_json(json: &str) -> Result<(Self, Vec<RejectedItem>), CoreError> {
        let snapshot = LedgerSnapshot::from_json(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    // ── Item Management ─────────────────────────────────────────────

    /// Create an item whose history has exactly one entry dated today.
    pub fn create_item(
        &mut self,
        name: impl Into<String>,
        rarity: Rarity,
        initial_value: f64,
        icon: Option<String>,
    ) -> Result<(), CoreError> {
        self.ledger_service.create_item(
            &mut self.ledger,
            name,
            rarity,
            initial_value,
            icon,
            today(),
        )?;
        self.dirty = true;
        Ok(())
    }

    /// Delete an item entirely. Returns the removed item.
    /// Baskets referencing it become stale (they total it as zero).
    pub fn delete_item(&mut self, name: &str) -> Result<Item, CoreError> {
        let item = self.ledger_service.delete_item(&mut self.ledger, name)?;
        self.dirty = true;
        Ok(item)
    }

    /// Set an item's current value by appending a history entry dated
    /// today.
    pub fn set_current_value(&mut self, name: &str, value: f64) -> Result<(), CoreError> {
        self.ledger_service
            .set_current_value(&mut self.ledger, name, value, today())?;
        self.dirty = true;
        Ok(())
    }

    /// Re-tier an item.
    pub fn set_rarity(&mut self, name: &str, rarity: Rarity) -> Result<(), CoreError> {
        self.ledger_service
            .set_rarity(&mut self.ledger, name, rarity)?;
        self.dirty = true;
        Ok(())
    }

    /// Replace an item's display icon.
    pub fn set_icon(&mut self, name: &str, icon: Option<String>) -> Result<(), CoreError> {
        self.ledger_service.set_icon(&mut self.ledger, name, icon)?;
        self.dirty = true;
        Ok(())
    }

    // ── Value History ───────────────────────────────────────────────

    /// Append a dated observation to an item's history.
    pub fn add_value_entry(
        &mut self,
        name: &str,
        date: NaiveDate,
        value: f64,
    ) -> Result<(), CoreError> {
        self.ledger_service
            .append_value(&mut self.ledger, name, date, value)?;
        self.dirty = true;
        Ok(())
    }

    /// Remove the history entry at `index`. Refused if it would leave the
    /// item without any observation.
    pub fn remove_value_entry(
        &mut self,
        name: &str,
        index: usize,
    ) -> Result<ValueEntry, CoreError> {
        let entry = self
            .ledger_service
            .remove_value_at(&mut self.ledger, name, index)?;
        self.dirty = true;
        Ok(entry)
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Read-only access to the full item mapping.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn get_item(&self, name: &str) -> Option<&Item> {
        self.ledger.get(name)
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.ledger.len()
    }

    /// All item names in deterministic order (sorted).
    #[must_use]
    pub fn item_names(&self) -> Vec<&str> {
        self.ledger.names()
    }

    /// An item's current value — the value of its last history entry.
    pub fn current_value(&self, name: &str) -> Result<f64, CoreError> {
        self.require_item(name).map(Item::current_value)
    }

    /// An item's trend over its two most recent observations.
    pub fn trend(&self, name: &str) -> Result<Trend, CoreError> {
        self.require_item(name)
            .map(|item| self.metrics_service.trend(&item.history))
    }

    /// An item's percent change over its two most recent observations,
    /// rounded to 2 decimal places.
    pub fn percent_change(&self, name: &str) -> Result<f64, CoreError> {
        self.require_item(name)
            .map(|item| self.metrics_service.percent_change(&item.history))
    }

    /// The full derived read-model for one item.
    pub fn item_metrics(&self, name: &str) -> Result<ItemMetrics, CoreError> {
        self.require_item(name)
            .map(|item| self.metrics_service.item_metrics(item))
    }

    /// Per-item metrics for every item, sorted by name.
    #[must_use]
    pub fn list_metrics(&self) -> Vec<ItemMetrics> {
        self.ledger
            .names()
            .into_iter()
            .filter_map(|name| self.ledger.get(name))
            .map(|item| self.metrics_service.item_metrics(item))
            .collect()
    }

    // ── Trade Comparison ────────────────────────────────────────────

    /// Add an entry to a basket, validated against the current ledger.
    pub fn add_basket_entry(
        &self,
        basket: &mut TradeBasket,
        item_name: &str,
        quantity: u32,
    ) -> Result<(), CoreError> {
        self.trade_service
            .add_entry(&self.ledger, basket, item_name, quantity)
    }

    /// Remove and return the basket entry at `index`.
    pub fn remove_basket_entry(
        &self,
        basket: &mut TradeBasket,
        index: usize,
    ) -> Result<BasketEntry, CoreError> {
        self.trade_service.remove_entry_at(basket, index)
    }

    /// Total basket value against current ledger values. Stale entries
    /// (items deleted since the basket was built) contribute zero.
    #[must_use]
    pub fn basket_total(&self, basket: &TradeBasket) -> f64 {
        self.trade_service.total(&self.ledger, basket)
    }

    /// Evaluate a proposed exchange from the perspective of `yours`,
    /// against a caller-supplied fairness tolerance in percent.
    #[must_use]
    pub fn evaluate_trade(
        &self,
        yours: &TradeBasket,
        theirs: &TradeBasket,
        tolerance_percent: f64,
    ) -> FairnessVerdict {
        self.trade_service
            .evaluate(&self.ledger, yours, theirs, tolerance_percent)
    }

    // ── Export / Dirty State ────────────────────────────────────────

    /// Capture the current in-memory state as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::from_ledger(&self.ledger)
    }

    /// Export the full ledger as pretty-printed JSON in the snapshot
    /// shape, always reflecting current in-memory state.
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        self.snapshot().to_json()
    }

    /// Returns `true` if the ledger has been modified since the last
    /// load or `mark_saved` call.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Clear the unsaved-changes flag. The persistence collaborator calls
    /// this after a successful sync.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(ledger: Ledger) -> Self {
        Self {
            ledger,
            ledger_service: LedgerService::new(),
            metrics_service: MetricsService::new(),
            trade_service: TradeService::new(),
            dirty: false,
        }
    }

    fn require_item(&self, name: &str) -> Result<&Item, CoreError> {
        self.ledger
            .get(name)
            .ok_or_else(|| CoreError::UnknownItem(name.to_string()))
    }
}

/// Today's date in UTC — administrative operations are dated "now".
fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
