use crate::models::history::ValueHistory;
use crate::models::item::Item;
use crate::models::metrics::{ItemMetrics, Trend};

/// Derives display metrics from a value history: trend direction and
/// percent change between the two most recent observations.
///
/// Read-only consumer of histories — never mutates them.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// Direction of the last observed change. Fewer than two entries is
    /// `Stable`; otherwise strictly greater is `Up`, strictly less is
    /// `Down`.
    #[must_use]
    pub fn trend(&self, history: &ValueHistory) -> Trend {
        let entries = history.entries();
        let [.., previous, latest] = entries else {
            return Trend::Stable;
        };
        if latest.value > previous.value {
            Trend::Up
        } else if latest.value < previous.value {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    /// Percent change between the two most recent observations, rounded
    /// to 2 decimal places.
    ///
    /// Defined as `0` with fewer than two entries, and guarded to `0`
    /// when the previous value is exactly zero (no infinity/NaN escapes).
    #[must_use]
    pub fn percent_change(&self, history: &ValueHistory) -> f64 {
        let entries = history.entries();
        let [.., previous, latest] = entries else {
            return 0.0;
        };
        if previous.value == 0.0 {
            return 0.0;
        }
        round2((latest.value - previous.value) / previous.value * 100.0)
    }

    /// Assemble the full per-item read-model for the list/detail views.
    #[must_use]
    pub fn item_metrics(&self, item: &Item) -> ItemMetrics {
        ItemMetrics {
            name: item.name.clone(),
            rarity: item.rarity,
            icon: item.icon.clone(),
            current_value: item.current_value(),
            trend: self.trend(&item.history),
            percent_change: self.percent_change(&item.history),
            // ledger-resident items always have at least one entry
            last_updated: item.last_updated().unwrap_or(chrono::NaiveDate::MIN),
        }
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
