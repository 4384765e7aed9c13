use chrono::NaiveDate;

use super::item::Rarity;

/// Qualitative value direction, derived from the two most recent
/// observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

/// Derived read-model for one item — everything the list and detail views
/// show per item, computed on demand from the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMetrics {
    pub name: String,
    pub rarity: Rarity,
    pub icon: Option<String>,

    /// Value of the chronologically-last history entry
    pub current_value: f64,

    /// Direction of the last observed change
    pub trend: Trend,

    /// Percent change between the two most recent observations,
    /// rounded to 2 decimal places
    pub percent_change: f64,

    /// Date of the most recent observation
    pub last_updated: NaiveDate,
}
