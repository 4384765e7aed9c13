use serde::{Deserialize, Serialize};

use super::history::ValueHistory;

/// Rarity tier of a collectible item.
/// Serializes as the plain tier name (e.g. `"Mythical"`) in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Mythical,
    Legendary,
    Epic,
    Rare,
    Common,
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rarity::Mythical => write!(f, "Mythical"),
            Rarity::Legendary => write!(f, "Legendary"),
            Rarity::Epic => write!(f, "Epic"),
            Rarity::Rare => write!(f, "Rare"),
            Rarity::Common => write!(f, "Common"),
        }
    }
}

/// One tracked collectible item.
///
/// `name` is the item's unique, case-sensitive key in the ledger and is
/// immutable after creation. The item exclusively owns its value history;
/// the current value is derived from it on demand rather than stored as a
/// separate field, so the two can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Unique key, immutable after creation
    pub name: String,

    /// Rarity tier
    pub rarity: Rarity,

    /// Opaque display token (e.g. an emoji), if any
    pub icon: Option<String>,

    /// Chronological value record — never empty for a ledger-resident item
    pub history: ValueHistory,
}

impl Item {
    /// The value of the chronologically-last history entry.
    #[must_use]
    pub fn current_value(&self) -> f64 {
        // A ledger-resident item always has at least one entry.
        self.history.last().map_or(0.0, |e| e.value)
    }

    /// The date of the most recent observation.
    #[must_use]
    pub fn last_updated(&self) -> Option<chrono::NaiveDate> {
        self.history.last().map(|e| e.date)
    }
}
