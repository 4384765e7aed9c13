use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::history::{parse_date, ValueEntry, ValueHistory};
use crate::models::item::{Item, Rarity};
use crate::models::ledger::Ledger;

/// One raw history entry as exchanged at the boundary. Dates travel as ISO
/// `YYYY-MM-DD` strings so a bad date can be rejected per item instead of
/// failing the whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub date: String,
    pub value: f64,
}

/// One item as exchanged at the boundary.
///
/// `current_value` is carried for compatibility with the persisted shape,
/// but it is never trusted on load: the last history entry is
/// authoritative, and exports always carry the recomputed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub rarity: Rarity,
    pub current_value: f64,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub history: Vec<SnapshotEntry>,
}

/// The full boundary shape: a mapping from item name to item data.
/// `BTreeMap` keeps exports deterministically ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub items: BTreeMap<String, ItemSnapshot>,
}

/// An item the loader refused, with the reason. Well-formed items in the
/// same snapshot still load; the caller decides whether a partial result
/// is acceptable or the seed dataset should be used instead.
#[derive(Debug)]
pub struct RejectedItem {
    pub name: String,
    pub reason: CoreError,
}

impl LedgerSnapshot {
    /// Parse a snapshot from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("failed to serialize snapshot: {e}")))
    }

    /// Validate and convert the snapshot into a ledger.
    ///
    /// Validation is per item: an item with an empty history, a negative or
    /// non-finite value, or an unparseable date is rejected and reported,
    /// while the remaining items load normally. Histories are stably
    /// re-sorted by date on the way in.
    pub fn into_ledger(self) -> (Ledger, Vec<RejectedItem>) {
        let mut ledger = Ledger::new();
        let mut rejected = Vec::new();

        for (name, snapshot) in self.items {
            match validate_item(&name, snapshot) {
                Ok(item) => {
                    // names are unique by construction (map keys)
                    if let Err(reason) = ledger.insert(item) {
                        rejected.push(RejectedItem { name, reason });
                    }
                }
                Err(reason) => rejected.push(RejectedItem { name, reason }),
            }
        }

        (ledger, rejected)
    }

    /// Capture the current in-memory state of a ledger, recomputing each
    /// item's `current_value` from its history.
    #[must_use]
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let items = ledger
            .names()
            .into_iter()
            .filter_map(|name| ledger.get(name))
            .map(|item| {
                (
                    item.name.clone(),
                    ItemSnapshot {
                        rarity: item.rarity,
                        current_value: item.current_value(),
                        icon: item.icon.clone(),
                        history: item
                            .history
                            .entries()
                            .iter()
                            .map(|e| SnapshotEntry {
                                date: e.date.format("%Y-%m-%d").to_string(),
                                value: e.value,
                            })
                            .collect(),
                    },
                )
            })
            .collect();
        Self { items }
    }

    /// The built-in fallback dataset, for loaders that hit a total load
    /// failure and for tests.
    #[must_use]
    pub fn seed() -> Self {
        let mut items = BTreeMap::new();
        items.insert(
            "Pika".to_string(),
            ItemSnapshot {
                rarity: Rarity::Mythical,
                current_value: 4800.0,
                icon: Some("⚡".to_string()),
                history: vec![
                    SnapshotEntry { date: "2024-12-01".into(), value: 4600.0 },
                    SnapshotEntry { date: "2025-01-05".into(), value: 4800.0 },
                ],
            },
        );
        items.insert(
            "Mera".to_string(),
            ItemSnapshot {
                rarity: Rarity::Legendary,
                current_value: 3200.0,
                icon: Some("🔥".to_string()),
                history: vec![
                    SnapshotEntry { date: "2024-12-01".into(), value: 3500.0 },
                    SnapshotEntry { date: "2024-12-15".into(), value: 3300.0 },
                    SnapshotEntry { date: "2025-01-05".into(), value: 3200.0 },
                ],
            },
        );
        items.insert(
            "Goro".to_string(),
            ItemSnapshot {
                rarity: Rarity::Legendary,
                current_value: 2800.0,
                icon: Some("⚡".to_string()),
                history: vec![
                    SnapshotEntry { date: "2024-12-01".into(), value: 2700.0 },
                    SnapshotEntry { date: "2025-01-05".into(), value: 2800.0 },
                ],
            },
        );
        items.insert(
            "Hie".to_string(),
            ItemSnapshot {
                rarity: Rarity::Epic,
                current_value: 1500.0,
                icon: Some("❄️".to_string()),
                history: vec![
                    SnapshotEntry { date: "2024-12-01".into(), value: 1500.0 },
                ],
            },
        );
        Self { items }
    }
}

/// Check one snapshot item and build the in-memory `Item` from it.
fn validate_item(name: &str, snapshot: ItemSnapshot) -> Result<Item, CoreError> {
    if snapshot.history.is_empty() {
        return Err(CoreError::InvariantViolation(format!(
            "item '{name}' has no history entries"
        )));
    }

    let mut entries = Vec::with_capacity(snapshot.history.len());
    for raw in &snapshot.history {
        let date = parse_date(&raw.date)?;
        if !raw.value.is_finite() || raw.value < 0.0 {
            return Err(CoreError::InvalidValue(format!(
                "item '{name}' has invalid history value {} on {}",
                raw.value, raw.date
            )));
        }
        entries.push(ValueEntry {
            date,
            value: raw.value,
        });
    }

    Ok(Item {
        name: name.to_string(),
        rarity: snapshot.rarity,
        icon: snapshot.icon,
        history: ValueHistory::from_entries(entries),
    })
}
