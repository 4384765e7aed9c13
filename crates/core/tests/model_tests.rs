use chrono::NaiveDate;
use trading_values_core::models::basket::{BasketEntry, TradeBasket};
use trading_values_core::models::history::{parse_date, ValueEntry, ValueHistory};
use trading_values_core::models::item::{Item, Rarity};
use trading_values_core::models::ledger::Ledger;
use trading_values_core::models::metrics::Trend;
use trading_values_core::models::verdict::TradeOutcome;
use trading_values_core::errors::CoreError;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn entry(y: i32, m: u32, day: u32, value: f64) -> ValueEntry {
    ValueEntry {
        date: d(y, m, day),
        value,
    }
}

fn item(name: &str, rarity: Rarity, history: ValueHistory) -> Item {
    Item {
        name: name.to_string(),
        rarity,
        icon: None,
        history,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Rarity
// ═══════════════════════════════════════════════════════════════════

mod rarity {
    use super::*;

    #[test]
    fn display_all_tiers() {
        assert_eq!(Rarity::Mythical.to_string(), "Mythical");
        assert_eq!(Rarity::Legendary.to_string(), "Legendary");
        assert_eq!(Rarity::Epic.to_string(), "Epic");
        assert_eq!(Rarity::Rare.to_string(), "Rare");
        assert_eq!(Rarity::Common.to_string(), "Common");
    }

    #[test]
    fn equality() {
        assert_eq!(Rarity::Mythical, Rarity::Mythical);
        assert_ne!(Rarity::Epic, Rarity::Rare);
    }

    #[test]
    fn serializes_as_plain_tier_name() {
        assert_eq!(serde_json::to_string(&Rarity::Mythical).unwrap(), "\"Mythical\"");
    }

    #[test]
    fn serde_roundtrip_json() {
        for rarity in [
            Rarity::Mythical,
            Rarity::Legendary,
            Rarity::Epic,
            Rarity::Rare,
            Rarity::Common,
        ] {
            let json = serde_json::to_string(&rarity).unwrap();
            let back: Rarity = serde_json::from_str(&json).unwrap();
            assert_eq!(rarity, back);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ValueHistory
// ═══════════════════════════════════════════════════════════════════

mod value_history {
    use super::*;

    #[test]
    fn new_has_one_entry() {
        let h = ValueHistory::new(entry(2025, 1, 5, 4800.0));
        assert_eq!(h.len(), 1);
        assert!(!h.is_empty());
        assert_eq!(h.last().unwrap().value, 4800.0);
    }

    #[test]
    fn from_entries_sorts_ascending_by_date() {
        let h = ValueHistory::from_entries(vec![
            entry(2025, 1, 5, 4800.0),
            entry(2024, 12, 1, 4600.0),
            entry(2024, 12, 15, 4700.0),
        ]);
        let dates: Vec<NaiveDate> = h.entries().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![d(2024, 12, 1), d(2024, 12, 15), d(2025, 1, 5)]);
    }

    #[test]
    fn from_entries_stable_for_equal_dates() {
        let h = ValueHistory::from_entries(vec![
            entry(2025, 1, 5, 100.0),
            entry(2025, 1, 5, 200.0),
            entry(2024, 12, 1, 50.0),
        ]);
        // equal-dated entries keep their relative order after the sort
        assert_eq!(h.entries()[1].value, 100.0);
        assert_eq!(h.entries()[2].value, 200.0);
    }

    #[test]
    fn insert_keeps_sorted_order() {
        let mut h = ValueHistory::new(entry(2025, 1, 5, 4800.0));
        h.insert(entry(2024, 12, 1, 4600.0));
        h.insert(entry(2024, 12, 15, 4700.0));
        let dates: Vec<NaiveDate> = h.entries().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![d(2024, 12, 1), d(2024, 12, 15), d(2025, 1, 5)]);
    }

    #[test]
    fn insert_never_decreases_length() {
        let mut h = ValueHistory::new(entry(2025, 1, 5, 4800.0));
        for i in 0..10 {
            let before = h.len();
            h.insert(entry(2025, 1, 5, f64::from(i)));
            assert_eq!(h.len(), before + 1);
        }
    }

    #[test]
    fn insert_duplicate_date_lands_after_existing() {
        let mut h = ValueHistory::new(entry(2025, 1, 5, 4800.0));
        h.insert(entry(2025, 1, 5, 5000.0));
        assert_eq!(h.entries()[0].value, 4800.0);
        assert_eq!(h.entries()[1].value, 5000.0);
        // the later insert wins for current-value purposes
        assert_eq!(h.last().unwrap().value, 5000.0);
    }

    #[test]
    fn insert_duplicate_date_keeps_both_entries_visible() {
        let mut h = ValueHistory::new(entry(2025, 1, 5, 4800.0));
        h.insert(entry(2025, 1, 5, 5000.0));
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn insert_before_everything() {
        let mut h = ValueHistory::new(entry(2025, 1, 5, 4800.0));
        h.insert(entry(2020, 1, 1, 100.0));
        assert_eq!(h.entries()[0].date, d(2020, 1, 1));
        assert_eq!(h.last().unwrap().date, d(2025, 1, 5));
    }

    #[test]
    fn last_is_chronologically_latest() {
        let mut h = ValueHistory::new(entry(2024, 12, 1, 4600.0));
        h.insert(entry(2025, 1, 5, 4800.0));
        h.insert(entry(2024, 12, 15, 4700.0));
        assert_eq!(h.last().unwrap().date, d(2025, 1, 5));
        assert_eq!(h.last().unwrap().value, 4800.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  parse_date
// ═══════════════════════════════════════════════════════════════════

mod dates {
    use super::*;

    #[test]
    fn parses_iso_date() {
        assert_eq!(parse_date("2025-01-05").unwrap(), d(2025, 1, 5));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse_date("not-a-date"), Err(CoreError::InvalidDate(_))));
    }

    #[test]
    fn rejects_wrong_format() {
        assert!(matches!(parse_date("05/01/2025"), Err(CoreError::InvalidDate(_))));
    }

    #[test]
    fn rejects_impossible_date() {
        assert!(matches!(parse_date("2025-02-30"), Err(CoreError::InvalidDate(_))));
    }

    #[test]
    fn error_carries_the_raw_input() {
        let err = parse_date("junk").unwrap_err();
        assert!(err.to_string().contains("junk"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Item
// ═══════════════════════════════════════════════════════════════════

mod item_model {
    use super::*;

    #[test]
    fn current_value_is_last_history_entry() {
        let mut h = ValueHistory::new(entry(2024, 12, 1, 4600.0));
        h.insert(entry(2025, 1, 5, 4800.0));
        let i = item("Pika", Rarity::Mythical, h);
        assert_eq!(i.current_value(), 4800.0);
    }

    #[test]
    fn current_value_follows_history_mutation() {
        let mut i = item(
            "Pika",
            Rarity::Mythical,
            ValueHistory::new(entry(2024, 12, 1, 4600.0)),
        );
        assert_eq!(i.current_value(), 4600.0);
        i.history.insert(entry(2025, 1, 5, 4800.0));
        assert_eq!(i.current_value(), 4800.0);
    }

    #[test]
    fn last_updated_is_latest_entry_date() {
        let mut h = ValueHistory::new(entry(2024, 12, 1, 4600.0));
        h.insert(entry(2025, 1, 5, 4800.0));
        let i = item("Pika", Rarity::Mythical, h);
        assert_eq!(i.last_updated(), Some(d(2025, 1, 5)));
    }

    #[test]
    fn icon_is_optional() {
        let i = Item {
            name: "Hie".to_string(),
            rarity: Rarity::Epic,
            icon: Some("❄️".to_string()),
            history: ValueHistory::new(entry(2024, 12, 1, 1500.0)),
        };
        assert_eq!(i.icon.as_deref(), Some("❄️"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Ledger
// ═══════════════════════════════════════════════════════════════════

mod ledger {
    use super::*;

    fn sample(name: &str) -> Item {
        item(
            name,
            Rarity::Common,
            ValueHistory::new(entry(2025, 1, 5, 100.0)),
        )
    }

    #[test]
    fn new_is_empty() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
    }

    #[test]
    fn insert_and_get() {
        let mut ledger = Ledger::new();
        ledger.insert(sample("Pika")).unwrap();
        assert!(ledger.contains("Pika"));
        assert_eq!(ledger.get("Pika").unwrap().name, "Pika");
    }

    #[test]
    fn insert_duplicate_name_rejected() {
        let mut ledger = Ledger::new();
        ledger.insert(sample("Pika")).unwrap();
        let err = ledger.insert(sample("Pika")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateName(name) if name == "Pika"));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut ledger = Ledger::new();
        ledger.insert(sample("Pika")).unwrap();
        ledger.insert(sample("pika")).unwrap();
        assert_eq!(ledger.len(), 2);
        assert!(!ledger.contains("PIKA"));
    }

    #[test]
    fn remove_returns_item() {
        let mut ledger = Ledger::new();
        ledger.insert(sample("Pika")).unwrap();
        let removed = ledger.remove("Pika").unwrap();
        assert_eq!(removed.name, "Pika");
        assert!(ledger.is_empty());
    }

    #[test]
    fn remove_unknown_rejected() {
        let mut ledger = Ledger::new();
        let err = ledger.remove("Ghost").unwrap_err();
        assert!(matches!(err, CoreError::UnknownItem(name) if name == "Ghost"));
    }

    #[test]
    fn names_sorted() {
        let mut ledger = Ledger::new();
        ledger.insert(sample("Mera")).unwrap();
        ledger.insert(sample("Goro")).unwrap();
        ledger.insert(sample("Pika")).unwrap();
        assert_eq!(ledger.names(), vec!["Goro", "Mera", "Pika"]);
    }

    #[test]
    fn iter_visits_every_item() {
        let mut ledger = Ledger::new();
        ledger.insert(sample("Mera")).unwrap();
        ledger.insert(sample("Pika")).unwrap();
        assert_eq!(ledger.iter().count(), 2);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  TradeBasket
// ═══════════════════════════════════════════════════════════════════

mod basket {
    use super::*;

    #[test]
    fn new_is_empty() {
        let basket = TradeBasket::new();
        assert!(basket.is_empty());
        assert_eq!(basket.len(), 0);
    }

    #[test]
    fn default_is_empty() {
        assert!(TradeBasket::default().is_empty());
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut basket = TradeBasket::new();
        basket.entries.push(BasketEntry {
            item_name: "Pika".to_string(),
            quantity: 1,
        });
        basket.entries.push(BasketEntry {
            item_name: "Mera".to_string(),
            quantity: 2,
        });
        assert_eq!(basket.entries[0].item_name, "Pika");
        assert_eq!(basket.entries[1].item_name, "Mera");
        assert_eq!(basket.len(), 2);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Trend / TradeOutcome display
// ═══════════════════════════════════════════════════════════════════

mod display {
    use super::*;

    #[test]
    fn trend() {
        assert_eq!(Trend::Up.to_string(), "up");
        assert_eq!(Trend::Down.to_string(), "down");
        assert_eq!(Trend::Stable.to_string(), "stable");
    }

    #[test]
    fn outcome() {
        assert_eq!(TradeOutcome::Win.to_string(), "win");
        assert_eq!(TradeOutcome::Loss.to_string(), "loss");
        assert_eq!(TradeOutcome::Fair.to_string(), "fair");
    }
}
