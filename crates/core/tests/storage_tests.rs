// ═══════════════════════════════════════════════════════════════════
// Storage Tests — MemoryStore, Preferences (theme, field memory, history)
// ═══════════════════════════════════════════════════════════════════

use chrono::{TimeZone, Utc};
use carvalue_core::models::history::HistoryEntry;
use carvalue_core::models::request::{FormField, PredictionRequest};
use carvalue_core::models::result::PredictionResult;
use carvalue_core::models::theme::Theme;
use carvalue_core::storage::memory::MemoryStore;
use carvalue_core::storage::preferences::{
    field_key, Preferences, HISTORY_KEY, THEME_KEY,
};
use carvalue_core::storage::traits::KeyValueStore;

fn prefs(store: &MemoryStore) -> Preferences {
    Preferences::new(Box::new(store.clone()))
}

fn failure_entry(n: i64) -> HistoryEntry {
    HistoryEntry::at(
        Utc.timestamp_opt(1_700_000_000 + n, 0).unwrap(),
        PredictionRequest::default(),
        PredictionResult::Failure {
            error: format!("entry {n}"),
        },
    )
}

// ═══════════════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[test]
    fn get_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("nope").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        store.set_item("k", "w").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("w"));
        assert_eq!(store.len(), 1);
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }

    #[test]
    fn clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set_item("theme", "dark").unwrap();
        assert_eq!(b.get_item("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(b.keys(), vec!["theme".to_string()]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Preferences — theme
// ═══════════════════════════════════════════════════════════════════

mod theme {
    use super::*;

    #[test]
    fn defaults_to_light() {
        let store = MemoryStore::new();
        assert_eq!(prefs(&store).theme().unwrap(), Theme::Light);
    }

    #[test]
    fn persists_under_theme_key() {
        let store = MemoryStore::new();
        prefs(&store).set_theme(Theme::Dark).unwrap();
        assert_eq!(store.get_item(THEME_KEY).unwrap().as_deref(), Some("dark"));
        // A fresh Preferences over the same store reads it back
        assert_eq!(prefs(&store).theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn unrecognised_value_falls_back_to_light() {
        let store = MemoryStore::new();
        store.set_item(THEME_KEY, "solarized").unwrap();
        assert_eq!(prefs(&store).theme().unwrap(), Theme::Light);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Preferences — field memory
// ═══════════════════════════════════════════════════════════════════

mod field_memory {
    use super::*;

    #[test]
    fn key_format() {
        assert_eq!(field_key(FormField::Year), "car_year");
        assert_eq!(field_key(FormField::Mileage), "car_mileage");
    }

    #[test]
    fn remember_and_restore() {
        let store = MemoryStore::new();
        prefs(&store).remember_field(FormField::Kms, "45000").unwrap();
        let p = prefs(&store);
        assert_eq!(p.field_value(FormField::Kms).unwrap().as_deref(), Some("45000"));
        assert_eq!(p.field_value(FormField::Year).unwrap(), None);
        assert!(store.get_item("car_year").unwrap().is_none());
    }

    #[test]
    fn empty_value_is_stored_but_not_restored() {
        let store = MemoryStore::new();
        let p = prefs(&store);
        p.remember_field(FormField::Owner, "").unwrap();
        assert_eq!(store.get_item("car_owner").unwrap().as_deref(), Some(""));
        assert_eq!(p.field_value(FormField::Owner).unwrap(), None);
    }

    #[test]
    fn fields_are_independent() {
        let store = MemoryStore::new();
        let p = prefs(&store);
        p.remember_field(FormField::Fuel, "Petrol").unwrap();
        p.remember_field(FormField::Body, "SUV").unwrap();
        p.remember_field(FormField::Fuel, "Diesel").unwrap();
        assert_eq!(p.field_value(FormField::Fuel).unwrap().as_deref(), Some("Diesel"));
        assert_eq!(p.field_value(FormField::Body).unwrap().as_deref(), Some("SUV"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Preferences — history
// ═══════════════════════════════════════════════════════════════════

mod history {
    use super::*;

    #[test]
    fn empty_when_absent() {
        let store = MemoryStore::new();
        assert!(prefs(&store).history().unwrap().is_empty());
    }

    #[test]
    fn push_writes_json_array_newest_first() {
        let store = MemoryStore::new();
        let p = prefs(&store);
        assert_eq!(p.push_history(failure_entry(1)).unwrap(), 1);
        assert_eq!(p.push_history(failure_entry(2)).unwrap(), 2);

        let raw = store.get_item(HISTORY_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["result"]["error"], "entry 2");

        let history = p.history().unwrap();
        assert_eq!(history[0], failure_entry(2));
        assert_eq!(history[1], failure_entry(1));
    }

    #[test]
    fn capped_at_capacity() {
        let store = MemoryStore::new();
        let p = prefs(&store);
        for n in 0..15 {
            let len = p.push_history(failure_entry(n)).unwrap();
            assert!(len <= 10);
        }
        let history = p.history().unwrap();
        assert_eq!(history.len(), 10);
        assert_eq!(history[0], failure_entry(14));
        assert_eq!(history[9], failure_entry(5));
    }

    #[test]
    fn custom_capacity() {
        let store = MemoryStore::new();
        let p = Preferences::with_capacity(Box::new(store.clone()), 2);
        for n in 0..5 {
            p.push_history(failure_entry(n)).unwrap();
        }
        assert_eq!(p.history().unwrap().len(), 2);
        assert_eq!(p.history_capacity(), 2);
    }

    #[test]
    fn corrupt_history_starts_over() {
        let store = MemoryStore::new();
        store.set_item(HISTORY_KEY, "{not json").unwrap();
        let p = prefs(&store);
        assert!(p.history().unwrap().is_empty());
        assert_eq!(p.push_history(failure_entry(1)).unwrap(), 1);
        assert_eq!(p.history().unwrap(), vec![failure_entry(1)]);
    }

    #[test]
    fn clear_removes_key() {
        let store = MemoryStore::new();
        let p = prefs(&store);
        p.push_history(failure_entry(1)).unwrap();
        p.clear_history().unwrap();
        assert!(store.get_item(HISTORY_KEY).unwrap().is_none());
    }

    #[test]
    fn record_kinds_do_not_interfere() {
        let store = MemoryStore::new();
        let p = prefs(&store);
        p.set_theme(Theme::Dark).unwrap();
        p.remember_field(FormField::Year, "2020").unwrap();
        p.push_history(failure_entry(1)).unwrap();
        assert_eq!(
            store.keys(),
            vec![
                "car_year".to_string(),
                "prediction_history".to_string(),
                "theme".to_string()
            ]
        );
    }
}
