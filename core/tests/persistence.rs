//! Save-store tests — round trips, the camelCase save shape, field
//! back-fill on partial saves, and the event log.

use pocketpet_core::{
    event::{EventLogEntry, PetEvent},
    pet::{ColorVariant, DangerLevel, InventoryCounts, Mood, PetSnapshot, Species, Stage},
    store::SaveStore,
};

const T0: i64 = 1_700_000_000_000;

fn store() -> SaveStore {
    let store = SaveStore::in_memory().expect("open in-memory store");
    store.migrate().expect("migrate");
    store
}

/// A saved snapshot loads back exactly, inventory included.
#[test]
fn save_and_load_round_trip() {
    let store = store();
    let mut pet = PetSnapshot::new_egg("Mochi", Species::Dog, ColorVariant::Brown, T0);
    pet.stage = Stage::Teen;
    pet.hunger = 42.5;
    pet.level = 6;
    pet.critical_hunger_started_at = Some(T0 - 1000);
    let inventory = InventoryCounts { food: 9, medicine: 0, treats: 2, soap: 1 };

    store.save("slot-1", &pet, &inventory, T0).expect("save");
    let (loaded_pet, loaded_inventory) = store
        .load("slot-1")
        .expect("load")
        .expect("save slot present");

    assert_eq!(loaded_pet, pet);
    assert_eq!(loaded_inventory, inventory);
}

/// Loading an id that was never saved reports absence, not an error.
#[test]
fn missing_save_is_absent() {
    let store = store();
    assert!(store.load("nobody").expect("load").is_none());
}

/// Saving twice under one id keeps only the latest snapshot.
#[test]
fn save_replaces_previous_snapshot() {
    let store = store();
    let mut pet = PetSnapshot::new_egg("Mochi", Species::Cat, ColorVariant::White, T0);
    let inventory = InventoryCounts::starting();

    store.save("slot-1", &pet, &inventory, T0).expect("first save");
    pet.coins = 999;
    store.save("slot-1", &pet, &inventory, T0 + 1).expect("second save");

    let (loaded, _) = store.load("slot-1").expect("load").expect("present");
    assert_eq!(loaded.coins, 999);
}

/// The persisted pet is a flat camelCase record — the shape external
/// tooling and old saves expect.
#[test]
fn persisted_shape_uses_camel_case_fields() {
    let pet = PetSnapshot::new_egg("Mochi", Species::Cat, ColorVariant::White, T0);
    let json = serde_json::to_string(&pet).expect("serialize");

    for field in [
        "\"birthTimestamp\"",
        "\"lastUpdateTimestamp\"",
        "\"criticalHungerStartedAt\"",
        "\"criticalHealthStartedAt\"",
        "\"criticalComboStartedAt\"",
        "\"isSleeping\"",
        "\"sleepStartedAt\"",
        "\"sleepStartEnergy\"",
        "\"dangerLevel\"",
        "\"isAlive\"",
    ] {
        assert!(json.contains(field), "missing {field} in {json}");
    }
}

/// A truncated save from an older build deserializes with safe defaults
/// instead of being rejected.
#[test]
fn partial_save_back_fills_defaults() {
    let json = r#"{
        "name": "Legacy",
        "hunger": 55.0,
        "stage": "teen",
        "level": 7,
        "coins": 12
    }"#;

    let pet: PetSnapshot = serde_json::from_str(json).expect("partial save parses");

    assert_eq!(pet.name, "Legacy");
    assert_eq!(pet.hunger, 55.0);
    assert_eq!(pet.stage, Stage::Teen);
    assert!(pet.is_alive, "missing isAlive defaults to alive");
    assert!(!pet.is_sleeping);
    assert_eq!(pet.critical_hunger_started_at, None);
    assert_eq!(pet.critical_health_started_at, None);
    assert_eq!(pet.critical_combo_started_at, None);
    assert_eq!(pet.sleep_started_at, None);
    assert_eq!(pet.danger_level, DangerLevel::Normal);
    assert_eq!(pet.mood, Mood::Content);
    assert!(!pet.sleep_bonus_granted);
}

/// Unknown inventory fields default to zero.
#[test]
fn partial_inventory_back_fills_zero() {
    let inventory: InventoryCounts =
        serde_json::from_str(r#"{"food": 3}"#).expect("partial inventory parses");
    assert_eq!(inventory.food, 3);
    assert_eq!(inventory.medicine, 0);
    assert_eq!(inventory.treats, 0);
    assert_eq!(inventory.soap, 0);
}

/// Events append in order and can be read back by save id.
#[test]
fn event_log_appends_and_reads_back() {
    let store = store();
    for (i, event) in [
        PetEvent::Hatched { name: "Mochi".into() },
        PetEvent::Fed { messy: false },
        PetEvent::LevelledUp { level: 2, coins_awarded: 10 },
    ]
    .iter()
    .enumerate()
    {
        let entry = EventLogEntry {
            id: None,
            save_id: "slot-1".into(),
            at_ms: T0 + i as i64,
            event_type: pocketpet_core::event::event_type_name(event).into(),
            payload: serde_json::to_string(event).expect("payload"),
        };
        store.append_event(&entry).expect("append");
    }

    let entries = store.events_for_save("slot-1").expect("read back");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].event_type, "hatched");
    assert_eq!(entries[2].event_type, "levelled_up");
    assert_eq!(store.event_count("slot-1", "fed").expect("count"), 1);

    // Payloads round-trip into typed events.
    let replayed: PetEvent =
        serde_json::from_str(&entries[1].payload).expect("payload parses");
    assert_eq!(replayed, PetEvent::Fed { messy: false });
}

/// Clearing a save removes both the snapshot and its history.
#[test]
fn clear_wipes_save_and_events() {
    let store = store();
    let pet = PetSnapshot::new_egg("Mochi", Species::Cat, ColorVariant::White, T0);
    store.save("slot-1", &pet, &InventoryCounts::starting(), T0).expect("save");
    let entry = EventLogEntry {
        id: None,
        save_id: "slot-1".into(),
        at_ms: T0,
        event_type: "hatched".into(),
        payload: "{}".into(),
    };
    store.append_event(&entry).expect("append");

    store.clear("slot-1").expect("clear");

    assert!(store.load("slot-1").expect("load").is_none());
    assert!(store.events_for_save("slot-1").expect("events").is_empty());
}
