//! Engine integration tests — the full controller over an in-memory
//! store: timers, care flow, sleep interplay, resume, and death.

use pocketpet_core::{
    actions::Reward,
    config::GameConfig,
    engine::GameEngine,
    error::GameError,
    notify::LogSink,
    pet::{ColorVariant, ItemKind, Species, Stage},
    store::SaveStore,
};

const T0: i64 = 1_700_000_000_000;

fn build(save_id: &str) -> GameEngine {
    let store = SaveStore::in_memory().expect("open store");
    store.migrate().expect("migrate");
    GameEngine::new_game(
        save_id.into(),
        "Mochi",
        Species::Cat,
        ColorVariant::White,
        0xBEEF,
        GameConfig::default(),
        store,
        Box::new(LogSink),
        T0,
    )
    .expect("new game")
}

fn build_hatched(save_id: &str) -> GameEngine {
    let mut engine = build(save_id);
    engine.hatch(T0).expect("hatch");
    engine
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// A new game starts as a fully stocked egg and is persisted at once.
#[test]
fn new_game_initializes_and_persists() {
    let engine = build("slot-new");

    assert_eq!(engine.pet.stage, Stage::Egg);
    assert_eq!(engine.pet.coins, 50);
    assert_eq!(engine.inventory.food, 5);

    let (saved, _) = engine
        .store()
        .load("slot-new")
        .expect("load")
        .expect("persisted");
    assert_eq!(saved, engine.pet);
}

/// Hatching starts the decay clock: the first tick lands 30 s later.
#[test]
fn decay_ticks_after_hatching() {
    let mut engine = build_hatched("slot-tick");

    engine.pump(T0 + 29_000);
    assert!(approx(engine.pet.hunger, 100.0), "early tick: {}", engine.pet.hunger);

    engine.pump(T0 + 30_000);
    assert!(approx(engine.pet.hunger, 98.0), "hunger: {}", engine.pet.hunger);

    // The egg never ticked while unhatched.
    assert_eq!(
        engine.store().event_count("slot-tick", "hatched").expect("count"),
        1
    );
}

/// Care actions implicitly wake a sleeping pet before mutating.
#[test]
fn feeding_wakes_a_sleeping_pet() {
    let mut engine = build_hatched("slot-wake");
    engine.start_sleep(T0 + 1_000).expect("sleep");
    assert!(engine.pet.is_sleeping);

    engine.feed(T0 + 2_000).expect("feed");

    assert!(!engine.pet.is_sleeping, "feed must wake first");
    assert_eq!(engine.pet.sleep_started_at, None);
    assert_eq!(engine.inventory.food, 4);
    assert_eq!(
        engine.store().event_count("slot-wake", "woken").expect("count"),
        1
    );
}

/// Double sleep is surfaced as an error, not a silent restart.
#[test]
fn double_sleep_errors_through_the_engine() {
    let mut engine = build_hatched("slot-double");
    engine.start_sleep(T0 + 1_000).expect("first sleep");

    let err = engine.start_sleep(T0 + 2_000);
    assert!(matches!(err, Err(GameError::AlreadySleeping)), "{err:?}");
    assert_eq!(engine.pet.sleep_started_at, Some(T0 + 1_000));
}

/// The pump drives sleep to full recovery and pays the bonus once.
#[test]
fn sleep_completes_through_the_pump() {
    let mut engine = build_hatched("slot-sleep");
    engine.pet.energy = 20.0;
    engine.pet.happiness = 50.0;
    engine.start_sleep(T0).expect("sleep");

    // A mid-window pump interpolates...
    engine.pump(T0 + 150_000);
    assert!(approx(engine.pet.energy, 60.0), "energy: {}", engine.pet.energy);

    // ...and the completion mark snaps to 100 with the one-time bonus.
    engine.pump(T0 + 300_000);
    assert_eq!(engine.pet.energy, 100.0);
    assert!(approx(engine.pet.happiness, 60.0), "happiness: {}", engine.pet.happiness);
    assert!(engine.pet.is_sleeping, "sleep needs an explicit wake");

    engine.pump(T0 + 301_000);
    engine.pump(T0 + 400_000);
    assert!(approx(engine.pet.happiness, 60.0), "bonus repeated");
    assert_eq!(
        engine
            .store()
            .event_count("slot-sleep", "sleep_completed")
            .expect("count"),
        1
    );

    engine.wake(T0 + 400_001);
    assert!(!engine.pet.is_sleeping);
}

/// Decay stays suspended for the whole sleep.
#[test]
fn no_decay_while_sleeping() {
    let mut engine = build_hatched("slot-still");
    engine.start_sleep(T0).expect("sleep");

    for minute in 1..=10 {
        engine.pump(T0 + minute * 60_000);
    }

    assert!(approx(engine.pet.hunger, 100.0), "hunger: {}", engine.pet.hunger);
    assert!(approx(engine.pet.cleanliness, 100.0), "cleanliness: {}", engine.pet.cleanliness);
}

/// An expired critical timer kills the pet on the next tick, death is
/// logged, and every care action refuses from then on.
#[test]
fn death_disables_care_actions() {
    let mut engine = build_hatched("slot-death");
    engine.pet.hunger = 0.0;
    engine.pet.critical_hunger_started_at = Some(T0 - 7_200_001);

    engine.pump(T0 + 30_000);

    assert!(!engine.pet.is_alive);
    assert_eq!(
        engine.store().event_count("slot-death", "pet_died").expect("count"),
        1
    );

    assert!(matches!(engine.feed(T0 + 31_000), Err(GameError::Deceased)));
    assert!(matches!(engine.clean(T0 + 31_000), Err(GameError::Deceased)));
    assert!(matches!(engine.start_sleep(T0 + 31_000), Err(GameError::Deceased)));

    // The decay clock stopped: stats freeze where death left them.
    let frozen = engine.pet.clone();
    engine.pump(T0 + 600_000);
    assert_eq!(engine.pet, frozen);
}

/// Reset is the one path out of a terminal state.
#[test]
fn reset_replaces_a_dead_pet() {
    let mut engine = build_hatched("slot-reset");
    engine.pet.hunger = 0.0;
    engine.pet.critical_hunger_started_at = Some(T0 - 7_200_001);
    engine.pump(T0 + 30_000);
    assert!(!engine.pet.is_alive);

    engine
        .reset("Mochi II", Species::Dog, ColorVariant::Black, T0 + 60_000)
        .expect("reset");

    assert!(engine.pet.is_alive);
    assert_eq!(engine.pet.name, "Mochi II");
    assert_eq!(engine.pet.stage, Stage::Egg);
    assert_eq!(engine.inventory.food, 5);
    // The old history went with the old save.
    assert_eq!(
        engine.store().event_count("slot-reset", "pet_died").expect("count"),
        0
    );
}

/// Resume applies the offline gap before handing the engine back.
#[test]
fn resume_reconciles_the_offline_gap() {
    let store = SaveStore::in_memory().expect("open");
    store.migrate().expect("migrate");
    let mut pet = pocketpet_core::pet::PetSnapshot::new_egg(
        "Mochi",
        Species::Cat,
        ColorVariant::White,
        T0,
    );
    pet.stage = Stage::Baby;
    store
        .save("slot-resume", &pet, &pocketpet_core::pet::InventoryCounts::starting(), T0)
        .expect("seed save");

    let now = T0 + 10 * 60_000;
    let engine = GameEngine::resume(
        "slot-resume".into(),
        7,
        GameConfig::default(),
        store,
        Box::new(LogSink),
        now,
    )
    .expect("resume")
    .expect("save present");

    assert!(approx(engine.pet.hunger, 60.0), "hunger: {}", engine.pet.hunger);
    assert_eq!(engine.pet.last_update_timestamp, now);
}

/// Resume on an empty store reports absence.
#[test]
fn resume_without_a_save_is_none() {
    let store = SaveStore::in_memory().expect("open");
    store.migrate().expect("migrate");
    let resumed = GameEngine::resume(
        "slot-none".into(),
        7,
        GameConfig::default(),
        store,
        Box::new(LogSink),
        T0,
    )
    .expect("resume");
    assert!(resumed.is_none());
}

/// Rewards flow through progression: a big win levels the pet up.
#[test]
fn rewards_settle_progression() {
    let mut engine = build_hatched("slot-reward");
    engine.pet.coins = 0;

    let reward = Reward { coins: 10, exp: 250, happiness: 5.0 };
    engine.apply_reward(reward, 10.0, T0 + 1_000).expect("reward");

    assert_eq!(engine.pet.level, 2);
    assert_eq!(engine.pet.experience, 150);
    assert_eq!(engine.pet.coins, 20, "10 won + 10 level bonus");
    assert_eq!(
        engine
            .store()
            .event_count("slot-reward", "levelled_up")
            .expect("count"),
        1
    );
}

/// Shopping works by catalog price and refuses a short purse.
#[test]
fn shop_flow() {
    let mut engine = build_hatched("slot-shop");
    assert_eq!(engine.pet.coins, 50);

    engine.buy(ItemKind::Soap, T0 + 1_000).expect("buy soap");
    assert_eq!(engine.pet.coins, 47);
    assert_eq!(engine.inventory.soap, 4);

    engine.pet.coins = 1;
    let err = engine.buy(ItemKind::Medicine, T0 + 2_000);
    assert!(matches!(err, Err(GameError::InsufficientFunds { .. })), "{err:?}");
    assert_eq!(engine.inventory.medicine, 2);
}

/// Play is gated on energy through the engine too.
#[test]
fn play_gate_through_the_engine() {
    let mut engine = build_hatched("slot-play");
    engine.pet.energy = 10.0;

    let err = engine.start_play(T0 + 1_000);
    assert!(matches!(err, Err(GameError::InsufficientEnergy { .. })), "{err:?}");

    engine.pet.energy = 50.0;
    engine.start_play(T0 + 2_000).expect("play");
    assert!(approx(engine.pet.energy, 30.0), "energy: {}", engine.pet.energy);
}

/// Cleaning a dropping that does not exist reports false and pays
/// nothing.
#[test]
fn cleaning_a_missing_dropping_is_false() {
    let mut engine = build_hatched("slot-mess");
    let coins = engine.pet.coins;
    assert!(!engine.clean_dropping("no-such-id", T0 + 1_000));
    assert_eq!(engine.pet.coins, coins);
}
