//! Care action tests — preconditions, stat deltas, inventory flow, and
//! the generic reward/shop mutations.

use pocketpet_core::{
    actions::{self, Reward},
    config::GameConfig,
    error::GameError,
    event::PetEvent,
    pet::{ColorVariant, InventoryCounts, ItemKind, Mood, PetSnapshot, Species, Stage},
    rng::{GameRng, RngSlot},
};

const T0: i64 = 1_700_000_000_000;

fn hatched(now: i64) -> PetSnapshot {
    let mut pet = PetSnapshot::new_egg("Mochi", Species::Cat, ColorVariant::White, now);
    pet.stage = Stage::Baby;
    pet
}

fn care_rng() -> GameRng {
    GameRng::new(0xC0FFEE, RngSlot::Care as u64)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Feeding consumes one food and boosts hunger/happiness, clamped.
#[test]
fn feed_consumes_and_boosts() {
    let config = GameConfig::default();
    let mut pet = hatched(T0);
    pet.hunger = 50.0;
    pet.happiness = 95.0;
    let mut inventory = InventoryCounts::starting();
    let mut rng = care_rng();

    let event = actions::feed(&mut pet, &mut inventory, &config.actions, &mut rng)
        .expect("feed");

    assert_eq!(inventory.food, 4);
    assert!(approx(pet.hunger, 85.0), "hunger: {}", pet.hunger);
    assert!(approx(pet.happiness, 100.0), "happiness clamps at 100");
    assert_eq!(pet.experience, 10);
    match event {
        PetEvent::Fed { messy: true } => {
            assert!(approx(pet.cleanliness, 90.0), "mess: {}", pet.cleanliness)
        }
        PetEvent::Fed { messy: false } => {
            assert!(approx(pet.cleanliness, 100.0), "no mess: {}", pet.cleanliness)
        }
        other => panic!("unexpected event {other:?}"),
    }
}

/// Feeding with an empty pantry is rejected without touching anything.
#[test]
fn feed_from_empty_inventory_mutates_nothing() {
    let config = GameConfig::default();
    let mut pet = hatched(T0);
    pet.hunger = 50.0;
    let before = pet.clone();
    let mut inventory = InventoryCounts { food: 0, ..InventoryCounts::starting() };
    let mut rng = care_rng();

    let err = actions::feed(&mut pet, &mut inventory, &config.actions, &mut rng);

    assert!(
        matches!(err, Err(GameError::OutOfStock(ItemKind::Food))),
        "{err:?}"
    );
    assert_eq!(pet, before, "rejected feed changed the pet");
    assert_eq!(inventory.food, 0);
}

/// Cleaning restores cleanliness outright and costs one soap.
#[test]
fn clean_restores_cleanliness() {
    let config = GameConfig::default();
    let mut pet = hatched(T0);
    pet.cleanliness = 12.0;
    pet.happiness = 40.0;
    let mut inventory = InventoryCounts::starting();

    actions::clean(&mut pet, &mut inventory, &config.actions).expect("clean");

    assert_eq!(pet.cleanliness, 100.0);
    assert!(approx(pet.happiness, 55.0), "happiness: {}", pet.happiness);
    assert_eq!(pet.experience, 8);
    assert_eq!(inventory.soap, 2);
}

/// Medicine from deep in the red lands exactly on the cure boundary:
/// health 10 → 50 and cleanliness 10 → 40 count as cured.
#[test]
fn medicine_on_the_boundary_counts_as_cured() {
    let config = GameConfig::default();
    let mut pet = hatched(T0);
    pet.health = 10.0;
    pet.cleanliness = 10.0;
    pet.is_sick = true;
    pet.mood = Mood::Sick;
    let mut inventory = InventoryCounts::starting();

    let event = actions::medicate(&mut pet, &mut inventory, &config.actions)
        .expect("medicate");

    assert!(approx(pet.health, 50.0), "health: {}", pet.health);
    assert!(approx(pet.cleanliness, 40.0), "cleanliness: {}", pet.cleanliness);
    assert!(!pet.is_sick, "50 >= 50 and 40 >= 30: cured");
    assert_eq!(pet.mood, Mood::Content);
    assert_eq!(pet.experience, 20);
    assert_eq!(event, PetEvent::Medicated { cured: true });
    assert_eq!(inventory.medicine, 1);
}

/// One dose from further down is not enough.
#[test]
fn medicine_can_leave_the_pet_sick() {
    let config = GameConfig::default();
    let mut pet = hatched(T0);
    pet.health = 5.0;
    pet.cleanliness = 10.0;
    let mut inventory = InventoryCounts::starting();

    let event = actions::medicate(&mut pet, &mut inventory, &config.actions)
        .expect("medicate");

    assert!(approx(pet.health, 45.0), "health: {}", pet.health);
    assert!(pet.is_sick, "45 < 50: still sick");
    assert_eq!(pet.mood, Mood::Sick);
    assert_eq!(event, PetEvent::Medicated { cured: false });
}

/// A treat trades a little hunger room for a big happiness spike.
#[test]
fn treat_boosts_happiness_and_hunger() {
    let config = GameConfig::default();
    let mut pet = hatched(T0);
    pet.happiness = 40.0;
    pet.hunger = 60.0;
    let mut inventory = InventoryCounts::starting();

    actions::treat(&mut pet, &mut inventory, &config.actions).expect("treat");

    assert!(approx(pet.happiness, 70.0), "happiness: {}", pet.happiness);
    assert!(approx(pet.hunger, 70.0), "hunger: {}", pet.hunger);
    assert_eq!(pet.experience, 15);
    assert_eq!(inventory.treats, 0);
}

/// Play requires 30 energy and charges 20 up front.
#[test]
fn play_gates_on_energy() {
    let config = GameConfig::default();
    let mut tired = hatched(T0);
    tired.energy = 29.0;
    let err = actions::start_play(&mut tired, &config.actions);
    assert!(
        matches!(
            err,
            Err(GameError::InsufficientEnergy { available, .. }) if approx(available, 29.0)
        ),
        "{err:?}"
    );
    assert!(approx(tired.energy, 29.0), "rejected play drained energy");

    let mut rested = hatched(T0);
    rested.energy = 30.0;
    rested.happiness = 50.0;
    actions::start_play(&mut rested, &config.actions).expect("play");
    assert!(approx(rested.energy, 10.0), "energy: {}", rested.energy);
    assert!(approx(rested.happiness, 65.0), "happiness: {}", rested.happiness);
    assert_eq!(rested.experience, 5);
}

/// Rewards floor coins/experience at zero and clamp happiness.
#[test]
fn rewards_floor_and_clamp() {
    let mut pet = hatched(T0);
    pet.coins = 5;
    pet.experience = 3;
    pet.happiness = 4.0;
    pet.energy = 50.0;

    let loss = Reward { coins: -20, exp: -10, happiness: -10.0 };
    actions::apply_reward(&mut pet, loss, 8.0).expect("losing reward");

    assert_eq!(pet.coins, 0, "coins floor at zero");
    assert_eq!(pet.experience, 0, "experience floors at zero");
    assert_eq!(pet.happiness, 0.0, "happiness floors at zero");
    assert!(approx(pet.energy, 42.0), "energy cost: {}", pet.energy);

    let win = Reward { coins: 10, exp: 20, happiness: 10.0 };
    actions::apply_reward(&mut pet, win, 10.0).expect("winning reward");
    assert_eq!(pet.coins, 10);
    assert_eq!(pet.experience, 20);
}

/// Buying moves coins into inventory; short purses are rejected.
#[test]
fn buy_checks_funds() {
    let mut pet = hatched(T0);
    let mut inventory = InventoryCounts::starting();

    actions::buy(&mut pet, &mut inventory, ItemKind::Medicine, 10).expect("buy");
    assert_eq!(pet.coins, 40);
    assert_eq!(inventory.medicine, 3);

    pet.coins = 2;
    let err = actions::buy(&mut pet, &mut inventory, ItemKind::Food, 5);
    assert!(
        matches!(err, Err(GameError::InsufficientFunds { needed: 5, available: 2 })),
        "{err:?}"
    );
    assert_eq!(pet.coins, 2, "rejected buy spent coins");
    assert_eq!(inventory.food, 5);
}

/// Every care action refuses a deceased pet with a distinct reason.
#[test]
fn dead_pets_refuse_all_care() {
    let config = GameConfig::default();
    let mut pet = hatched(T0);
    pet.is_alive = false;
    let mut inventory = InventoryCounts::starting();
    let mut rng = care_rng();

    assert!(matches!(
        actions::feed(&mut pet, &mut inventory, &config.actions, &mut rng),
        Err(GameError::Deceased)
    ));
    assert!(matches!(
        actions::clean(&mut pet, &mut inventory, &config.actions),
        Err(GameError::Deceased)
    ));
    assert!(matches!(
        actions::treat(&mut pet, &mut inventory, &config.actions),
        Err(GameError::Deceased)
    ));
    assert!(matches!(
        actions::start_play(&mut pet, &config.actions),
        Err(GameError::Deceased)
    ));
    assert!(matches!(
        actions::apply_reward(&mut pet, Reward::default(), 0.0),
        Err(GameError::Deceased)
    ));
}
