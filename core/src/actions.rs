//! Care actions — discrete, atomic mutations of the pet snapshot.
//!
//! Every action validates all of its preconditions before touching any
//! state, so a rejected action leaves pet and inventory untouched. The
//! engine wakes the pet (cancelling sleep timers) between validation and
//! mutation; these functions never look at sleep state themselves.

use crate::{
    config::ActionConfig,
    error::{GameError, GameResult},
    event::PetEvent,
    pet::{InventoryCounts, ItemKind, Mood, PetSnapshot},
    rng::GameRng,
};
use serde::{Deserialize, Serialize};

/// A minigame outcome handed back by the external minigame subsystem.
/// Any field may be negative for losses.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Reward {
    pub coins: i64,
    pub exp: i64,
    pub happiness: f64,
}

pub fn ensure_alive(pet: &PetSnapshot) -> GameResult<()> {
    if pet.is_alive {
        Ok(())
    } else {
        Err(GameError::Deceased)
    }
}

pub fn ensure_stock(inventory: &InventoryCounts, item: ItemKind) -> GameResult<()> {
    if inventory.count(item) > 0 {
        Ok(())
    } else {
        Err(GameError::OutOfStock(item))
    }
}

pub fn ensure_energy(pet: &PetSnapshot, required: f64) -> GameResult<()> {
    if pet.energy >= required {
        Ok(())
    } else {
        Err(GameError::InsufficientEnergy {
            required,
            available: pet.energy,
        })
    }
}

/// Feed: one food, hunger and happiness up, a 50% chance of making a
/// mess on the way down.
pub fn feed(
    pet: &mut PetSnapshot,
    inventory: &mut InventoryCounts,
    config: &ActionConfig,
    rng: &mut GameRng,
) -> GameResult<PetEvent> {
    ensure_alive(pet)?;
    ensure_stock(inventory, ItemKind::Food)?;

    inventory.consume(ItemKind::Food);
    pet.hunger = (pet.hunger + config.feed_hunger).min(100.0);
    pet.happiness = (pet.happiness + config.feed_happiness).min(100.0);
    let messy = rng.chance(config.feed_mess_chance);
    if messy {
        pet.cleanliness = (pet.cleanliness - config.feed_mess_penalty).max(0.0);
    }
    pet.experience += config.feed_exp;
    Ok(PetEvent::Fed { messy })
}

/// Clean: one soap, cleanliness restored outright.
pub fn clean(
    pet: &mut PetSnapshot,
    inventory: &mut InventoryCounts,
    config: &ActionConfig,
) -> GameResult<PetEvent> {
    ensure_alive(pet)?;
    ensure_stock(inventory, ItemKind::Soap)?;

    inventory.consume(ItemKind::Soap);
    pet.cleanliness = 100.0;
    pet.happiness = (pet.happiness + config.clean_happiness).min(100.0);
    pet.experience += config.clean_exp;
    Ok(PetEvent::Cleaned)
}

/// Medicine: one dose, health and cleanliness restored; the pet counts
/// as cured only once both are out of their sick bands.
pub fn medicate(
    pet: &mut PetSnapshot,
    inventory: &mut InventoryCounts,
    config: &ActionConfig,
) -> GameResult<PetEvent> {
    ensure_alive(pet)?;
    ensure_stock(inventory, ItemKind::Medicine)?;

    inventory.consume(ItemKind::Medicine);
    pet.health = (pet.health + config.medicine_health).min(100.0);
    pet.cleanliness = (pet.cleanliness + config.medicine_cleanliness).min(100.0);
    let still_sick = pet.health < config.medicine_sick_health
        || pet.cleanliness < config.medicine_sick_cleanliness;
    pet.is_sick = still_sick;
    pet.mood = if still_sick { Mood::Sick } else { Mood::Content };
    pet.experience += config.medicine_exp;
    Ok(PetEvent::Medicated { cured: !still_sick })
}

/// Treat: one treat, a happiness spike with a small snack on the side.
pub fn treat(
    pet: &mut PetSnapshot,
    inventory: &mut InventoryCounts,
    config: &ActionConfig,
) -> GameResult<PetEvent> {
    ensure_alive(pet)?;
    ensure_stock(inventory, ItemKind::Treats)?;

    inventory.consume(ItemKind::Treats);
    pet.happiness = (pet.happiness + config.treat_happiness).min(100.0);
    pet.hunger = (pet.hunger + config.treat_hunger).min(100.0);
    pet.experience += config.treat_exp;
    Ok(PetEvent::TreatGiven)
}

/// Start a play session. Gated on energy; the minigame itself runs
/// externally and its win/lose reward comes back via `apply_reward`.
pub fn start_play(pet: &mut PetSnapshot, config: &ActionConfig) -> GameResult<PetEvent> {
    ensure_alive(pet)?;
    ensure_energy(pet, config.play_min_energy)?;

    pet.energy = (pet.energy - config.play_energy_cost).max(0.0);
    pet.happiness = (pet.happiness + config.play_happiness).min(100.0);
    pet.experience += config.play_exp;
    Ok(PetEvent::PlayStarted)
}

/// Apply a minigame reward. Coins and experience floor at zero,
/// happiness clamps; the energy cost is whatever the caller charges for
/// that particular game.
pub fn apply_reward(
    pet: &mut PetSnapshot,
    reward: Reward,
    energy_cost: f64,
) -> GameResult<PetEvent> {
    ensure_alive(pet)?;

    pet.coins = (pet.coins + reward.coins).max(0);
    pet.experience = (pet.experience + reward.exp).max(0);
    pet.happiness = (pet.happiness + reward.happiness).clamp(0.0, 100.0);
    pet.energy = (pet.energy - energy_cost).max(0.0);
    Ok(PetEvent::RewardApplied {
        coins: reward.coins,
        exp: reward.exp,
    })
}

/// Buy one item at the given catalog price.
pub fn buy(
    pet: &mut PetSnapshot,
    inventory: &mut InventoryCounts,
    item: ItemKind,
    price: i64,
) -> GameResult<PetEvent> {
    if pet.coins < price {
        return Err(GameError::InsufficientFunds {
            needed: price,
            available: pet.coins,
        });
    }
    pet.coins -= price;
    inventory.add(item, 1);
    Ok(PetEvent::ItemPurchased { item, price })
}
