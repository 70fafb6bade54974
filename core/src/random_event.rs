//! Random happenings — small windfalls and mishaps on an irregular
//! cadence.
//!
//! Eligibility opens 5 minutes after the previous event and the trigger
//! probability climbs until the 15-minute mark; selection walks the
//! cumulative probability of the configured table, most-probable first.
//! A roll can land past every entry, in which case nothing happens this
//! check.

use crate::{
    config::{EventEffects, EventTimingConfig, RandomEventConfig},
    pet::{InventoryCounts, PetSnapshot},
    rng::GameRng,
    types::EpochMs,
};

/// Roll whether an event should fire, given how long since the last one.
pub fn should_trigger(
    since_last_ms: EpochMs,
    timing: &EventTimingConfig,
    rng: &mut GameRng,
) -> bool {
    if since_last_ms < timing.min_gap_ms {
        return false;
    }
    let window = (timing.max_gap_ms - timing.min_gap_ms).max(1) as f64;
    let elapsed_factor = ((since_last_ms - timing.min_gap_ms) as f64 / window).clamp(0.0, 1.0);
    let probability = timing.base_probability + elapsed_factor * timing.max_probability_boost;
    rng.chance(probability)
}

/// Pick an event from the table by cumulative probability.
pub fn pick<'a>(
    table: &'a [RandomEventConfig],
    rng: &mut GameRng,
) -> Option<&'a RandomEventConfig> {
    let mut sorted: Vec<&RandomEventConfig> = table.iter().collect();
    sorted.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let roll = rng.next_f64();
    let mut cumulative = 0.0;
    for event in sorted {
        cumulative += event.probability;
        if roll <= cumulative {
            return Some(event);
        }
    }
    None
}

/// Apply an event's effects through the same clamped paths care actions
/// use. Coins and experience floor at zero.
pub fn apply(pet: &mut PetSnapshot, inventory: &mut InventoryCounts, effects: &EventEffects) {
    pet.coins = (pet.coins + effects.coins).max(0);
    pet.experience = (pet.experience + effects.exp).max(0);
    pet.happiness = (pet.happiness + effects.happiness).clamp(0.0, 100.0);
    pet.energy = (pet.energy + effects.energy).clamp(0.0, 100.0);
    pet.hunger = (pet.hunger + effects.hunger).clamp(0.0, 100.0);
    pet.cleanliness = (pet.cleanliness + effects.cleanliness).clamp(0.0, 100.0);
    pet.health = (pet.health + effects.health).clamp(0.0, 100.0);
    if let Some(item) = effects.item {
        inventory.add(item, 1);
    }
}
