//! Level-ups and stage evolution, settled after every experience change.

use crate::{
    config::ProgressionConfig,
    event::PetEvent,
    pet::{PetSnapshot, Stage},
};

/// Drain banked experience into levels, then evolve the stage if a
/// threshold was crossed. A loop rather than a single check: one large
/// experience grant can be worth several levels.
///
/// Eggs never evolve here — hatching is a separate, manually triggered
/// event.
pub fn settle(pet: &mut PetSnapshot, config: &ProgressionConfig) -> Vec<PetEvent> {
    let mut events = Vec::new();

    while pet.experience >= pet.level as i64 * config.exp_per_level {
        pet.experience -= pet.level as i64 * config.exp_per_level;
        pet.level += 1;
        pet.coins += config.level_up_coins;
        events.push(PetEvent::LevelledUp {
            level: pet.level,
            coins_awarded: config.level_up_coins,
        });
        log::debug!("level up -> {} (exp left {})", pet.level, pet.experience);
    }

    if pet.stage == Stage::Baby && pet.level >= config.teen_level {
        pet.stage = Stage::Teen;
        events.push(PetEvent::StageEvolved { stage: Stage::Teen });
    }
    if pet.stage == Stage::Teen && pet.level >= config.adult_level {
        pet.stage = Stage::Adult;
        events.push(PetEvent::StageEvolved { stage: Stage::Adult });
    }

    events
}
