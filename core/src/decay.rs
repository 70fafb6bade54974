//! The decay engine — one pure transformation that advances the pet by a
//! given number of nominal ticks.
//!
//! Handles, in order: stat decay, the health feedback loop,
//! critical-timer bookkeeping, death evaluation, and the derived
//! danger/mood classification. Invoked with `units = 1.0` by the periodic
//! tick and with a larger fractional value by offline catch-up; the
//! arithmetic is linear in `units`, while the critical-timer and death
//! checks use wall-clock `now_ms` and are evaluated once at the resulting
//! state.

use crate::{
    config::GameConfig,
    event::{DeathCause, PetEvent},
    pet::{DangerLevel, Mood, PetSnapshot, Stage},
    types::{DecayUnits, EpochMs},
};

/// Advance the snapshot by `units` nominal ticks ending at `now_ms`.
/// Dead, egg, and sleeping pets only get their update timestamp
/// refreshed — sleep recovery and hatching are separate processes.
pub fn advance(
    pet: &mut PetSnapshot,
    units: DecayUnits,
    now_ms: EpochMs,
    config: &GameConfig,
) -> Vec<PetEvent> {
    let mut events = Vec::new();

    if !pet.is_alive || pet.stage == Stage::Egg || pet.is_sleeping {
        pet.last_update_timestamp = now_ms;
        return events;
    }

    let d = &config.decay;
    pet.hunger = (pet.hunger - d.hunger_per_tick * units).max(0.0);
    pet.happiness = (pet.happiness - d.happiness_per_tick * units).max(0.0);
    pet.energy = (pet.energy - d.energy_per_tick * units).max(0.0);
    pet.cleanliness = (pet.cleanliness - d.cleanliness_per_tick * units).max(0.0);

    // Health feedback, reading the post-decay hunger/cleanliness.
    if pet.cleanliness < d.dirty_threshold {
        let loss = if pet.hunger < d.starving_threshold {
            d.dirty_starving_health_loss
        } else {
            d.dirty_health_loss
        };
        pet.health = (pet.health - loss * units).max(0.0);
    } else if pet.cleanliness > d.tidy_threshold && pet.health < 100.0 {
        pet.health = (pet.health + d.tidy_health_regen * units).min(100.0);
    }
    // Bottomed-out hunger eats health on top of the cleanliness rule.
    if pet.hunger == 0.0 {
        pet.health = (pet.health - d.starvation_health_loss * units).max(0.0);
    }

    update_critical_timers(pet, now_ms, config);

    if let Some(cause) = death_due(pet, now_ms, config) {
        pet.is_alive = false;
        events.push(PetEvent::PetDied { cause });
    }

    let previous = pet.danger_level;
    pet.danger_level = derive_danger(pet, config);
    if pet.is_alive && pet.danger_level != previous {
        events.push(PetEvent::DangerLevelChanged {
            from: previous,
            to: pet.danger_level,
        });
        if pet.danger_level > previous {
            log::warn!(
                "danger escalated {:?} -> {:?} (hunger={:.1} health={:.1})",
                previous,
                pet.danger_level,
                pet.hunger,
                pet.health
            );
        }
    }

    let (mood, is_sick) = derive_mood(pet, config);
    pet.mood = mood;
    pet.is_sick = is_sick;

    pet.last_update_timestamp = now_ms;
    events
}

/// Arm or clear the three critical-condition timers against wall clock.
fn update_critical_timers(pet: &mut PetSnapshot, now_ms: EpochMs, config: &GameConfig) {
    let g = &config.danger;

    if pet.hunger == 0.0 {
        pet.critical_hunger_started_at.get_or_insert(now_ms);
    } else {
        pet.critical_hunger_started_at = None;
    }

    if pet.health == 0.0 {
        pet.critical_health_started_at.get_or_insert(now_ms);
    } else {
        pet.critical_health_started_at = None;
    }

    if pet.hunger < g.combo_threshold && pet.health < g.combo_threshold {
        pet.critical_combo_started_at.get_or_insert(now_ms);
    } else {
        pet.critical_combo_started_at = None;
    }
}

/// Which sustained condition, if any, has outlived its grace period.
fn death_due(pet: &PetSnapshot, now_ms: EpochMs, config: &GameConfig) -> Option<DeathCause> {
    let g = &config.danger;
    if let Some(t) = pet.critical_hunger_started_at {
        if now_ms - t >= g.hunger_grace_ms {
            return Some(DeathCause::Starvation);
        }
    }
    if let Some(t) = pet.critical_health_started_at {
        if now_ms - t >= g.health_grace_ms {
            return Some(DeathCause::HealthCollapse);
        }
    }
    if let Some(t) = pet.critical_combo_started_at {
        if now_ms - t >= g.combo_grace_ms {
            return Some(DeathCause::CriticalCondition);
        }
    }
    None
}

/// Highest-severity-wins classification of post-decay hunger/health.
fn derive_danger(pet: &PetSnapshot, config: &GameConfig) -> DangerLevel {
    let g = &config.danger;
    if pet.hunger == 0.0 || pet.health == 0.0 {
        DangerLevel::Dying
    } else if pet.hunger < g.critical_threshold || pet.health < g.critical_threshold {
        DangerLevel::Critical
    } else if pet.hunger < g.alert_threshold || pet.health < g.alert_threshold {
        DangerLevel::Alert
    } else {
        DangerLevel::Normal
    }
}

/// Priority-ordered mood derivation; first match wins.
pub fn derive_mood(pet: &PetSnapshot, config: &GameConfig) -> (Mood, bool) {
    let m = &config.mood;
    match pet.danger_level {
        DangerLevel::Dying => return (Mood::Agonizing, true),
        DangerLevel::Critical => return (Mood::Sick, true),
        _ => {}
    }
    if pet.health < m.sick_health || pet.cleanliness < m.sick_cleanliness {
        return (Mood::Sick, true);
    }
    if pet.happiness > m.playful_happiness
        && pet.energy > m.playful_energy
        && pet.hunger > m.playful_hunger
    {
        return (Mood::Playful, false);
    }

    // Among the stats below their threshold, the lowest absolute value
    // wins; ties keep the first in hunger → energy → happiness order.
    let candidates = [
        (pet.hunger, m.hungry_threshold, Mood::Hungry),
        (pet.energy, m.tired_threshold, Mood::Tired),
        (pet.happiness, m.sad_threshold, Mood::Sad),
    ];
    let mut lowest: Option<(f64, Mood)> = None;
    for (value, threshold, mood) in candidates {
        if value < threshold && lowest.map_or(true, |(best, _)| value < best) {
            lowest = Some((value, mood));
        }
    }
    match lowest {
        Some((_, mood)) => (mood, false),
        None => (Mood::Content, false),
    }
}
