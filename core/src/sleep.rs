//! The sleep sub-process — timed energy recovery, decoupled from decay.
//!
//! Recovery is a pure function of (sleep_started_at, sleep_start_energy,
//! now): no accumulator, so a reloaded or offline pet reconstructs the
//! exact same energy value the live 1-second ticker would have shown.
//! Sleep never auto-ends; only an explicit wake (or a care action, which
//! wakes first) clears it.

use crate::{
    config::SleepConfig,
    error::{GameError, GameResult},
    event::PetEvent,
    pet::PetSnapshot,
    types::EpochMs,
};

/// Energy after `elapsed_ms` of a sleep that began at `start_energy`.
/// Linear toward 100 over the recovery window, then flat.
pub fn energy_at(start_energy: f64, elapsed_ms: EpochMs, duration_ms: EpochMs) -> f64 {
    let progress = (elapsed_ms as f64 / duration_ms as f64).clamp(0.0, 1.0);
    (start_energy + (100.0 - start_energy) * progress).min(100.0)
}

/// Begin sleeping. Rejects a dead pet and a pet already asleep —
/// restarting sleep would silently lose recovery progress.
pub fn start(pet: &mut PetSnapshot, now_ms: EpochMs) -> GameResult<PetEvent> {
    if !pet.is_alive {
        return Err(GameError::Deceased);
    }
    if pet.is_sleeping {
        return Err(GameError::AlreadySleeping);
    }
    pet.is_sleeping = true;
    pet.sleep_started_at = Some(now_ms);
    pet.sleep_start_energy = Some(pet.energy);
    pet.sleep_bonus_granted = false;
    Ok(PetEvent::SleepStarted)
}

/// Re-evaluate recovery at `now_ms`. Returns the completion event the
/// first time the full window has elapsed; the happiness bonus is
/// latched so later evaluations (live ticks, reloads) never re-grant it.
pub fn apply_progress(
    pet: &mut PetSnapshot,
    now_ms: EpochMs,
    config: &SleepConfig,
) -> Option<PetEvent> {
    if !pet.is_sleeping {
        return None;
    }
    // A sleeping save missing its bookkeeping (hand-edited or truncated)
    // restarts recovery from now rather than rejecting the load.
    let started = *pet.sleep_started_at.get_or_insert(now_ms);
    let start_energy = *pet.sleep_start_energy.get_or_insert(pet.energy);

    let elapsed = now_ms - started;
    if elapsed >= config.duration_ms {
        pet.energy = 100.0;
        if !pet.sleep_bonus_granted {
            pet.sleep_bonus_granted = true;
            pet.happiness = (pet.happiness + config.happiness_bonus).min(100.0);
            return Some(PetEvent::SleepCompleted);
        }
        None
    } else {
        pet.energy = energy_at(start_energy, elapsed, config.duration_ms);
        None
    }
}

/// End sleep and clear its sub-state. No-op when awake.
pub fn wake(pet: &mut PetSnapshot) -> Option<PetEvent> {
    if !pet.is_sleeping {
        return None;
    }
    pet.is_sleeping = false;
    pet.sleep_started_at = None;
    pet.sleep_start_energy = None;
    pet.sleep_bonus_granted = false;
    Some(PetEvent::Woken)
}
