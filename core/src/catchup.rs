//! Offline catch-up — reconcile a loaded snapshot with the wall-clock
//! gap since it was last updated, in one shot.
//!
//! The gap is converted to fractional decay units and applied through a
//! single `decay::advance` call instead of replaying per-tick: the stat
//! arithmetic is linear in units, so the end state is identical, and the
//! threshold-based critical-timer/death logic is evaluated once at the
//! final state. A pet that would have crossed and then recovered from a
//! critical band mid-gap is not distinguished from one that stayed safe
//! throughout; only the end state matters.

use crate::{
    config::GameConfig,
    decay,
    event::PetEvent,
    pet::PetSnapshot,
    sleep,
    types::EpochMs,
};

/// Bring a freshly loaded snapshot up to `now_ms`.
pub fn reconcile(pet: &mut PetSnapshot, now_ms: EpochMs, config: &GameConfig) -> Vec<PetEvent> {
    // Old or truncated saves carry zeroed timestamps; back-fill them to
    // now so the gap computes as zero instead of half a century.
    if pet.birth_timestamp == 0 {
        pet.birth_timestamp = now_ms;
    }
    if pet.last_update_timestamp == 0 {
        pet.last_update_timestamp = now_ms;
    }
    pet.age_days = pet.age_days_at(now_ms);

    let elapsed_ms = (now_ms - pet.last_update_timestamp).max(0);
    log::debug!(
        "offline catch-up: {elapsed_ms}ms since last update (sleeping={})",
        pet.is_sleeping
    );

    let mut events = Vec::new();
    if pet.is_sleeping {
        // Normal decay is suspended; reconstruct recovery purely from the
        // persisted sleep bookkeeping. An already-elapsed window snaps
        // energy to 100 without replaying the interpolation.
        if let Some(event) = sleep::apply_progress(pet, now_ms, &config.sleep) {
            events.push(event);
        }
        pet.last_update_timestamp = now_ms;
    } else {
        let elapsed_minutes = elapsed_ms as f64 / 60_000.0;
        let tick_minutes = config.decay.tick_interval_ms as f64 / 60_000.0;
        let units = elapsed_minutes / tick_minutes;
        // advance() guards egg/dead itself and refreshes the timestamp.
        events = decay::advance(pet, units, now_ms, config);
    }
    events
}
