//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation calls a platform RNG. All randomness
//! flows through GameRng streams derived from the single master seed, one
//! stream per concern. Each stream is seeded from
//! (master_seed XOR slot_index), so adding a new slot never disturbs
//! existing streams and every stream is reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG stream for a single concern.
pub struct GameRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl GameRng {
    /// Derive a stream from the master seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Roll a float in [lo, hi).
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

/// All RNG streams for a single game, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_slot(&self, slot: RngSlot) -> GameRng {
        GameRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable slot assignments. NEVER reorder or remove entries — only
/// append. Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngSlot {
    Care = 0,
    Events = 1,
    Mess = 2,
    // Add new slots here — append only.
}

impl RngSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Care => "care",
            Self::Events => "events",
            Self::Mess => "mess",
        }
    }
}
