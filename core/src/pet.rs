//! The pet snapshot — the sole mutable entity of the simulation.
//!
//! RULES:
//!   - Every core stat stays inside [0, 100] after any operation.
//!   - `is_alive` flips true→false exactly once, never back.
//!   - `stage` only advances (egg → baby → teen → adult).
//!   - Persisted field names are camelCase so saves stay a flat, readable
//!     JSON record; missing fields deserialize to safe defaults instead of
//!     rejecting the save.

use crate::types::EpochMs;
use serde::{Deserialize, Serialize};

/// Cosmetic only — never read by the lifecycle logic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Cat,
    Dog,
}

/// Cosmetic only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColorVariant {
    White,
    Black,
    Brown,
}

/// Life-cycle phase. Ordered: comparisons rely on declaration order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Egg,
    Baby,
    Teen,
    Adult,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Egg => "egg",
            Self::Baby => "baby",
            Self::Teen => "teen",
            Self::Adult => "adult",
        }
    }
}

/// Derived disposition, recomputed on every decay evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Content,
    Playful,
    Hungry,
    Tired,
    Sad,
    Sick,
    Agonizing,
}

impl Default for Mood {
    fn default() -> Self {
        Self::Content
    }
}

/// Derived severity classification driving mood and UI urgency.
/// Ordered: comparisons rely on declaration order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DangerLevel {
    Normal,
    Alert,
    Critical,
    Dying,
}

impl Default for DangerLevel {
    fn default() -> Self {
        Self::Normal
    }
}

/// Consumable item kinds the shop sells and the inventory tracks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Food,
    Medicine,
    Treats,
    Soap,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Medicine => "medicine",
            Self::Treats => "treats",
            Self::Soap => "soap",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PetSnapshot {
    pub name: String,
    pub species: Species,
    pub color_variant: ColorVariant,

    // Core stats, each clamped to [0, 100].
    pub hunger: f64,
    pub happiness: f64,
    pub energy: f64,
    pub cleanliness: f64,
    pub health: f64,

    // Progression
    pub stage: Stage,
    pub level: u32,
    pub experience: i64,

    // Vitality
    pub is_alive: bool,
    pub is_sick: bool,
    pub mood: Mood,
    pub danger_level: DangerLevel,

    // Economy
    pub coins: i64,

    /// Whole days since hatching; recomputed from `birth_timestamp`.
    pub age_days: i64,

    // Timestamps (epoch milliseconds). Zero means "unset" on old saves
    // and is back-filled to `now` during offline catch-up.
    pub birth_timestamp: EpochMs,
    pub last_update_timestamp: EpochMs,

    // Critical-condition timers. Null means "not currently in that
    // condition"; each is set the instant its condition starts and
    // cleared the instant it ends.
    pub critical_hunger_started_at: Option<EpochMs>,
    pub critical_health_started_at: Option<EpochMs>,
    pub critical_combo_started_at: Option<EpochMs>,

    // Sleep sub-state
    pub is_sleeping: bool,
    pub sleep_started_at: Option<EpochMs>,
    pub sleep_start_energy: Option<f64>,
    /// Latches the one-time full-recovery happiness bonus across reloads.
    pub sleep_bonus_granted: bool,
}

impl Default for PetSnapshot {
    fn default() -> Self {
        Self {
            name: String::new(),
            species: Species::Cat,
            color_variant: ColorVariant::White,
            hunger: 100.0,
            happiness: 100.0,
            energy: 100.0,
            cleanliness: 100.0,
            health: 100.0,
            stage: Stage::Egg,
            level: 1,
            experience: 0,
            is_alive: true,
            is_sick: false,
            mood: Mood::Content,
            danger_level: DangerLevel::Normal,
            coins: 50,
            age_days: 0,
            birth_timestamp: 0,
            last_update_timestamp: 0,
            critical_hunger_started_at: None,
            critical_health_started_at: None,
            critical_combo_started_at: None,
            is_sleeping: false,
            sleep_started_at: None,
            sleep_start_energy: None,
            sleep_bonus_granted: false,
        }
    }
}

impl PetSnapshot {
    /// A freshly named egg with full stats and the starting purse.
    pub fn new_egg(
        name: impl Into<String>,
        species: Species,
        color_variant: ColorVariant,
        now_ms: EpochMs,
    ) -> Self {
        Self {
            name: name.into(),
            species,
            color_variant,
            birth_timestamp: now_ms,
            last_update_timestamp: now_ms,
            ..Self::default()
        }
    }

    /// Whole days lived as of `now_ms`.
    pub fn age_days_at(&self, now_ms: EpochMs) -> i64 {
        (now_ms - self.birth_timestamp).max(0) / 86_400_000
    }
}

/// Consumable counts. Missing fields on old saves default to zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryCounts {
    pub food: u32,
    pub medicine: u32,
    pub treats: u32,
    pub soap: u32,
}

impl InventoryCounts {
    /// The starting pantry for a new game.
    pub fn starting() -> Self {
        Self {
            food: 5,
            medicine: 2,
            treats: 1,
            soap: 3,
        }
    }

    pub fn count(&self, item: ItemKind) -> u32 {
        match item {
            ItemKind::Food => self.food,
            ItemKind::Medicine => self.medicine,
            ItemKind::Treats => self.treats,
            ItemKind::Soap => self.soap,
        }
    }

    pub fn add(&mut self, item: ItemKind, n: u32) {
        let slot = self.slot_mut(item);
        *slot = slot.saturating_add(n);
    }

    /// Take one of `item`; false if none left.
    pub fn consume(&mut self, item: ItemKind) -> bool {
        let slot = self.slot_mut(item);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    fn slot_mut(&mut self, item: ItemKind) -> &mut u32 {
        match item {
            ItemKind::Food => &mut self.food,
            ItemKind::Medicine => &mut self.medicine,
            ItemKind::Treats => &mut self.treats,
            ItemKind::Soap => &mut self.soap,
        }
    }
}
