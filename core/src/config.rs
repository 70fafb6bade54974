//! Product constants for the pet lifecycle, expressed as configuration.
//!
//! Decay rates, danger thresholds, and death grace periods are tuning
//! knobs, not invariants of the design: `GameConfig::default()` carries
//! the shipped values, and `GameConfig::load()` lets a JSON file override
//! any subset of them (every struct deserializes with defaults, so a
//! partial file is fine).

use crate::pet::ItemKind;
use crate::types::EpochMs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Nominal period of one decay tick.
    pub tick_interval_ms: EpochMs,
    pub hunger_per_tick: f64,
    pub happiness_per_tick: f64,
    pub energy_per_tick: f64,
    pub cleanliness_per_tick: f64,
    /// Below this cleanliness the pet starts losing health.
    pub dirty_threshold: f64,
    pub dirty_health_loss: f64,
    /// Health loss per tick when dirty AND hungrier than `starving_threshold`.
    pub dirty_starving_health_loss: f64,
    pub starving_threshold: f64,
    /// Above this cleanliness, health regenerates.
    pub tidy_threshold: f64,
    pub tidy_health_regen: f64,
    /// Extra health loss per tick while hunger sits at exactly zero.
    pub starvation_health_loss: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 30_000,
            hunger_per_tick: 2.0,
            happiness_per_tick: 1.5,
            energy_per_tick: 1.0,
            cleanliness_per_tick: 0.8,
            dirty_threshold: 20.0,
            dirty_health_loss: 1.5,
            dirty_starving_health_loss: 3.0,
            starving_threshold: 30.0,
            tidy_threshold: 50.0,
            tidy_health_regen: 0.5,
            starvation_health_loss: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DangerConfig {
    pub alert_threshold: f64,
    pub critical_threshold: f64,
    /// Hunger + health both below this arm the combined critical timer.
    pub combo_threshold: f64,
    /// Grace period at zero hunger before death.
    pub hunger_grace_ms: EpochMs,
    /// Grace period at zero health before death.
    pub health_grace_ms: EpochMs,
    /// Grace period in the combined near-zero condition before death.
    pub combo_grace_ms: EpochMs,
}

impl Default for DangerConfig {
    fn default() -> Self {
        Self {
            alert_threshold: 30.0,
            critical_threshold: 10.0,
            combo_threshold: 10.0,
            hunger_grace_ms: 7_200_000,
            health_grace_ms: 1_800_000,
            combo_grace_ms: 1_800_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    pub hungry_threshold: f64,
    pub tired_threshold: f64,
    pub sad_threshold: f64,
    pub playful_happiness: f64,
    pub playful_energy: f64,
    pub playful_hunger: f64,
    pub sick_health: f64,
    pub sick_cleanliness: f64,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            hungry_threshold: 30.0,
            tired_threshold: 30.0,
            sad_threshold: 40.0,
            playful_happiness: 80.0,
            playful_energy: 70.0,
            playful_hunger: 70.0,
            sick_health: 30.0,
            sick_cleanliness: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepConfig {
    /// Full recovery window.
    pub duration_ms: EpochMs,
    /// Live-update cadence while sleeping.
    pub tick_interval_ms: EpochMs,
    /// One-time happiness bonus on full recovery.
    pub happiness_bonus: f64,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300_000,
            tick_interval_ms: 1_000,
            happiness_bonus: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    pub feed_hunger: f64,
    pub feed_happiness: f64,
    pub feed_mess_chance: f64,
    pub feed_mess_penalty: f64,
    pub feed_exp: i64,
    pub clean_happiness: f64,
    pub clean_exp: i64,
    pub medicine_health: f64,
    pub medicine_cleanliness: f64,
    /// Post-medicine "still sick" bands.
    pub medicine_sick_health: f64,
    pub medicine_sick_cleanliness: f64,
    pub medicine_exp: i64,
    pub treat_happiness: f64,
    pub treat_hunger: f64,
    pub treat_exp: i64,
    pub play_min_energy: f64,
    pub play_energy_cost: f64,
    pub play_happiness: f64,
    pub play_exp: i64,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            feed_hunger: 35.0,
            feed_happiness: 10.0,
            feed_mess_chance: 0.5,
            feed_mess_penalty: 10.0,
            feed_exp: 10,
            clean_happiness: 15.0,
            clean_exp: 8,
            medicine_health: 40.0,
            medicine_cleanliness: 30.0,
            medicine_sick_health: 50.0,
            medicine_sick_cleanliness: 30.0,
            medicine_exp: 20,
            treat_happiness: 30.0,
            treat_hunger: 10.0,
            treat_exp: 15,
            play_min_energy: 30.0,
            play_energy_cost: 20.0,
            play_happiness: 15.0,
            play_exp: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Experience needed per level is `level * exp_per_level`.
    pub exp_per_level: i64,
    pub level_up_coins: i64,
    pub teen_level: u32,
    pub adult_level: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            exp_per_level: 100,
            level_up_coins: 10,
            teen_level: 5,
            adult_level: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessConfig {
    /// Cleanliness drop since the last spawn that produces a dropping.
    pub spawn_drop_threshold: f64,
    pub clean_reward_coins: i64,
}

impl Default for MessConfig {
    fn default() -> Self {
        Self {
            spawn_drop_threshold: 15.0,
            clean_reward_coins: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopItemConfig {
    pub item: ItemKind,
    pub label: String,
    pub price: i64,
}

fn default_shop() -> Vec<ShopItemConfig> {
    vec![
        ShopItemConfig { item: ItemKind::Food, label: "Food".into(), price: 5 },
        ShopItemConfig { item: ItemKind::Medicine, label: "Medicine".into(), price: 10 },
        ShopItemConfig { item: ItemKind::Treats, label: "Treats".into(), price: 8 },
        ShopItemConfig { item: ItemKind::Soap, label: "Soap".into(), price: 3 },
    ]
}

// ── Random events ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Stat/resource deltas a random event applies. All optional; stats are
/// clamped through the same paths as care actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventEffects {
    pub coins: i64,
    pub exp: i64,
    pub happiness: f64,
    pub energy: f64,
    pub hunger: f64,
    pub cleanliness: f64,
    pub health: f64,
    pub item: Option<ItemKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomEventConfig {
    pub event_id: String,
    pub label: String,
    pub description: String,
    pub rarity: Rarity,
    pub probability: f64,
    #[serde(default)]
    pub effects: EventEffects,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventTimingConfig {
    /// How often eligibility is checked.
    pub check_interval_ms: EpochMs,
    /// No event fires within this gap of the previous one.
    pub min_gap_ms: EpochMs,
    /// Trigger probability tops out once the gap reaches this.
    pub max_gap_ms: EpochMs,
    pub base_probability: f64,
    pub max_probability_boost: f64,
}

impl Default for EventTimingConfig {
    fn default() -> Self {
        Self {
            check_interval_ms: 60_000,
            min_gap_ms: 300_000,
            max_gap_ms: 900_000,
            base_probability: 0.1,
            max_probability_boost: 0.4,
        }
    }
}

fn event(
    event_id: &str,
    label: &str,
    description: &str,
    rarity: Rarity,
    probability: f64,
    effects: EventEffects,
) -> RandomEventConfig {
    RandomEventConfig {
        event_id: event_id.into(),
        label: label.into(),
        description: description.into(),
        rarity,
        probability,
        effects,
    }
}

fn default_event_table() -> Vec<RandomEventConfig> {
    use Rarity::*;
    vec![
        event("found_coin", "Found Coin", "Your pet found a shiny coin on the ground!",
            Common, 0.15, EventEffects { coins: 10, ..Default::default() }),
        event("visitor", "Friendly Visitor", "A friend came over to play! Your pet is delighted.",
            Common, 0.12, EventEffects { happiness: 20.0, energy: -10.0, ..Default::default() }),
        event("nap_time", "Spontaneous Nap", "Your pet dozed off in the sun.",
            Common, 0.10, EventEffects { energy: 30.0, hunger: -15.0, ..Default::default() }),
        event("secret_snack", "Secret Snack", "Your pet found some hidden food.",
            Common, 0.10, EventEffects { hunger: 25.0, happiness: 15.0, ..Default::default() }),
        event("rainy_day", "Rainy Day", "It's raining! Your pet got a little muddy.",
            Common, 0.08, EventEffects { cleanliness: -20.0, happiness: -10.0, ..Default::default() }),
        event("energy_burst", "Energy Burst", "Your pet is feeling super active!",
            Uncommon, 0.07, EventEffects { energy: 40.0, happiness: 20.0, ..Default::default() }),
        event("bad_dream", "Bad Dream", "Your pet had a nightmare...",
            Uncommon, 0.06, EventEffects { happiness: -25.0, energy: -15.0, ..Default::default() }),
        event("spa_day", "Spa Day", "Your pet got a free visit to the pet spa.",
            Uncommon, 0.05, EventEffects { cleanliness: 50.0, happiness: 30.0, health: 20.0, ..Default::default() }),
        event("treasure", "Buried Treasure", "Your pet dug up a small treasure!",
            Rare, 0.05, EventEffects { coins: 50, happiness: 30.0, ..Default::default() }),
        event("mystery_gift", "Mystery Gift", "Someone left a gift for your pet!",
            Rare, 0.04, EventEffects { coins: 30, happiness: 25.0, item: Some(ItemKind::Food), ..Default::default() }),
        event("rainbow", "Rainbow", "A beautiful rainbow appears in the sky!",
            Rare, 0.03, EventEffects { happiness: 50.0, exp: 20, ..Default::default() }),
        event("meteor", "Meteorite", "A tiny meteorite landed nearby. What a scare!",
            Rare, 0.02, EventEffects { happiness: -30.0, energy: -20.0, coins: 80, ..Default::default() }),
        event("shooting_star", "Shooting Star", "Your pet saw a shooting star and made a wish.",
            Epic, 0.01, EventEffects { coins: 100, exp: 50, happiness: 40.0, ..Default::default() }),
        event("surprise_party", "Surprise Party", "It's a special day! Birthday party!",
            Epic, 0.01, EventEffects { coins: 75, exp: 100, happiness: 50.0, item: Some(ItemKind::Treats), ..Default::default() }),
        event("lottery", "Lottery", "Your pet won the local lottery!",
            Legendary, 0.005, EventEffects { coins: 250, exp: 150, ..Default::default() }),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub decay: DecayConfig,
    pub danger: DangerConfig,
    pub mood: MoodConfig,
    pub sleep: SleepConfig,
    pub actions: ActionConfig,
    pub progression: ProgressionConfig,
    pub mess: MessConfig,
    pub event_timing: EventTimingConfig,
    #[serde(default = "default_shop")]
    pub shop: Vec<ShopItemConfig>,
    #[serde(default = "default_event_table")]
    pub events: Vec<RandomEventConfig>,
    /// Cosmetic age refresh cadence.
    pub age_refresh_interval_ms: EpochMs,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            decay: DecayConfig::default(),
            danger: DangerConfig::default(),
            mood: MoodConfig::default(),
            sleep: SleepConfig::default(),
            actions: ActionConfig::default(),
            progression: ProgressionConfig::default(),
            mess: MessConfig::default(),
            event_timing: EventTimingConfig::default(),
            shop: default_shop(),
            events: default_event_table(),
            age_refresh_interval_ms: 3_600_000,
        }
    }
}

impl GameConfig {
    /// Load overrides from a JSON file. Absent keys keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GameConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn shop_price(&self, item: ItemKind) -> Option<i64> {
        self.shop.iter().find(|s| s.item == item).map(|s| s.price)
    }
}
