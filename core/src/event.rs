//! Everything user-relevant the simulation emits.
//!
//! Events are the engine's only outward channel: each one is appended to
//! the persistent event log and, when it carries a user-facing message,
//! forwarded to the notification sink. Variants are added over time —
//! never removed or reordered.

use crate::{
    pet::{DangerLevel, ItemKind, Stage},
    types::{EpochMs, SaveId},
};
use serde::{Deserialize, Serialize};

/// How a notification should be presented. The sink owns display and
/// dismissal timing; the core only tags severity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

/// Which sustained condition crossed its grace period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Starvation,
    HealthCollapse,
    CriticalCondition,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PetEvent {
    Hatched { name: String },
    Fed { messy: bool },
    Cleaned,
    Medicated { cured: bool },
    TreatGiven,
    PlayStarted,
    SleepStarted,
    SleepCompleted,
    Woken,
    LevelledUp { level: u32, coins_awarded: i64 },
    StageEvolved { stage: Stage },
    DangerLevelChanged { from: DangerLevel, to: DangerLevel },
    PetDied { cause: DeathCause },
    RandomEventOccurred { event_id: String, description: String },
    DroppingAppeared { dropping_id: String },
    DroppingCleaned { coins: i64 },
    ItemPurchased { item: ItemKind, price: i64 },
    RewardApplied { coins: i64, exp: i64 },
    GameReset,
}

impl PetEvent {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Fed { messy: true } | Self::PlayStarted | Self::SleepStarted => Severity::Info,
            Self::Fed { messy: false }
            | Self::Hatched { .. }
            | Self::Cleaned
            | Self::Medicated { .. }
            | Self::TreatGiven
            | Self::SleepCompleted
            | Self::Woken
            | Self::LevelledUp { .. }
            | Self::StageEvolved { .. }
            | Self::DroppingCleaned { .. }
            | Self::ItemPurchased { .. } => Severity::Success,
            Self::DangerLevelChanged { to, .. } => match to {
                DangerLevel::Normal => Severity::Success,
                DangerLevel::Critical | DangerLevel::Dying => Severity::Warning,
                _ => Severity::Info,
            },
            Self::PetDied { .. } => Severity::Danger,
            Self::RandomEventOccurred { .. }
            | Self::DroppingAppeared { .. }
            | Self::GameReset => Severity::Info,
            Self::RewardApplied { coins, .. } => {
                if *coins > 0 {
                    Severity::Success
                } else {
                    Severity::Info
                }
            }
        }
    }

    /// User-facing notification text. Empty string means "log only,
    /// nothing to toast" (e.g. a dropping appearing).
    pub fn message(&self) -> String {
        match self {
            Self::Hatched { name } => format!("{name} hatched! Welcome!"),
            Self::Fed { messy: true } => "Nom nom! ...and made a mess".into(),
            Self::Fed { messy: false } => "Nom nom!".into(),
            Self::Cleaned => "Squeaky clean!".into(),
            Self::Medicated { .. } => "Medicine administered!".into(),
            Self::TreatGiven => "Yum, what a treat!".into(),
            Self::PlayStarted => "Pick a game!".into(),
            Self::SleepStarted => "Sweet dreams... (5 min)".into(),
            Self::SleepCompleted => "Your pet is fully rested".into(),
            Self::Woken => "Good morning!".into(),
            Self::LevelledUp { level, coins_awarded } => {
                format!("Level {level}! +{coins_awarded} coins")
            }
            Self::StageEvolved { stage } => {
                format!("Your pet has grown into a {}!", stage.label())
            }
            Self::DangerLevelChanged { to, .. } => match to {
                DangerLevel::Normal => "Your pet is feeling better".into(),
                DangerLevel::Critical | DangerLevel::Dying => {
                    "Your pet needs attention!".into()
                }
                _ => String::new(),
            },
            Self::PetDied { .. } => "Your pet has passed away...".into(),
            Self::RandomEventOccurred { description, .. } => description.clone(),
            Self::DroppingAppeared { .. } => String::new(),
            Self::DroppingCleaned { coins } => format!("+{coins} coin!"),
            Self::ItemPurchased { item, .. } => format!("Bought {item}!"),
            Self::RewardApplied { coins, .. } => {
                if *coins > 0 {
                    format!("Victory! +{coins} coins")
                } else {
                    "Better luck next time".into()
                }
            }
            Self::GameReset => "Starting over with a new egg".into(),
        }
    }
}

/// Extract a stable string name from a PetEvent variant.
/// Used for the event_type column in event_log.
pub fn event_type_name(event: &PetEvent) -> &'static str {
    match event {
        PetEvent::Hatched { .. } => "hatched",
        PetEvent::Fed { .. } => "fed",
        PetEvent::Cleaned => "cleaned",
        PetEvent::Medicated { .. } => "medicated",
        PetEvent::TreatGiven => "treat_given",
        PetEvent::PlayStarted => "play_started",
        PetEvent::SleepStarted => "sleep_started",
        PetEvent::SleepCompleted => "sleep_completed",
        PetEvent::Woken => "woken",
        PetEvent::LevelledUp { .. } => "levelled_up",
        PetEvent::StageEvolved { .. } => "stage_evolved",
        PetEvent::DangerLevelChanged { .. } => "danger_level_changed",
        PetEvent::PetDied { .. } => "pet_died",
        PetEvent::RandomEventOccurred { .. } => "random_event_occurred",
        PetEvent::DroppingAppeared { .. } => "dropping_appeared",
        PetEvent::DroppingCleaned { .. } => "dropping_cleaned",
        PetEvent::ItemPurchased { .. } => "item_purchased",
        PetEvent::RewardApplied { .. } => "reward_applied",
        PetEvent::GameReset => "game_reset",
    }
}

/// An event as persisted to the save database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: Option<i64>,
    pub save_id: SaveId,
    pub at_ms: EpochMs,
    pub event_type: String,
    pub payload: String, // JSON-serialized PetEvent
}
