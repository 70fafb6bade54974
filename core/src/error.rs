use crate::pet::ItemKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No {0} left! Visit the shop")]
    OutOfStock(ItemKind),

    #[error("Not enough energy: needs at least {required:.0}, has {available:.0}")]
    InsufficientEnergy { required: f64, available: f64 },

    #[error("Not enough coins: {needed} needed, {available} available")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("Your pet has passed away...")]
    Deceased,

    #[error("Your pet is already sleeping")]
    AlreadySleeping,

    #[error("Only an egg can hatch")]
    NotAnEgg,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GameResult<T> = Result<T, GameError>;
