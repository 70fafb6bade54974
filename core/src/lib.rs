//! PocketPet core — the virtual-pet lifecycle simulation.
//!
//! The pet is a single snapshot advanced by pure transitions: a decay
//! engine (stat decay, health feedback, critical timers, death,
//! danger/mood derivation), a sleep recovery sub-process, discrete care
//! actions, a progression settler, and an offline catch-up that replays
//! the whole wall-clock gap in one scaled step. `GameEngine` owns the
//! snapshot, the named timers, the RNG streams, the SQLite save store,
//! and the notification sink; everything below it is snapshot-in /
//! snapshot-out.

pub mod actions;
pub mod catchup;
pub mod clock;
pub mod config;
pub mod decay;
pub mod engine;
pub mod error;
pub mod event;
pub mod mess;
pub mod notify;
pub mod pet;
pub mod progression;
pub mod random_event;
pub mod rng;
pub mod scheduler;
pub mod sleep;
pub mod store;
pub mod types;
