//! Mess droppings — the visible cost of a falling cleanliness stat.
//!
//! A drop of 15+ cleanliness points since the last spawn leaves a
//! dropping somewhere on the floor; tapping one away pays a single coin.
//! Any cleanliness recovery (a bath, medicine) sweeps them all.

use crate::rng::GameRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One dropping, positioned in viewport percentages for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dropping {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessState {
    droppings: Vec<Dropping>,
    last_spawn_cleanliness: f64,
}

impl MessState {
    pub fn new(cleanliness: f64) -> Self {
        Self {
            droppings: Vec::new(),
            last_spawn_cleanliness: cleanliness,
        }
    }

    pub fn droppings(&self) -> &[Dropping] {
        &self.droppings
    }

    /// React to the current cleanliness value. Returns the new dropping
    /// if the accumulated drop crossed the spawn threshold.
    pub fn observe(
        &mut self,
        cleanliness: f64,
        spawn_drop_threshold: f64,
        rng: &mut GameRng,
    ) -> Option<Dropping> {
        if cleanliness > self.last_spawn_cleanliness {
            // The pet got cleaner: reset the baseline and sweep the floor.
            self.last_spawn_cleanliness = cleanliness;
            self.droppings.clear();
            return None;
        }
        if self.last_spawn_cleanliness - cleanliness >= spawn_drop_threshold {
            self.last_spawn_cleanliness = cleanliness;
            let dropping = Dropping {
                id: Uuid::new_v4().to_string(),
                x: Self::spawn_x(rng),
                y: Self::spawn_y(rng),
            };
            self.droppings.push(dropping.clone());
            return Some(dropping);
        }
        None
    }

    /// Remove one dropping by id; false if it was already gone.
    pub fn clean(&mut self, id: &str) -> bool {
        let before = self.droppings.len();
        self.droppings.retain(|d| d.id != id);
        self.droppings.len() < before
    }

    pub fn clear(&mut self) {
        self.droppings.clear();
    }

    // Three floor zones: left, right, or center-front.
    fn spawn_x(rng: &mut GameRng) -> f64 {
        match rng.next_u64_below(3) {
            0 => rng.range_f64(8.0, 28.0),
            1 => rng.range_f64(65.0, 85.0),
            _ => rng.range_f64(25.0, 75.0),
        }
    }

    fn spawn_y(rng: &mut GameRng) -> f64 {
        rng.range_f64(35.0, 75.0)
    }
}
