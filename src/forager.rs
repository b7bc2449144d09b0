//! Foragers: wandering pests that eat ripe crops on contact.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{Coord, Direction, TileGrid};

fn default_move_interval_secs() -> f64 {
    0.6
}

fn default_spawn_attempts() -> u32 {
    30
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForagerSettings {
    #[serde(default = "default_move_interval_secs")]
    pub move_interval_secs: f64,
    /// Samples drawn while trying to keep a new forager off the avoided cell.
    #[serde(default = "default_spawn_attempts")]
    pub spawn_attempts: u32,
}

impl Default for ForagerSettings {
    fn default() -> Self {
        Self {
            move_interval_secs: default_move_interval_secs(),
            spawn_attempts: default_spawn_attempts(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forager {
    pub position: Coord,
    pub next_move: f64,
}

/// Every forager ever spawned. Nothing removes them.
#[derive(Debug, Clone, Default)]
pub struct ForagerFlock {
    settings: ForagerSettings,
    foragers: Vec<Forager>,
}

impl ForagerFlock {
    pub fn new(settings: ForagerSettings) -> Self {
        Self {
            settings,
            foragers: Vec::new(),
        }
    }

    pub fn settings(&self) -> &ForagerSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.foragers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foragers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Forager> {
        self.foragers.iter()
    }

    pub fn positions(&self) -> Vec<Coord> {
        self.foragers.iter().map(|forager| forager.position).collect()
    }

    /// Drops a forager on a random cell, retrying a bounded number of times
    /// to keep it off `avoid`. When every sample hits `avoid` the last one is
    /// used anyway, so a forager may land on the player's cell.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        grid: &TileGrid,
        avoid: Coord,
        now: f64,
        rng: &mut R,
    ) -> Coord {
        let mut position = avoid;
        for _ in 0..self.settings.spawn_attempts.max(1) {
            position = Coord::new(rng.gen_range(0..grid.cols()), rng.gen_range(0..grid.rows()));
            if position != avoid {
                break;
            }
        }
        let jitter = rng.gen::<f64>() * self.settings.move_interval_secs;
        self.foragers.push(Forager {
            position,
            next_move: now + jitter,
        });
        position
    }

    /// Moves foragers whose hop timer has expired, then lets every forager
    /// eat the ripe crop beneath it. Returns the cells that were eaten.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        grid: &mut TileGrid,
        now: f64,
        rng: &mut R,
    ) -> Vec<Coord> {
        let mut eaten = Vec::new();
        for forager in &mut self.foragers {
            if now >= forager.next_move {
                let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
                forager.position = grid.step(forager.position, direction);
                forager.next_move = now + self.settings.move_interval_secs;
            }
            if grid.cell(forager.position).is_ripe() {
                grid.resolve(forager.position);
                eaten.push(forager.position);
            }
        }
        eaten
    }
}
