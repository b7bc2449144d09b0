use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{CropCatalog, CropId},
    economy::Economy,
    forager::{ForagerFlock, ForagerSettings},
    grid::{Coord, TileGrid},
};

fn default_cols() -> u32 {
    8
}

fn default_rows() -> u32 {
    6
}

fn default_starting_coins() -> u32 {
    25
}

fn default_fertilizer_cost() -> u32 {
    5
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_cols")]
    pub cols: u32,
    #[serde(default = "default_rows")]
    pub rows: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default = "default_starting_coins")]
    pub starting_coins: u32,
    #[serde(default = "default_fertilizer_cost")]
    pub fertilizer_cost: u32,
    #[serde(default)]
    pub foragers: ForagerSettings,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            starting_coins: default_starting_coins(),
            fertilizer_cost: default_fertilizer_cost(),
            foragers: ForagerSettings::default(),
        }
    }
}

/// Transient player state. Not part of the simulation model proper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub cursor: Coord,
    pub selected: CropId,
}

/// Cells touched during the tick in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub ripened: Vec<Coord>,
    pub spawned: Vec<Coord>,
    pub eaten: Vec<Coord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub col: u32,
    pub row: u32,
    pub crop: Option<CropId>,
    pub stage: u8,
    pub fertilized: bool,
    pub planted_at: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub scenario: String,
    pub tick: u64,
    pub time_secs: f64,
    pub cols: u32,
    pub rows: u32,
    pub cells: Vec<CellSnapshot>,
    pub cursor: Coord,
    pub selected_crop: CropId,
    pub coins: u32,
    pub harvests: BTreeMap<CropId, u32>,
    pub foragers: Vec<Coord>,
    pub crops_lost: u64,
}

pub struct World {
    tick: u64,
    now: f64,
    fertilizer_cost: u32,
    crops_lost: u64,
    pub(crate) catalog: CropCatalog,
    pub(crate) grid: TileGrid,
    pub(crate) economy: Economy,
    pub(crate) flock: ForagerFlock,
    pub(crate) player: Player,
    pub(crate) events: TickEvents,
}

impl World {
    pub fn new(catalog: CropCatalog, config: &WorldConfig) -> Self {
        let player = Player {
            cursor: Coord::ORIGIN,
            selected: catalog.first().id.clone(),
        };
        Self {
            tick: 0,
            now: 0.0,
            fertilizer_cost: config.fertilizer_cost,
            crops_lost: 0,
            grid: TileGrid::new(config.grid.cols, config.grid.rows),
            economy: Economy::new(config.starting_coins, &catalog),
            flock: ForagerFlock::new(config.foragers),
            catalog,
            player,
            events: TickEvents::default(),
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Clock time of the tick in progress, or of the last completed one.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn fertilizer_cost(&self) -> u32 {
        self.fertilizer_cost
    }

    pub fn crops_lost(&self) -> u64 {
        self.crops_lost
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn flock(&self) -> &ForagerFlock {
        &self.flock
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub(crate) fn begin_tick(&mut self, now: f64) {
        self.now = now;
        self.events = TickEvents::default();
    }

    pub(crate) fn record_eaten(&mut self, eaten: Vec<Coord>) {
        self.crops_lost += eaten.len() as u64;
        self.events.eaten.extend(eaten);
    }

    pub(crate) fn advance_time(&mut self) -> TickEvents {
        self.tick += 1;
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self, scenario: &str) -> WorldSnapshot {
        let cells = self
            .grid
            .cells()
            .map(|(coord, cell)| {
                let planted = cell.planted();
                CellSnapshot {
                    col: coord.col,
                    row: coord.row,
                    crop: planted.map(|p| p.crop.id.clone()),
                    stage: planted.map(|p| p.stage).unwrap_or(0),
                    fertilized: planted.is_some_and(|p| p.is_fertilized()),
                    planted_at: planted.map(|p| p.planted_at),
                }
            })
            .collect();
        WorldSnapshot {
            scenario: scenario.to_string(),
            tick: self.tick,
            time_secs: self.now,
            cols: self.grid.cols(),
            rows: self.grid.rows(),
            cells,
            cursor: self.player.cursor,
            selected_crop: self.player.selected.clone(),
            coins: self.economy.coins(),
            harvests: self.economy.harvests().clone(),
            foragers: self.flock.positions(),
            crops_lost: self.crops_lost,
        }
    }
}
