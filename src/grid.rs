//! Toroidal field of crop cells.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{CropDefinition, RIPE_STAGE, STAGE_COUNT},
    error::FarmError,
};

/// Cell position. Always normalised into the grid it was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub col: u32,
    pub row: u32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { col: 0, row: 0 };

    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }
}

/// A planted crop occupying a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantedCrop {
    pub crop: Arc<CropDefinition>,
    pub planted_at: f64,
    pub stage: u8,
    /// Time the fertilizer was applied. Doubles as the one-shot flag.
    pub fertilized_at: Option<f64>,
}

impl PlantedCrop {
    pub fn is_fertilized(&self) -> bool {
        self.fertilized_at.is_some()
    }

    pub fn is_ripe(&self) -> bool {
        self.stage >= RIPE_STAGE
    }

    /// Seconds left until the full grow time has elapsed, never negative.
    pub fn remaining(&self, now: f64) -> f64 {
        (self.crop.grow_time_secs - (now - self.planted_at)).max(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(PlantedCrop),
}

impl Cell {
    pub fn planted(&self) -> Option<&PlantedCrop> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(planted) => Some(planted),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_ripe(&self) -> bool {
        self.planted().is_some_and(PlantedCrop::is_ripe)
    }
}

/// Growth stage for a crop that has been in the ground for `elapsed`
/// seconds: `min(floor(elapsed / grow_time * 4), 3)`. Truncates, so stage
/// boundaries need not fall on whole seconds.
pub fn stage_for(elapsed: f64, grow_time_secs: f64) -> u8 {
    if !(elapsed > 0.0) || !(grow_time_secs > 0.0) {
        return 0;
    }
    let raw = (elapsed / grow_time_secs * STAGE_COUNT as f64).floor();
    if raw >= f64::from(RIPE_STAGE) {
        RIPE_STAGE
    } else {
        raw as u8
    }
}

/// Dense row-major grid of cells with wraparound on both axes.
#[derive(Debug, Clone)]
pub struct TileGrid {
    cols: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl TileGrid {
    /// Both dimensions must be non-zero; the scenario loader enforces it.
    pub fn new(cols: u32, rows: u32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![Cell::Empty; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn wrap(&self, col: i64, row: i64) -> Coord {
        Coord {
            col: col.rem_euclid(i64::from(self.cols)) as u32,
            row: row.rem_euclid(i64::from(self.rows)) as u32,
        }
    }

    pub fn step(&self, from: Coord, direction: Direction) -> Coord {
        let (dx, dy) = direction.offset();
        self.wrap(i64::from(from.col) + dx, i64::from(from.row) + dy)
    }

    pub fn cell_at(&self, col: i64, row: i64) -> &Cell {
        self.cell(self.wrap(col, row))
    }

    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.index(coord)]
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coord { col, row }))
    }

    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.coords().map(move |coord| (coord, self.cell(coord)))
    }

    pub fn plant(
        &mut self,
        coord: Coord,
        crop: &Arc<CropDefinition>,
        now: f64,
    ) -> Result<(), FarmError> {
        let index = self.index(coord);
        let cell = &mut self.cells[index];
        if !cell.is_empty() {
            return Err(FarmError::invalid(format!(
                "cell ({}, {}) is already planted",
                coord.col, coord.row
            )));
        }
        *cell = Cell::Occupied(PlantedCrop {
            crop: Arc::clone(crop),
            planted_at: now,
            stage: 0,
            fertilized_at: None,
        });
        Ok(())
    }

    /// Recomputes the stage from elapsed time. Returns true when it changed.
    pub fn advance_stage(&mut self, coord: Coord, now: f64) -> bool {
        let index = self.index(coord);
        let Cell::Occupied(planted) = &mut self.cells[index] else {
            return false;
        };
        if planted.is_ripe() {
            return false;
        }
        let stage = stage_for(now - planted.planted_at, planted.crop.grow_time_secs);
        if stage > planted.stage {
            planted.stage = stage;
            true
        } else {
            false
        }
    }

    pub fn is_fertilizable(&self, coord: Coord) -> bool {
        self.cell(coord)
            .planted()
            .is_some_and(|planted| !planted.is_fertilized())
    }

    /// Halves the remaining grow time of an unfertilized crop. Returns false
    /// (and changes nothing) for empty or already fertilized cells.
    pub fn fertilize(&mut self, coord: Coord, now: f64) -> bool {
        let index = self.index(coord);
        let Cell::Occupied(planted) = &mut self.cells[index] else {
            return false;
        };
        if planted.is_fertilized() {
            return false;
        }
        let remaining = planted.remaining(now);
        planted.planted_at -= remaining / 2.0;
        planted.fertilized_at = Some(now);
        true
    }

    pub fn remaining(&self, coord: Coord, now: f64) -> Option<f64> {
        self.cell(coord).planted().map(|planted| planted.remaining(now))
    }

    /// Clears the cell, handing back whatever was there.
    pub fn resolve(&mut self, coord: Coord) -> Cell {
        let index = self.index(coord);
        std::mem::take(&mut self.cells[index])
    }

    fn index(&self, coord: Coord) -> usize {
        let col = (coord.col % self.cols) as usize;
        let row = (coord.row % self.rows) as usize;
        row * self.cols as usize + col
    }
}
