use std::collections::BTreeMap;

use crate::{
    catalog::CropId,
    error::FarmError,
    grid::{Coord, Direction},
};

/// Discrete player input. Every command targets the cell under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveCursor(Direction),
    SelectCrop(CropId),
    /// Plant on an empty cell, harvest a ripe one, otherwise nothing.
    PerformAction,
    Plant,
    Harvest,
    Fertilize,
    /// Ends the host loop once the current tick has finished.
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandEffect {
    CursorMoved(Coord),
    CropSelected(CropId),
    Planted { at: Coord, crop: CropId, cost: u32 },
    Harvested { at: Coord, crop: CropId, reward: u32 },
    Fertilized { at: Coord, cost: u32 },
    QuitRequested,
}

/// What happened to the command applied during a tick. Rejections are
/// recorded here instead of being raised.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReport {
    pub command: Command,
    pub outcome: Result<CommandEffect, FarmError>,
}

impl CommandReport {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn quit_requested(&self) -> bool {
        matches!(self.outcome, Ok(CommandEffect::QuitRequested))
    }
}

/// Commands scheduled against the world tick at which they are submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandScript {
    steps: BTreeMap<u64, Vec<Command>>,
}

impl CommandScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: u64, command: Command) {
        self.steps.entry(tick).or_default().push(command);
    }

    pub fn with(mut self, tick: u64, command: Command) -> Self {
        self.push(tick, command);
        self
    }

    pub fn due(&self, tick: u64) -> &[Command] {
        self.steps.get(&tick).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.steps.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
