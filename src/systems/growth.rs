use anyhow::Result;
use tracing::debug;

use crate::{
    engine::{System, SystemContext},
    grid::{Cell, Coord},
    rng::SystemRng,
    world::World,
};

/// Recomputes every growing cell's stage from the clock. The first time a
/// cell turns ripe, one forager is spawned away from the player.
pub struct GrowthSystem;

impl GrowthSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GrowthSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for GrowthSystem {
    fn name(&self) -> &str {
        "growth"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let growing: Vec<Coord> = world
            .grid
            .cells()
            .filter(|(_, cell)| matches!(cell, Cell::Occupied(planted) if !planted.is_ripe()))
            .map(|(coord, _)| coord)
            .collect();

        for coord in growing {
            if world.grid.advance_stage(coord, ctx.now) && world.grid.cell(coord).is_ripe() {
                debug!(tick = ctx.tick, col = coord.col, row = coord.row, "crop ripened");
                world.events.ripened.push(coord);
            }
        }

        let avoid = world.player.cursor;
        for _ in 0..world.events.ripened.len() {
            let at = world.flock.spawn(&world.grid, avoid, ctx.now, rng);
            debug!(
                tick = ctx.tick,
                col = at.col,
                row = at.row,
                flock = world.flock.len(),
                "forager spawned"
            );
            world.events.spawned.push(at);
        }
        Ok(())
    }
}
