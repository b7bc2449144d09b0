use anyhow::Result;
use tracing::debug;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

pub struct ForagerSystem;

impl ForagerSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ForagerSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ForagerSystem {
    fn name(&self) -> &str {
        "foragers"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let eaten = world.flock.tick(&mut world.grid, ctx.now, rng);
        for coord in &eaten {
            debug!(tick = ctx.tick, col = coord.col, row = coord.row, "forager ate a ripe crop");
        }
        world.record_eaten(eaten);
        Ok(())
    }
}
