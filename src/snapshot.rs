use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::info;

use crate::world::World;

/// Writes a pretty-printed JSON snapshot of the world every `interval` ticks
/// to `<dir>/<scenario>/tick_NNNNNN.json`. An interval of zero disables it.
pub struct SnapshotWriter {
    dir: PathBuf,
    interval: u64,
}

impl SnapshotWriter {
    pub fn new(dir: &Path, interval: u64) -> Self {
        Self {
            dir: dir.to_path_buf(),
            interval,
        }
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn maybe_write(&self, world: &World, scenario: &str) -> Result<Option<PathBuf>> {
        if self.interval == 0 || world.tick() % self.interval != 0 {
            return Ok(None);
        }

        let dir = self.dir.join(scenario);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create snapshot dir {}", dir.display()))?;
        let path = dir.join(format!("tick_{:06}.json", world.tick()));
        let json = serde_json::to_string_pretty(&world.snapshot(scenario))
            .context("Failed to serialize world snapshot")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        info!(tick = world.tick(), path = %path.display(), "snapshot written");
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::CropCatalog,
        world::{WorldConfig, WorldSnapshot},
    };

    #[test]
    fn zero_interval_never_writes() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path(), 0);
        let world = World::new(CropCatalog::standard(), &WorldConfig::default());
        assert!(writer.maybe_write(&world, "farm").unwrap().is_none());
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn writes_on_interval_boundaries() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapshotWriter::new(dir.path(), 3);
        let mut world = World::new(CropCatalog::standard(), &WorldConfig::default());
        world.advance_time();
        assert!(writer.maybe_write(&world, "farm").unwrap().is_none());
        world.advance_time();
        world.advance_time();

        let path = writer.maybe_write(&world, "farm").unwrap().unwrap();
        assert_eq!(path, dir.path().join("farm").join("tick_000003.json"));
        let snapshot: WorldSnapshot =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(snapshot.tick, 3);
        assert_eq!(snapshot.scenario, "farm");
        assert_eq!(snapshot.coins, 25);
    }
}
