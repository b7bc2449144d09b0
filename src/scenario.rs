use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;

use crate::{
    catalog::{CropCatalog, CropDefinition, CropId},
    command::{Command, CommandScript},
    grid::Direction,
    world::{World, WorldConfig},
};

fn default_tick_rate_hz() -> f64 {
    60.0
}

fn default_snapshot_interval_ticks() -> u64 {
    0
}

const DEFAULT_TICKS: u64 = 18_000;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default = "default_tick_rate_hz")]
    pub tick_rate_hz: f64,
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default = "default_snapshot_interval_ticks")]
    pub snapshot_interval_ticks: u64,
    #[serde(flatten)]
    pub world: WorldConfig,
    /// Falls back to the standard catalog when omitted.
    #[serde(default)]
    pub crops: Option<Vec<CropDefinition>>,
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    MoveCursor,
    SelectCrop,
    PerformAction,
    Plant,
    Harvest,
    Fertilize,
    Quit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    pub tick: u64,
    pub action: ScriptAction,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub crop: Option<CropId>,
}

impl ScriptStep {
    pub fn to_command(&self) -> Result<Command> {
        let command = match self.action {
            ScriptAction::MoveCursor => match self.direction {
                Some(direction) => Command::MoveCursor(direction),
                None => bail!("move_cursor at tick {} needs a direction", self.tick),
            },
            ScriptAction::SelectCrop => match &self.crop {
                Some(crop) => Command::SelectCrop(crop.clone()),
                None => bail!("select_crop at tick {} needs a crop", self.tick),
            },
            ScriptAction::PerformAction => Command::PerformAction,
            ScriptAction::Plant => Command::Plant,
            ScriptAction::Harvest => Command::Harvest,
            ScriptAction::Fertilize => Command::Fertilize,
            ScriptAction::Quit => Command::Quit,
        };
        Ok(command)
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario = Scenario::from_yaml(&data)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let scenario: Scenario = serde_yaml::from_str(text).context("invalid scenario yaml")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.name.trim().is_empty(), "scenario must define a name");
        ensure!(
            self.world.grid.cols > 0 && self.world.grid.rows > 0,
            "grid must be at least 1x1, got {}x{}",
            self.world.grid.cols,
            self.world.grid.rows
        );
        ensure!(
            self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0,
            "tick_rate_hz must be positive, got {}",
            self.tick_rate_hz
        );
        let move_interval = self.world.foragers.move_interval_secs;
        ensure!(
            move_interval.is_finite() && move_interval > 0.0,
            "forager move_interval_secs must be positive, got {move_interval}"
        );
        self.command_script()?;
        Ok(())
    }

    pub fn catalog(&self) -> Result<CropCatalog> {
        match &self.crops {
            Some(crops) => CropCatalog::from_definitions(crops.iter().cloned())
                .context("invalid crop catalog"),
            None => Ok(CropCatalog::standard()),
        }
    }

    pub fn build_world(&self) -> Result<World> {
        Ok(World::new(self.catalog()?, &self.world))
    }

    pub fn command_script(&self) -> Result<CommandScript> {
        let catalog = self.catalog()?;
        let mut script = CommandScript::new();
        for step in &self.script {
            let command = step.to_command()?;
            if let Command::SelectCrop(crop) = &command {
                ensure!(
                    catalog.contains(crop),
                    "script step at tick {} selects unknown crop '{crop}'",
                    step.tick
                );
            }
            script.push(step.tick, command);
        }
        Ok(script)
    }

    pub fn tick_secs(&self) -> f64 {
        1.0 / self.tick_rate_hz
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(DEFAULT_TICKS)
    }
}
