mod commands;

use std::{collections::VecDeque, path::PathBuf};

use anyhow::Result;
use tracing::{debug, info};

use crate::{
    clock::{Clock, MonotonicClock},
    command::{Command, CommandReport, CommandScript},
    grid::Coord,
    rng::{RngManager, SystemRng},
    snapshot::SnapshotWriter,
    systems::{ForagerSystem, GrowthSystem},
    world::World,
};

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
    pub snapshot_interval_ticks: u64,
    pub snapshot_dir: PathBuf,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    clock: Option<Box<dyn Clock>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            clock: None,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Growth always runs before the foragers; a crop can be eaten on the
    /// tick it ripens.
    pub fn build(self) -> Engine {
        let systems: Vec<Box<dyn System>> =
            vec![Box::new(GrowthSystem::new()), Box::new(ForagerSystem::new())];
        Engine {
            rng: RngManager::new(self.settings.seed),
            systems,
            clock: self
                .clock
                .unwrap_or_else(|| Box::new(MonotonicClock::new())),
            pending: VecDeque::new(),
            last_now: 0.0,
            snapshot_writer: SnapshotWriter::new(
                &self.settings.snapshot_dir,
                self.settings.snapshot_interval_ticks,
            ),
            settings: self.settings,
        }
    }
}

/// Outcome of one tick, handed back to the host after the world has been
/// fully updated.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    pub tick: u64,
    pub now: f64,
    pub command: Option<CommandReport>,
    pub ripened: Vec<Coord>,
    pub spawned: Vec<Coord>,
    pub eaten: Vec<Coord>,
    pub snapshot_path: Option<PathBuf>,
}

impl TickSummary {
    pub fn quit_requested(&self) -> bool {
        self.command
            .as_ref()
            .is_some_and(CommandReport::quit_requested)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub quit: bool,
    pub coins: u32,
    pub harvested: u64,
    pub crops_lost: u64,
    pub foragers: usize,
}

pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
    clock: Box<dyn Clock>,
    pending: VecDeque<Command>,
    last_now: f64,
    snapshot_writer: SnapshotWriter,
    settings: EngineSettings,
}

impl Engine {
    pub fn submit(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Runs one tick: at most one queued command, then every system in
    /// order. The world is only observable again once this returns.
    pub fn tick(&mut self, world: &mut World) -> Result<TickSummary> {
        let now = self.clock.now().max(self.last_now);
        self.last_now = now;
        world.begin_tick(now);

        let current_tick = world.tick();
        let command = self.pending.pop_front().map(|command| {
            let outcome = commands::apply(world, &command);
            if let Err(err) = &outcome {
                debug!(tick = current_tick, ?command, %err, "command rejected");
            }
            CommandReport { command, outcome }
        });

        let ctx = SystemContext {
            tick: current_tick,
            now,
            scenario_name: &self.settings.scenario_name,
        };
        for system in &mut self.systems {
            let mut rng_stream = self.rng.stream(system.name());
            system.run(&ctx, world, &mut rng_stream)?;
        }

        let events = world.advance_time();
        let snapshot_path = self
            .snapshot_writer
            .maybe_write(world, &self.settings.scenario_name)?;
        self.clock.end_tick();

        Ok(TickSummary {
            tick: world.tick(),
            now,
            command,
            ripened: events.ripened,
            spawned: events.spawned,
            eaten: events.eaten,
            snapshot_path,
        })
    }

    pub fn run(
        &mut self,
        world: &mut World,
        ticks: u64,
        script: &CommandScript,
    ) -> Result<RunSummary> {
        self.run_with_hook(world, ticks, script, |_, _| {})
    }

    /// Like [`Engine::run`], calling `hook` with the finished world after
    /// every tick. Stops early when a `Quit` command is applied.
    pub fn run_with_hook<F>(
        &mut self,
        world: &mut World,
        ticks: u64,
        script: &CommandScript,
        mut hook: F,
    ) -> Result<RunSummary>
    where
        F: FnMut(&TickSummary, &World),
    {
        info!(
            scenario = %self.settings.scenario_name,
            seed = self.settings.seed,
            ticks,
            scripted = script.len(),
            "session starting"
        );
        let mut executed = 0;
        let mut quit = false;
        for _ in 0..ticks {
            for command in script.due(world.tick()) {
                self.submit(command.clone());
            }
            let summary = self.tick(world)?;
            executed += 1;
            hook(&summary, world);
            if summary.quit_requested() {
                quit = true;
                break;
            }
        }
        let summary = RunSummary {
            ticks: executed,
            quit,
            coins: world.economy().coins(),
            harvested: world.economy().total_harvested(),
            crops_lost: world.crops_lost(),
            foragers: world.flock().len(),
        };
        info!(
            ticks = summary.ticks,
            quit = summary.quit,
            coins = summary.coins,
            harvested = summary.harvested,
            crops_lost = summary.crops_lost,
            foragers = summary.foragers,
            "session finished"
        );
        Ok(summary)
    }
}

pub struct SystemContext<'a> {
    pub tick: u64,
    pub now: f64,
    pub scenario_name: &'a str,
}

pub trait System {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()>;
}
