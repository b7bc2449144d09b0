pub mod catalog;
pub mod clock;
pub mod command;
pub mod economy;
pub mod engine;
pub mod error;
pub mod forager;
pub mod grid;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod systems;
pub mod world;

pub use catalog::{CropCatalog, CropDefinition, CropId};
pub use command::{Command, CommandScript};
pub use engine::{Engine, EngineBuilder, EngineSettings, RunSummary, TickSummary};
pub use error::{CatalogError, FarmError};
pub use scenario::Scenario;
pub use world::{World, WorldSnapshot};
