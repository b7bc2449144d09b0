mod foragers;
mod growth;

pub use foragers::ForagerSystem;
pub use growth::GrowthSystem;
