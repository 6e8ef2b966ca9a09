pub mod distribution;
pub mod evolution_engine;
pub mod genome;
pub mod operators;

pub use distribution::{WeightedDistribution, WeightedEntry};
pub use evolution_engine::{EvolutionConfig, EvolutionEngine, FitnessFn};
pub use genome::{Genome, Population};
