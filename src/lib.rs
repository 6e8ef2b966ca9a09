pub mod config;
pub mod engine;
pub mod error;
pub mod midi;
pub mod scale;

pub use config::AppConfig;
pub use engine::{EvolutionEngine, FitnessFn, Genome, Population};
pub use error::{MelogenError, Result};
pub use midi::{EncodedMidi, MidiEncoder};
pub use scale::{Scale, ScaleType};
