use thiserror::Error;

#[derive(Error, Debug)]
pub enum MelogenError {
    #[error("Genome length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Population is empty")]
    EmptyPopulation,

    #[error("Invalid population size: {0}")]
    InvalidPopulationSize(usize),

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Evolution failed at generation {generation}: {source}")]
    Evolution {
        generation: usize,
        #[source]
        source: Box<MelogenError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MelogenError>;
