use super::traits::ConfigSection;
use crate::error::MelogenError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub genome_length: usize,
    pub fitness_limit: i64,
    pub generation_limit: usize,
    pub mutation_attempts: usize,
    pub mutation_probability: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 6,
            genome_length: 256,
            fitness_limit: 10,
            generation_limit: 100,
            mutation_attempts: 1,
            mutation_probability: 0.5,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), MelogenError> {
        if self.population_size < 2 {
            return Err(MelogenError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.genome_length < 4 {
            return Err(MelogenError::Configuration(
                "Genome length must be at least 4 (one note group)".to_string(),
            ));
        }
        if self.generation_limit == 0 {
            return Err(MelogenError::Configuration(
                "Generation limit must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(MelogenError::Configuration(
                "Mutation probability must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}
