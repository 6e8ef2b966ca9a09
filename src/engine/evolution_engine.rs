use crate::engine::distribution::WeightedDistribution;
use crate::engine::genome::{Genome, Population};
use crate::engine::operators::{generate_population, mutate, single_point_crossover};
use crate::error::{MelogenError, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Externally supplied scoring capability: higher scores are better.
///
/// The engine treats every call as synchronous and opaque — an interactive
/// implementation may block on stdin for as long as it likes. Callers wanting
/// timeouts must wrap their function before injecting it.
pub trait FitnessFn {
    fn evaluate(&mut self, genome: &Genome) -> i64;
}

impl<F: FnMut(&Genome) -> i64> FitnessFn for F {
    fn evaluate(&mut self, genome: &Genome) -> i64 {
        self(genome)
    }
}

pub struct EvolutionConfig {
    pub population_size: usize,
    pub genome_length: usize,
    pub fitness_limit: i64,
    pub generation_limit: usize,
    pub mutation_attempts: usize,
    pub mutation_probability: f64,
    pub seed: Option<u64>,
}

/// Generational genetic-algorithm driver
///
/// Each instance owns its RNG and per-run best-fitness state, so concurrent
/// evolution runs use independent engines and never interfere.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    rng: StdRng,
    max_weight: i64,
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            rng,
            max_weight: i64::MIN,
        }
    }

    /// Best fitness observed by the most recent sort
    pub fn max_weight(&self) -> i64 {
        self.max_weight
    }

    /// Reorder a population by fitness, descending by default
    ///
    /// Also refreshes [`max_weight`](Self::max_weight) with the top score.
    pub fn sort_population<F: FitnessFn>(
        &mut self,
        population: &Population,
        fitness: &mut F,
        descending: bool,
    ) -> Result<Population> {
        let distribution = WeightedDistribution::build(population, fitness)?;
        self.max_weight = distribution.best_score();
        Ok(distribution.sorted(population, descending))
    }

    /// Run the evolution loop
    ///
    /// Starts from a fresh random population. Each generation evaluates the
    /// fitness function once per member, stops as soon as the best score
    /// reaches `fitness_limit`, and otherwise breeds the next generation:
    /// the top two members carry over unchanged, the rest come from
    /// roulette-wheel parent selection, single-point crossover and mutation.
    /// Gives up after `generation_limit` generations regardless of fitness.
    /// The returned population is in last-sorted order.
    pub fn evolve<F: FitnessFn>(&mut self, fitness: &mut F) -> Result<Population> {
        if self.config.population_size < 2 {
            return Err(MelogenError::InvalidPopulationSize(
                self.config.population_size,
            ));
        }

        let mut population = generate_population(
            self.config.population_size,
            self.config.genome_length,
            &mut self.rng,
        )?;
        info!(
            "Evolution started: {} genomes of {} bits, limit {} over {} generations",
            self.config.population_size,
            self.config.genome_length,
            self.config.fitness_limit,
            self.config.generation_limit
        );

        for generation in 0..self.config.generation_limit {
            let distribution = WeightedDistribution::build(&population, fitness)
                .map_err(|source| MelogenError::Evolution {
                    generation,
                    source: Box::new(source),
                })?;
            self.max_weight = distribution.best_score();
            let sorted = distribution.sorted(&population, true);
            debug!(
                "Generation {}: best fitness {}",
                generation, self.max_weight
            );

            if self.max_weight >= self.config.fitness_limit {
                info!(
                    "Fitness limit reached at generation {} (best {})",
                    generation, self.max_weight
                );
                return Ok(sorted);
            }

            if generation + 1 == self.config.generation_limit {
                population = sorted;
                break;
            }

            population = self
                .breed(&population, &sorted, &distribution)
                .map_err(|source| MelogenError::Evolution {
                    generation,
                    source: Box::new(source),
                })?;
        }

        info!(
            "Generation limit reached, best fitness {}",
            self.max_weight
        );
        Ok(population)
    }

    /// Build the next generation: two elites plus bred offspring, size kept
    /// exactly at `population_size` (a surplus child from the last round is
    /// discarded when the size is odd).
    fn breed(
        &mut self,
        population: &Population,
        sorted: &Population,
        distribution: &WeightedDistribution,
    ) -> Result<Population> {
        let size = self.config.population_size;
        let mut next_generation = Vec::with_capacity(size);
        next_generation.push(sorted[0].clone());
        next_generation.push(sorted[1].clone());

        while next_generation.len() < size {
            let (parent_a, parent_b) = distribution.select_pair(population, &mut self.rng);
            let (mut child_a, mut child_b) =
                single_point_crossover(&parent_a, &parent_b, &mut self.rng)?;

            mutate(
                &mut child_a,
                self.config.mutation_attempts,
                self.config.mutation_probability,
                &mut self.rng,
            );
            mutate(
                &mut child_b,
                self.config.mutation_attempts,
                self.config.mutation_probability,
                &mut self.rng,
            );

            next_generation.push(child_a);
            if next_generation.len() < size {
                next_generation.push(child_b);
            }
        }

        Ok(next_generation)
    }
}
