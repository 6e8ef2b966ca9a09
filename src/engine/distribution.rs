use crate::engine::evolution_engine::FitnessFn;
use crate::engine::genome::{Genome, Population};
use crate::error::{MelogenError, Result};
use log::debug;
use rand::Rng;

/// One population member paired with its fitness score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedEntry {
    pub index: usize,
    pub score: i64,
}

impl WeightedEntry {
    /// Selection weight: negative scores contribute nothing to the wheel
    fn weight(&self) -> i64 {
        self.score.max(0)
    }
}

/// Fitness-weighted view of a population, rebuilt once per generation
///
/// Holds exactly one entry per population member, sorted ascending by score.
/// The distribution is call-scoped: each evolution run builds its own, so
/// concurrent runs never share selection state.
#[derive(Debug, Clone)]
pub struct WeightedDistribution {
    entries: Vec<WeightedEntry>,
}

impl WeightedDistribution {
    /// Evaluate `fitness` once per member and build the sorted distribution
    pub fn build<F: FitnessFn>(population: &Population, fitness: &mut F) -> Result<Self> {
        if population.is_empty() {
            return Err(MelogenError::EmptyPopulation);
        }

        let mut entries: Vec<WeightedEntry> = population
            .iter()
            .enumerate()
            .map(|(index, genome)| WeightedEntry {
                index,
                score: fitness.evaluate(genome),
            })
            .collect();
        entries.sort_by_key(|entry| entry.score);

        debug!("Weighted distribution built over {} members", entries.len());
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[WeightedEntry] {
        &self.entries
    }

    /// Sum of all selection weights (clamped scores)
    pub fn total_weight(&self) -> i64 {
        self.entries.iter().map(|entry| entry.weight()).sum()
    }

    /// Raw score of the fittest member
    pub fn best_score(&self) -> i64 {
        // build() rejects empty populations, entries is never empty
        self.entries[self.entries.len() - 1].score
    }

    /// Population members reordered by score, descending by default
    pub fn sorted(&self, population: &Population, descending: bool) -> Population {
        let ordered = self.entries.iter().map(|entry| population[entry.index].clone());
        if descending {
            ordered.rev().collect()
        } else {
            ordered.collect()
        }
    }

    /// Roulette-wheel draw of one population index
    ///
    /// Spins a uniform integer in [0, total_weight] and walks the entries in
    /// ascending score order, subtracting weights until the remainder falls
    /// inside the current slot. A zero total (all scores non-positive)
    /// degenerates to a uniform pick over the population.
    pub fn select_index<R: Rng>(&self, rng: &mut R) -> usize {
        let total = self.total_weight();
        if total == 0 {
            return self.entries[rng.gen_range(0..self.entries.len())].index;
        }

        let mut spin = rng.gen_range(0..=total);
        for entry in &self.entries {
            if spin < entry.weight() {
                return entry.index;
            }
            spin -= entry.weight();
        }

        // spin == total lands past the last slot
        self.entries[self.entries.len() - 1].index
    }

    /// Draw two parents independently; the same genome may be picked twice
    pub fn select_pair<R: Rng>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> (Genome, Genome) {
        let first = population[self.select_index(rng)].clone();
        let second = population[self.select_index(rng)].clone();
        (first, second)
    }
}
