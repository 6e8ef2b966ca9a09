use crate::engine::genome::{Genome, Population};
use crate::error::{MelogenError, Result};
use log::debug;
use rand::Rng;

/// Generate a random genome: each bit is an independent fair coin flip
pub fn random_genome<R: Rng>(length: usize, rng: &mut R) -> Genome {
    (0..length).map(|_| rng.gen_bool(0.5)).collect()
}

/// Generate a population of `size` random genomes of `length` bits each
pub fn generate_population<R: Rng>(
    size: usize,
    length: usize,
    rng: &mut R,
) -> Result<Population> {
    if size == 0 {
        return Err(MelogenError::InvalidPopulationSize(size));
    }

    let population = (0..size).map(|_| random_genome(length, rng)).collect();
    debug!("Population generated: {} genomes of {} bits", size, length);
    Ok(population)
}

/// Single-point crossover: recombine two parents into two children
///
/// A split point p is drawn uniformly from [0, len). Child A merges parent
/// A's prefix [0, p) with parent B's suffix [p, len); child B is the
/// symmetric construction. The merge is a stable two-pointer interleave by
/// bit value that preserves each source's internal order, so both children
/// carry the combined bit multiset of the two slices and keep exactly the
/// parents' length.
///
/// Parents of length < 2 are returned unchanged (no split point exists).
pub fn single_point_crossover<R: Rng>(
    first: &Genome,
    second: &Genome,
    rng: &mut R,
) -> Result<(Genome, Genome)> {
    if first.len() != second.len() {
        return Err(MelogenError::LengthMismatch {
            left: first.len(),
            right: second.len(),
        });
    }

    let length = first.len();
    if length < 2 {
        return Ok((first.clone(), second.clone()));
    }

    let point = rng.gen_range(0..length);

    let child_a = merge_bits(&first[..point], &second[point..]);
    let child_b = merge_bits(&second[..point], &first[point..]);

    Ok((child_a, child_b))
}

/// Stable merge of two bit slices by value (0 before 1), source order kept
fn merge_bits(prefix: &[bool], suffix: &[bool]) -> Genome {
    let mut merged = Vec::with_capacity(prefix.len() + suffix.len());
    let mut i = 0;
    let mut j = 0;

    while i < prefix.len() && j < suffix.len() {
        if prefix[i] <= suffix[j] {
            merged.push(prefix[i]);
            i += 1;
        } else {
            merged.push(suffix[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&prefix[i..]);
    merged.extend_from_slice(&suffix[j..]);

    merged
}

/// Mutation: for each attempt, flip one uniformly chosen bit with the given
/// probability. Attempts are independent and may hit the same position.
pub fn mutate<R: Rng>(genome: &mut Genome, attempts: usize, probability: f64, rng: &mut R) {
    if genome.is_empty() {
        return;
    }

    for _ in 0..attempts {
        if rng.gen::<f64>() < probability {
            let idx = rng.gen_range(0..genome.len());
            genome[idx] = !genome[idx];
        }
    }
}
