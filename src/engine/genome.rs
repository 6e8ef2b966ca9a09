/// Genome representation for the melody search
///
/// A genome is a fixed-length sequence of bits that deterministically maps to
/// a melody. The MIDI encoder consumes it 4 bits at a time: each group picks
/// a degree of the active scale (or a rest / sustain marker), so every genome
/// is a playable melody by construction.
///
/// # Why bits instead of note lists?
///
/// Genetic operators work best on simple, linear structures:
/// - **Crossover**: splitting a bit string at a point is trivial
/// - **Mutation**: flipping an individual bit is straightforward
/// - **No invalid states**: any bit string decodes to a valid melody
///
/// All genomes within one evolution run share the same length; the operators
/// in [`crate::engine::operators`] enforce this.
pub type Genome = Vec<bool>;

/// A fixed-size collection of genomes evaluated together each generation.
/// The size is set once per run and never changes across generations.
pub type Population = Vec<Genome>;
