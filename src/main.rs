use log::info;
use melogen::config::AppConfig;
use melogen::engine::evolution_engine::{
    EvolutionConfig as EngineEvolutionConfig, EvolutionEngine, FitnessFn,
};
use melogen::engine::Genome;
use melogen::midi::MidiEncoder;
use melogen::scale::Scale;
use std::io::Write;

/// Scores genomes by asking the listener for a number on stdin
struct InteractiveFitness {
    prompted: usize,
}

impl InteractiveFitness {
    fn new() -> Self {
        Self { prompted: 0 }
    }
}

impl FitnessFn for InteractiveFitness {
    fn evaluate(&mut self, genome: &Genome) -> i64 {
        self.prompted += 1;
        loop {
            print!(
                "[{}] Rate this {}-bit melody (integer, higher is better): ",
                self.prompted,
                genome.len()
            );
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            if std::io::stdin().read_line(&mut line).is_err() {
                return 0;
            }
            match line.trim().parse::<i64>() {
                Ok(score) => return score,
                Err(_) => println!("Not an integer, try again"),
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };
    config.validate()?;

    let scale = Scale::new(config.output.scale, &config.output.key)?;

    let engine_config = EngineEvolutionConfig {
        population_size: config.evolution.population_size,
        genome_length: config.evolution.genome_length,
        fitness_limit: config.evolution.fitness_limit,
        generation_limit: config.evolution.generation_limit,
        mutation_attempts: config.evolution.mutation_attempts,
        mutation_probability: config.evolution.mutation_probability,
        seed: None,
    };
    let mut engine = EvolutionEngine::new(engine_config);

    let mut fitness = InteractiveFitness::new();
    let population = engine.evolve(&mut fitness)?;
    info!("Evolution finished, best fitness {}", engine.max_weight());

    let encoder = MidiEncoder::new(scale.pitches(), config.output.tempo);
    let encoded = encoder.encode(&population[0]);
    encoded.write_to(&config.output.path)?;
    info!(
        "Wrote {} bytes to {}",
        encoded.bytes.len(),
        config.output.path
    );

    Ok(())
}
