use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use rand::Rng as _;
use serde::Serialize;
use tgp_engine::{Evolution, EvolutionParams, EvolutionSeed, ProblemRules, TrainingSet};

use crate::{
    schema::run_report::{DatasetInfo, HistoryEntry, RunReport},
    util,
};

/// Evolution options shared by every problem.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EvolveArg {
    /// JSON file with evolution parameters (flags below override it)
    #[arg(long)]
    params: Option<PathBuf>,
    /// Number of chromosomes per generation
    #[arg(long)]
    pop_size: Option<usize>,
    /// Number of generations
    #[arg(long)]
    generations: Option<usize>,
    /// Probability of inserting a new one-variable program
    #[arg(long)]
    insertion_probability: Option<f64>,
    /// Probability of keeping a recombined offspring
    #[arg(long)]
    crossover_probability: Option<f64>,
    /// Tournament size for parent selection
    #[arg(long)]
    tournament_size: Option<usize>,
    /// Generations between progress reports (0 disables them)
    #[arg(long)]
    report_interval: Option<usize>,
    /// Random seed: 32 hex characters or a decimal integer
    #[arg(long)]
    seed: Option<EvolutionSeed>,
    /// Output file path for the run report (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl EvolveArg {
    fn params(&self) -> anyhow::Result<EvolutionParams> {
        let mut params = match &self.params {
            Some(path) => util::read_params_file(path)?,
            None => EvolutionParams::default(),
        };
        let overrides = [
            (&mut params.pop_size, self.pop_size),
            (&mut params.num_generations, self.generations),
            (&mut params.tournament_size, self.tournament_size),
            (&mut params.report_interval, self.report_interval),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(p) = self.insertion_probability {
            params.insertion_probability = p;
        }
        if let Some(p) = self.crossover_probability {
            params.crossover_probability = p;
        }
        params.validate().context("Invalid evolution parameters")?;
        Ok(params)
    }
}

/// Runs the engine on `training` and writes the run report.
pub(crate) fn evolve<P>(
    rules: P,
    training: &TrainingSet<P::Value, P::Label>,
    dataset: DatasetInfo,
    arg: &EvolveArg,
) -> anyhow::Result<()>
where
    P: ProblemRules,
    P::Value: Serialize,
{
    let params = arg.params()?;
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let problem = rules.name();

    eprintln!("num training data = {}", training.num_samples());
    eprintln!("num variables = {}", training.num_variables());
    eprintln!("seed = {seed}");

    let mut rng = seed.rng();
    let evolution = Evolution::new(rules, training, params.clone(), &mut rng)?;
    let outcome = evolution.run(&mut rng);

    let last_generation = outcome.best_fitness_history.len() - 1;
    let best_fitness_history = outcome
        .best_fitness_history
        .iter()
        .enumerate()
        .filter(|&(generation, _)| {
            generation == last_generation
                || (params.report_interval > 0 && generation % params.report_interval == 0)
        })
        .map(|(generation, &best_fitness)| HistoryEntry {
            generation,
            best_fitness,
        })
        .collect();

    let final_fitness = outcome.best.fitness();
    #[expect(clippy::cast_precision_loss)]
    let accuracy = 1.0 - final_fitness as f64 / training.num_samples() as f64;
    let report = RunReport {
        problem: problem.to_owned(),
        finished_at: Utc::now(),
        seed,
        params,
        dataset,
        final_fitness,
        accuracy,
        best_fitness_history,
        best_values: outcome.best.values().to_vec(),
    };
    util::save_json(&report, arg.output.as_deref())?;

    eprintln!();
    eprintln!("{problem} run completed");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!(
        "  Final fitness: {final_fitness} of {} misclassified",
        training.num_samples()
    );
    eprintln!("  Accuracy: {:.2}%", report.accuracy * 100.0);

    Ok(())
}
