use serde::{Deserialize, Serialize};

/// Error returned by [`EvolutionParams::validate`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ParamsError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("number of generations must be at least 1")]
    NoGenerations,
    #[display("tournament size must be at least 1")]
    EmptyTournament,
    #[display("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
}

/// Parameters of one evolution run.
///
/// Missing fields fall back to [`EvolutionParams::default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionParams {
    /// Number of chromosomes in every generation
    pub pop_size: usize,
    /// Number of generations including the initial one
    pub num_generations: usize,
    /// Probability that a new slot is filled with a one-variable program
    pub insertion_probability: f64,
    /// Probability that a recombination keeps the offspring instead of copying the first parent
    pub crossover_probability: f64,
    /// Contenders per tournament (1 = uniform random selection)
    pub tournament_size: usize,
    /// Generations between progress reports (0 disables reporting)
    pub report_interval: usize,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            pop_size: 100,
            num_generations: 10_000,
            insertion_probability: 0.1,
            crossover_probability: 0.9,
            tournament_size: 1,
            report_interval: 100,
        }
    }
}

impl EvolutionParams {
    /// Checks every parameter before a run starts.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.pop_size == 0 {
            return Err(ParamsError::EmptyPopulation);
        }
        if self.num_generations == 0 {
            return Err(ParamsError::NoGenerations);
        }
        if self.tournament_size == 0 {
            return Err(ParamsError::EmptyTournament);
        }
        for (name, value) in [
            ("insertion probability", self.insertion_probability),
            ("crossover probability", self.crossover_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::ProbabilityOutOfRange { name, value });
            }
        }
        Ok(())
    }
}
