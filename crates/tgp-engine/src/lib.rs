//! Traceless genetic programming engine.
//!
//! A traceless program is never stored as an expression tree. Each chromosome keeps
//! only the vector of values the program produces on the training set, plus its
//! fitness (the number of misclassified samples). Operators combine those cached
//! vectors element-wise, so one generation costs `O(pop_size * num_samples)`
//! regardless of how deep the implied expression has grown.
//!
//! # Architecture
//!
//! ```text
//! TrainingSet ──(column)──> Chromosome (insertion)
//!                               │
//! Population ──(tournament)──> parents ──(Operator)──> offspring
//!     ▲                                                   │
//!     └──────────(elitism + replace + sort)───────────────┘
//! ```
//!
//! The loop in [`evolution`] is generic over [`ProblemRules`]; the two problems
//! differ only in value type, operator set and error rule:
//!
//! | Rules | Value | Target | Operators |
//! |-------|-------|--------|-----------|
//! | [`ClassificationRules`] | `f64` | class index | `+ - * /` |
//! | [`ParityRules`] | `bool` | bit | `AND OR NAND NOR` |
//!
//! # Example
//!
//! ```
//! use tgp_engine::{EvolutionParams, EvolutionSeed, ParityRules, TrainingSet};
//!
//! let training = TrainingSet::new(
//!     vec![vec![false, false], vec![false, true], vec![true, false], vec![true, true]],
//!     vec![true, false, false, true],
//! )
//! .unwrap();
//! let params = EvolutionParams {
//!     pop_size: 20,
//!     num_generations: 50,
//!     ..Default::default()
//! };
//! let mut rng = EvolutionSeed::from_u64(0).rng();
//! let best = tgp_engine::run(ParityRules, &training, params, &mut rng).unwrap();
//! assert_eq!(best.values().len(), 4);
//! ```
//!
//! # Current Limitations
//!
//! - **Training set only**: the cached vectors cover the training samples, so a best
//!   chromosome cannot be evaluated on unseen data without an expression to replay
//! - **Single-threaded**: generations are produced sequentially from one random stream

pub use self::{
    chromosome::Chromosome,
    evolution::{Evolution, EvolutionOutcome},
    operator::{ArithmeticOperator, LogicOperator, Operator},
    params::{EvolutionParams, ParamsError},
    population::Population,
    rules::{ClassificationRules, ParityRules, ProblemRules},
    seed::{EvolutionSeed, SeedParseError},
    stats::FitnessStats,
    training_set::{TrainingSet, TrainingSetError},
};

use rand::Rng;

pub mod chromosome;
pub mod evolution;
pub mod operator;
pub mod params;
pub mod population;
pub mod rules;
pub mod seed;
pub mod stats;
pub mod training_set;

/// Evolves a population over `training` and returns the best chromosome found.
pub fn run<P, R>(
    rules: P,
    training: &TrainingSet<P::Value, P::Label>,
    params: EvolutionParams,
    rng: &mut R,
) -> Result<Chromosome<P::Value>, ParamsError>
where
    P: ProblemRules,
    R: Rng + ?Sized,
{
    let evolution = Evolution::new(rules, training, params, rng)?;
    Ok(evolution.run(rng).best)
}
