use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tgp_engine::{EvolutionParams, EvolutionSeed};

/// Result of one `tgp` run, written as JSON.
///
/// `seed` and `params` are enough to replay the run on the same data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunReport<V> {
    pub problem: String,
    pub finished_at: DateTime<Utc>,
    pub seed: EvolutionSeed,
    pub params: EvolutionParams,
    pub dataset: DatasetInfo,
    /// Misclassified training samples of the best chromosome
    pub final_fitness: usize,
    pub accuracy: f64,
    /// Best fitness at every report interval and at the last generation
    pub best_fitness_history: Vec<HistoryEntry>,
    /// Output of the best program for each training sample
    pub best_values: Vec<V>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetInfo {
    pub path: PathBuf,
    pub num_samples: usize,
    pub num_variables: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_classes: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub generation: usize,
    pub best_fitness: usize,
}
