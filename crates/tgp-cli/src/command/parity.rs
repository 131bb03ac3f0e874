use std::path::PathBuf;

use anyhow::Context as _;
use tgp_engine::ParityRules;

use super::evolve::{self, EvolveArg};
use crate::schema::run_report::DatasetInfo;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ParityArg {
    /// Training data: a `<samples> <variables>` header, then input bits and a target bit per line
    data: PathBuf,
    #[clap(flatten)]
    evolve: EvolveArg,
}

pub(crate) fn run(arg: &ParityArg) -> anyhow::Result<()> {
    let ParityArg {
        data,
        evolve: evolve_arg,
    } = arg;

    let training = tgp_dataset::load_parity(data)
        .with_context(|| format!("Failed to load training data: {}", data.display()))?;

    let dataset = DatasetInfo {
        path: data.clone(),
        num_samples: training.num_samples(),
        num_variables: training.num_variables(),
        num_classes: None,
    };
    evolve::evolve(ParityRules, &training, dataset, evolve_arg)
}
