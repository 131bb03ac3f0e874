use std::path::PathBuf;

use anyhow::{Context as _, ensure};
use tgp_dataset::MAX_CLASS_LABEL;
use tgp_engine::ClassificationRules;

use super::evolve::{self, EvolveArg};
use crate::schema::run_report::DatasetInfo;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ClassifyArg {
    /// Training data: whitespace-separated inputs followed by an integer class label
    data: PathBuf,
    /// Field separator (default: any whitespace)
    #[arg(long)]
    separator: Option<char>,
    /// Number of classes (default: largest label + 1)
    #[arg(long)]
    num_classes: Option<u32>,
    #[clap(flatten)]
    evolve: EvolveArg,
}

pub(crate) fn run(arg: &ClassifyArg) -> anyhow::Result<()> {
    let ClassifyArg {
        data,
        separator,
        num_classes,
        evolve: evolve_arg,
    } = arg;

    let training = tgp_dataset::load_classification(data, *separator)
        .with_context(|| format!("Failed to load training data: {}", data.display()))?;
    let inferred = tgp_dataset::infer_num_classes(&training);
    log::debug!("labels imply {inferred} classes");
    let num_classes = match *num_classes {
        Some(n) => {
            ensure!(
                n >= inferred,
                "--num-classes {n} is too small: the data contains label {}",
                inferred - 1
            );
            ensure!(
                n <= MAX_CLASS_LABEL + 1,
                "--num-classes {n} is too large: at most {} classes are supported",
                MAX_CLASS_LABEL + 1
            );
            n
        }
        None => inferred,
    };
    eprintln!("num classes = {num_classes}");

    let dataset = DatasetInfo {
        path: data.clone(),
        num_samples: training.num_samples(),
        num_variables: training.num_variables(),
        num_classes: Some(num_classes),
    };
    evolve::evolve(
        ClassificationRules::new(num_classes),
        &training,
        dataset,
        evolve_arg,
    )
}
