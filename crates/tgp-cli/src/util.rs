use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use serde::Serialize;
use tgp_engine::EvolutionParams;

/// Writes `value` as pretty-printed JSON to `path`, or to stdout when `path` is `None`.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    let (mut writer, target): (Box<dyn Write>, String) = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            (Box::new(BufWriter::new(file)), path.display().to_string())
        }
        None => (Box::new(io::stdout().lock()), "stdout".to_owned()),
    };
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush output to {target}"))?;
    Ok(())
}

/// Reads evolution parameters from a JSON file.
///
/// Fields missing from the file keep their default values.
pub fn read_params_file(path: &Path) -> anyhow::Result<EvolutionParams> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open parameters file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse parameters file: {}", path.display()))
}
