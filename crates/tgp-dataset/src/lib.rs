//! Training data loaders.
//!
//! Two plain-text formats are supported.
//!
//! # Classification
//!
//! One sample per non-empty line: `n` real-valued inputs followed by an integer class
//! label in `[0, num_classes)`. The variable count is taken from the first non-empty
//! line (its field count minus one).
//!
//! ```text
//! 0.25 0.50 0.10 1
//! 0.75 0.20 0.35 0
//! ```
//!
//! # Parity
//!
//! A header with the number of samples and variables, then one line per sample with
//! `num_variables` bits followed by the target bit.
//!
//! ```text
//! 4 2
//! 0 0 1
//! 0 1 0
//! 1 0 0
//! 1 1 1
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tgp_engine::{TrainingSet, TrainingSetError};

pub type ClassificationSet = TrainingSet<f64, u32>;
pub type ParitySet = TrainingSet<bool, bool>;

/// Largest class label accepted in classification data.
///
/// Fitness evaluation scans every class for every sample, so the class count has to
/// stay small.
pub const MAX_CLASS_LABEL: u32 = 65_535;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("no samples found")]
    Empty,
    #[display("line {line}: expected at least one input and a class label")]
    NoVariables { line: usize },
    #[display("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[display("line {line}: invalid number {token:?}")]
    InvalidNumber { line: usize, token: String },
    #[display("line {line}: invalid class label {token:?}")]
    InvalidLabel { line: usize, token: String },
    #[display("line {line}: class label {label} exceeds the maximum of {}", MAX_CLASS_LABEL)]
    LabelTooLarge { line: usize, label: u32 },
    #[display("line {line}: invalid bit {token:?}, expected 0 or 1")]
    InvalidBit { line: usize, token: String },
    #[display("line {line}: invalid header value {token:?}")]
    InvalidHeader { line: usize, token: String },
    #[display("unexpected end of data: missing {missing}")]
    UnexpectedEnd { missing: &'static str },
    #[display("line {line}: unexpected trailing data {token:?}")]
    TrailingData { line: usize, token: String },
    #[display("{_0}")]
    Shape(TrainingSetError),
}

fn read_file(path: &Path) -> Result<String, DatasetError> {
    fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Loads a classification data file.
///
/// `separator` splits fields; `None` splits on any whitespace.
pub fn load_classification<P>(
    path: P,
    separator: Option<char>,
) -> Result<ClassificationSet, DatasetError>
where
    P: AsRef<Path>,
{
    parse_classification(&read_file(path.as_ref())?, separator)
}

/// Parses classification data from a string.
///
/// # Examples
///
/// ```
/// let training = tgp_dataset::parse_classification("0.5 1.5 1\n2.0 0.1 0\n", None).unwrap();
/// assert_eq!(training.num_samples(), 2);
/// assert_eq!(training.num_variables(), 2);
/// assert_eq!(training.targets(), &[1, 0]);
/// ```
pub fn parse_classification(
    input: &str,
    separator: Option<char>,
) -> Result<ClassificationSet, DatasetError> {
    let mut samples = vec![];
    let mut targets = vec![];
    let mut expected_fields = None;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let fields: Vec<&str> = match separator {
            Some(sep) => line
                .split(sep)
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .collect(),
            None => line.split_whitespace().collect(),
        };
        let Some((label, inputs)) = fields.split_last() else {
            continue;
        };

        let expected = *expected_fields.get_or_insert(fields.len());
        if expected < 2 {
            return Err(DatasetError::NoVariables { line: line_no });
        }
        if fields.len() != expected {
            return Err(DatasetError::FieldCount {
                line: line_no,
                expected,
                found: fields.len(),
            });
        }

        let row = inputs
            .iter()
            .map(|token| {
                token
                    .parse::<f64>()
                    .map_err(|_| DatasetError::InvalidNumber {
                        line: line_no,
                        token: (*token).to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let label = label
            .parse::<u32>()
            .map_err(|_| DatasetError::InvalidLabel {
                line: line_no,
                token: (*label).to_owned(),
            })?;
        if label > MAX_CLASS_LABEL {
            return Err(DatasetError::LabelTooLarge {
                line: line_no,
                label,
            });
        }
        samples.push(row);
        targets.push(label);
    }

    if samples.is_empty() {
        return Err(DatasetError::Empty);
    }
    TrainingSet::new(samples, targets).map_err(DatasetError::Shape)
}

/// Number of classes implied by the labels: the largest label plus one.
///
/// Labels parsed by this crate never exceed [`MAX_CLASS_LABEL`].
#[must_use]
pub fn infer_num_classes(training: &ClassificationSet) -> u32 {
    training
        .targets()
        .iter()
        .max()
        .map_or(0, |&max| max.saturating_add(1))
}

/// Loads a parity data file.
pub fn load_parity<P>(path: P) -> Result<ParitySet, DatasetError>
where
    P: AsRef<Path>,
{
    parse_parity(&read_file(path.as_ref())?)
}

/// Parses parity data from a string.
///
/// # Examples
///
/// ```
/// let training = tgp_dataset::parse_parity("2 1\n0 1\n1 0\n").unwrap();
/// assert_eq!(training.num_samples(), 2);
/// assert_eq!(training.targets(), &[true, false]);
/// ```
pub fn parse_parity(input: &str) -> Result<ParitySet, DatasetError> {
    let mut tokens = input
        .lines()
        .enumerate()
        .flat_map(|(index, line)| line.split_whitespace().map(move |token| (index + 1, token)));

    let mut header = |missing: &'static str| -> Result<usize, DatasetError> {
        let (line, token) = tokens.next().ok_or(DatasetError::UnexpectedEnd { missing })?;
        token
            .parse::<usize>()
            .map_err(|_| DatasetError::InvalidHeader {
                line,
                token: token.to_owned(),
            })
    };
    let num_samples = header("number of training samples")?;
    let num_variables = header("number of variables")?;

    let mut bit = |missing: &'static str| -> Result<bool, DatasetError> {
        let (line, token) = tokens.next().ok_or(DatasetError::UnexpectedEnd { missing })?;
        match token {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(DatasetError::InvalidBit {
                line,
                token: token.to_owned(),
            }),
        }
    };
    let mut samples = vec![];
    let mut targets = vec![];
    for _ in 0..num_samples {
        let row = (0..num_variables)
            .map(|_| bit("input bit"))
            .collect::<Result<Vec<_>, _>>()?;
        samples.push(row);
        targets.push(bit("target bit")?);
    }

    if let Some((line, token)) = tokens.next() {
        return Err(DatasetError::TrailingData {
            line,
            token: token.to_owned(),
        });
    }
    if samples.is_empty() {
        return Err(DatasetError::Empty);
    }
    TrainingSet::new(samples, targets).map_err(DatasetError::Shape)
}
