//! Immutable training data shared by every chromosome of a run.

/// Error returned when a [`TrainingSet`] would violate its shape invariants.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TrainingSetError {
    #[display("training set has no samples")]
    NoSamples,
    #[display("training set has no input variables")]
    NoVariables,
    #[display("sample {index} has {actual} variables, expected {expected}")]
    RaggedRow {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[display("{targets} targets do not match {samples} samples")]
    TargetCountMismatch { samples: usize, targets: usize },
}

/// Input matrix (rows are samples, columns are variables) plus the target of each sample.
///
/// The set is validated once on construction and never re-checked by the engine.
/// Every row has the same number of variables, there is at least one sample and one
/// variable, and `targets.len() == samples.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet<V, L> {
    samples: Vec<Vec<V>>,
    targets: Vec<L>,
    num_variables: usize,
}

impl<V, L> TrainingSet<V, L>
where
    V: Copy,
{
    /// Builds a training set from row-major samples and aligned targets.
    ///
    /// # Examples
    ///
    /// ```
    /// use tgp_engine::TrainingSet;
    ///
    /// let training = TrainingSet::new(
    ///     vec![vec![false, false], vec![false, true], vec![true, false], vec![true, true]],
    ///     vec![true, false, false, true],
    /// )
    /// .unwrap();
    /// assert_eq!(training.num_samples(), 4);
    /// assert_eq!(training.num_variables(), 2);
    /// ```
    pub fn new(samples: Vec<Vec<V>>, targets: Vec<L>) -> Result<Self, TrainingSetError> {
        let Some(first) = samples.first() else {
            return Err(TrainingSetError::NoSamples);
        };
        let num_variables = first.len();
        if num_variables == 0 {
            return Err(TrainingSetError::NoVariables);
        }
        if let Some((index, row)) = samples
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != num_variables)
        {
            return Err(TrainingSetError::RaggedRow {
                index,
                expected: num_variables,
                actual: row.len(),
            });
        }
        if targets.len() != samples.len() {
            return Err(TrainingSetError::TargetCountMismatch {
                samples: samples.len(),
                targets: targets.len(),
            });
        }
        Ok(Self {
            samples,
            targets,
            num_variables,
        })
    }

    #[must_use]
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    #[must_use]
    pub fn samples(&self) -> &[Vec<V>] {
        &self.samples
    }

    #[must_use]
    pub fn targets(&self) -> &[L] {
        &self.targets
    }

    /// Returns the values of one input variable across all samples.
    ///
    /// # Panics
    ///
    /// Panics if `variable >= self.num_variables()`.
    pub fn column(&self, variable: usize) -> impl ExactSizeIterator<Item = V> + '_ {
        assert!(variable < self.num_variables);
        self.samples.iter().map(move |row| row[variable])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_samples() {
        let result = TrainingSet::<f64, u32>::new(vec![], vec![]);
        assert_eq!(result, Err(TrainingSetError::NoSamples));
    }

    #[test]
    fn test_rejects_zero_variables() {
        let result = TrainingSet::<f64, u32>::new(vec![vec![], vec![]], vec![0, 1]);
        assert_eq!(result, Err(TrainingSetError::NoVariables));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let result = TrainingSet::new(vec![vec![1.0, 2.0], vec![3.0]], vec![0_u32, 1]);
        assert_eq!(
            result,
            Err(TrainingSetError::RaggedRow {
                index: 1,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_rejects_target_mismatch() {
        let result = TrainingSet::new(vec![vec![1.0], vec![3.0]], vec![0_u32]);
        assert_eq!(
            result,
            Err(TrainingSetError::TargetCountMismatch {
                samples: 2,
                targets: 1
            })
        );
    }

    #[test]
    fn test_column() {
        let training = TrainingSet::new(
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            vec![0_u32, 1, 0],
        )
        .unwrap();
        assert_eq!(training.column(1).collect::<Vec<_>>(), vec![2.0, 4.0, 6.0]);
        assert_eq!(training.column(0).len(), 3);
    }
}
