//! Problem rules: the value type, target type, operator set and error rule of a problem.
//!
//! The evolution loop is shared by every problem; only these rules differ. Two rule sets
//! exist:
//!
//! - [`ClassificationRules`] - real-valued programs rounded to the nearest class label
//! - [`ParityRules`] - boolean programs compared bit-for-bit with the target

use crate::operator::{ArithmeticOperator, LogicOperator, Operator};

/// Capabilities the evolution engine needs from a problem.
pub trait ProblemRules {
    /// Output of a program for one training sample.
    type Value: Copy + PartialEq + std::fmt::Debug;
    /// Expected output for one training sample.
    type Label: Copy + PartialEq + std::fmt::Debug;
    /// The operator set used for recombination.
    type Operator: Operator<Self::Value>;

    /// Short problem name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Returns `true` if `value` does not reproduce `label`.
    fn is_misclassified(&self, value: Self::Value, label: Self::Label) -> bool;

    /// Counts the misclassified samples of a value vector.
    fn count_errors(&self, values: &[Self::Value], labels: &[Self::Label]) -> usize {
        debug_assert_eq!(values.len(), labels.len());
        values
            .iter()
            .zip(labels)
            .filter(|&(&value, &label)| self.is_misclassified(value, label))
            .count()
    }
}

/// Multi-class classification: each value is assigned to the nearest class index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRules {
    num_classes: u32,
}

impl ClassificationRules {
    #[must_use]
    pub fn new(num_classes: u32) -> Self {
        Self { num_classes }
    }

    #[must_use]
    pub fn num_classes(&self) -> u32 {
        self.num_classes
    }

    /// Returns the class `k` in `0..num_classes` minimizing `|value - k|`.
    ///
    /// On a tie the smaller class wins. Values with no finite distance to any class
    /// (NaN, infinities) have no nearest class and return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tgp_engine::ClassificationRules;
    ///
    /// let rules = ClassificationRules::new(3);
    /// assert_eq!(rules.nearest_class(1.2), Some(1));
    /// assert_eq!(rules.nearest_class(1.5), Some(1));
    /// assert_eq!(rules.nearest_class(-4.0), Some(0));
    /// assert_eq!(rules.nearest_class(f64::NAN), None);
    /// ```
    #[must_use]
    pub fn nearest_class(&self, value: f64) -> Option<u32> {
        let mut min_distance = f64::MAX;
        let mut nearest = None;
        for k in 0..self.num_classes {
            let distance = (value - f64::from(k)).abs();
            if distance < min_distance {
                min_distance = distance;
                nearest = Some(k);
            }
        }
        nearest
    }
}

impl ProblemRules for ClassificationRules {
    type Value = f64;
    type Label = u32;
    type Operator = ArithmeticOperator;

    fn name(&self) -> &'static str {
        "classification"
    }

    fn is_misclassified(&self, value: f64, label: u32) -> bool {
        self.nearest_class(value) != Some(label)
    }
}

/// Boolean functions such as even-parity: a sample is wrong if the output bit differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParityRules;

impl ProblemRules for ParityRules {
    type Value = bool;
    type Label = bool;
    type Operator = LogicOperator;

    fn name(&self) -> &'static str {
        "parity"
    }

    fn is_misclassified(&self, value: bool, label: bool) -> bool {
        value != label
    }
}
