/// Summary of the fitness values of a population.
///
/// Used for progress reports, where the spread between the best and the mean fitness
/// shows how far the population has converged.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct FitnessStats {
    /// The lowest (best) fitness.
    pub min: usize,
    /// The highest (worst) fitness.
    pub max: usize,
    /// The arithmetic mean of all fitness values.
    pub mean: f64,
    /// The median fitness (mean of the two middle values for even counts).
    pub median: f64,
}

impl FitnessStats {
    /// Computes statistics from unsorted fitness values.
    ///
    /// Returns `None` if `values` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tgp_engine::FitnessStats;
    ///
    /// let stats = FitnessStats::new([4, 1, 3, 2]).unwrap();
    /// assert_eq!(stats.min, 1);
    /// assert_eq!(stats.max, 4);
    /// assert_eq!(stats.mean, 2.5);
    /// assert_eq!(stats.median, 2.5);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_unstable();
        Self::from_sorted(&values)
    }

    /// Like [`Self::new`], but skips sorting.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending order.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn from_sorted(sorted_values: &[usize]) -> Option<Self> {
        debug_assert!(sorted_values.is_sorted());
        let (&min, &max) = (sorted_values.first()?, sorted_values.last()?);
        let len = sorted_values.len();
        let mean = sorted_values.iter().sum::<usize>() as f64 / len as f64;
        let median = if len % 2 == 0 {
            (sorted_values[len / 2 - 1] + sorted_values[len / 2]) as f64 / 2.0
        } else {
            sorted_values[len / 2] as f64
        };
        Some(Self {
            min,
            max,
            mean,
            median,
        })
    }
}
