//! Fixed-size populations and tournament selection.

use std::ops::{Index, IndexMut};

use rand::Rng;

use crate::{chromosome::Chromosome, stats::FitnessStats};

/// A fixed-size, ordered collection of chromosomes.
///
/// After [`Population::sort_by_fitness`] index 0 holds the best (lowest fitness)
/// chromosome. The size never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Population<V> {
    chromosomes: Vec<Chromosome<V>>,
}

impl<V> Population<V>
where
    V: Copy,
{
    /// Creates a population from `count` chromosomes produced by `init`.
    pub fn from_fn<F>(count: usize, init: F) -> Self
    where
        F: FnMut(usize) -> Chromosome<V>,
    {
        Self {
            chromosomes: (0..count).map(init).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    #[must_use]
    pub fn chromosomes(&self) -> &[Chromosome<V>] {
        &self.chromosomes
    }

    /// Returns the chromosome in slot 0, the best one once sorted.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty.
    #[must_use]
    pub fn best(&self) -> &Chromosome<V> {
        &self.chromosomes[0]
    }

    /// Sorts ascending by fitness. Order among equal fitness is unspecified.
    pub fn sort_by_fitness(&mut self) {
        self.chromosomes.sort_unstable_by_key(Chromosome::fitness);
    }

    #[must_use]
    pub fn is_sorted_by_fitness(&self) -> bool {
        self.chromosomes.is_sorted_by_key(Chromosome::fitness)
    }

    /// Overwrites every slot with a deep copy of the same slot of `next`, then sorts.
    ///
    /// # Panics
    ///
    /// Panics if the populations differ in size.
    pub fn replace_with(&mut self, next: &Self) {
        assert_eq!(self.len(), next.len());
        for (slot, source) in self.chromosomes.iter_mut().zip(&next.chromosomes) {
            slot.copy_from(source);
        }
        self.sort_by_fitness();
    }

    /// Fitness statistics of the whole population.
    #[must_use]
    pub fn fitness_stats(&self) -> Option<FitnessStats> {
        FitnessStats::new(self.chromosomes.iter().map(Chromosome::fitness))
    }

    /// Selects an index using tournament selection.
    ///
    /// Draws `tournament_size` uniformly random indices and returns the one with the
    /// lowest fitness; on a tie the earlier draw is kept. A tournament of size 1 is a
    /// plain uniform pick with no selection pressure.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty or `tournament_size` is 0.
    pub fn tournament_select<R>(&self, tournament_size: usize, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        assert!(tournament_size > 0);
        let mut winner = rng.random_range(0..self.len());
        for _ in 1..tournament_size {
            let contender = rng.random_range(0..self.len());
            if self.chromosomes[contender].fitness() < self.chromosomes[winner].fitness() {
                winner = contender;
            }
        }
        winner
    }
}

impl<V> Index<usize> for Population<V> {
    type Output = Chromosome<V>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.chromosomes[index]
    }
}

impl<V> IndexMut<usize> for Population<V> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.chromosomes[index]
    }
}
