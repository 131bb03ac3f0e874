use rand::Rng;

use crate::{operator::Operator, rules::ProblemRules, training_set::TrainingSet};

/// A traceless program: its output for every training sample and the resulting fitness.
///
/// No expression tree is kept. `fitness` is the number of misclassified samples and is
/// always recomputed whenever `values` change, so the two are replaced together.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome<V> {
    values: Vec<V>,
    fitness: usize,
}

impl<V> Chromosome<V>
where
    V: Copy,
{
    /// Wraps a value vector, computing its fitness against `training`.
    #[must_use]
    pub fn evaluate<P>(rules: &P, training: &TrainingSet<V, P::Label>, values: Vec<V>) -> Self
    where
        P: ProblemRules<Value = V>,
    {
        let mut this = Self { values, fitness: 0 };
        this.update_fitness(rules, training);
        this
    }

    /// Creates the one-variable program `f(x) = x[variable]`.
    #[must_use]
    pub fn from_variable<P>(
        rules: &P,
        training: &TrainingSet<V, P::Label>,
        variable: usize,
    ) -> Self
    where
        P: ProblemRules<Value = V>,
    {
        Self::evaluate(rules, training, training.column(variable).collect())
    }

    /// Creates a one-variable program for a uniformly chosen variable.
    #[must_use]
    pub fn random_insertion<P, R>(
        rules: &P,
        training: &TrainingSet<V, P::Label>,
        rng: &mut R,
    ) -> Self
    where
        P: ProblemRules<Value = V>,
        R: Rng + ?Sized,
    {
        let variable = rng.random_range(0..training.num_variables());
        Self::from_variable(rules, training, variable)
    }

    #[must_use]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Number of misclassified training samples. Lower is better.
    #[must_use]
    pub fn fitness(&self) -> usize {
        self.fitness
    }

    /// Overwrites this chromosome with a copy of `source`, reusing the allocation.
    pub fn copy_from(&mut self, source: &Self) {
        self.values.clone_from(&source.values);
        self.fitness = source.fitness;
    }

    /// Overwrites this chromosome with a uniformly chosen one-variable program.
    pub fn assign_random_insertion<P, R>(
        &mut self,
        rules: &P,
        training: &TrainingSet<V, P::Label>,
        rng: &mut R,
    ) where
        P: ProblemRules<Value = V>,
        R: Rng + ?Sized,
    {
        let variable = rng.random_range(0..training.num_variables());
        self.values.clear();
        self.values.extend(training.column(variable));
        self.update_fitness(rules, training);
    }

    /// Overwrites this chromosome with `op` applied element-wise to two parents.
    pub fn assign_offspring<P>(
        &mut self,
        rules: &P,
        training: &TrainingSet<V, P::Label>,
        op: P::Operator,
        parent1: &Self,
        parent2: &Self,
    ) where
        P: ProblemRules<Value = V>,
    {
        op.combine_into(&parent1.values, &parent2.values, &mut self.values);
        self.update_fitness(rules, training);
    }

    fn update_fitness<P>(&mut self, rules: &P, training: &TrainingSet<V, P::Label>)
    where
        P: ProblemRules<Value = V>,
    {
        self.fitness = rules.count_errors(&self.values, training.targets());
    }
}
