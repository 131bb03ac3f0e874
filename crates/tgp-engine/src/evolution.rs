//! The generational loop.
//!
//! # Algorithm
//!
//! 1. **Init** - Fill the population with one-variable programs and sort by fitness
//! 2. **Elitism** - Slot 0 of the next generation is a copy of the current best
//! 3. **Fill** - Every other slot is either
//!    - an *insertion* (new one-variable program) with probability `insertion_probability`, or
//!    - a *recombination*: a uniformly chosen operator applied to two tournament winners.
//!      With probability `1 - crossover_probability` the offspring is discarded and the
//!      first winner is copied instead
//! 4. **Replace** - The next generation is copied over the current one and sorted
//!
//! Steps 2-4 repeat until `num_generations` generations exist (the initial population
//! counts as the first). There is no early stopping.
//!
//! # Reproducibility
//!
//! All random draws come from the generator passed by the caller, in a fixed order per
//! slot: the insertion draw, then either the variable index or the operator, both parent
//! selections and the crossover draw. The same seeded generator therefore reproduces
//! every generation exactly.

use rand::Rng;

use crate::{
    chromosome::Chromosome,
    operator::Operator,
    params::{EvolutionParams, ParamsError},
    population::Population,
    rules::ProblemRules,
    training_set::TrainingSet,
};

/// Upper bound on the history entries reserved before a run starts.
const MAX_HISTORY_RESERVE: usize = 4096;

/// Result of a complete run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOutcome<V> {
    /// Best chromosome of the final generation
    pub best: Chromosome<V>,
    /// Best fitness after initialization and after each generation
    pub best_fitness_history: Vec<usize>,
}

/// Evolution state: the problem, the training set and the two population buffers.
#[derive(Debug)]
pub struct Evolution<'a, P>
where
    P: ProblemRules,
{
    rules: P,
    training: &'a TrainingSet<P::Value, P::Label>,
    params: EvolutionParams,
    current: Population<P::Value>,
    next: Population<P::Value>,
    generation: usize,
}

impl<'a, P> Evolution<'a, P>
where
    P: ProblemRules,
{
    /// Validates `params` and builds the sorted initial population.
    pub fn new<R>(
        rules: P,
        training: &'a TrainingSet<P::Value, P::Label>,
        params: EvolutionParams,
        rng: &mut R,
    ) -> Result<Self, ParamsError>
    where
        R: Rng + ?Sized,
    {
        params.validate()?;
        log::debug!(
            "starting {} run: {} samples, {} variables, {params:?}",
            rules.name(),
            training.num_samples(),
            training.num_variables(),
        );

        let mut current = Population::from_fn(params.pop_size, |_| {
            Chromosome::random_insertion(&rules, training, rng)
        });
        current.sort_by_fitness();
        let next = current.clone();

        Ok(Self {
            rules,
            training,
            params,
            current,
            next,
            generation: 0,
        })
    }

    /// Index of the latest completed generation (0 right after initialization).
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn params(&self) -> &EvolutionParams {
        &self.params
    }

    /// The current population, sorted by fitness.
    #[must_use]
    pub fn current(&self) -> &Population<P::Value> {
        &self.current
    }

    #[must_use]
    pub fn best(&self) -> &Chromosome<P::Value> {
        self.current.best()
    }

    /// Returns `true` once `num_generations` generations have been produced.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.generation + 1 >= self.params.num_generations
    }

    /// Produces the next generation and makes it current.
    pub fn step<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.generation += 1;
        if self.params.report_interval > 0 && self.generation % self.params.report_interval == 0 {
            self.report();
        }

        self.next[0].copy_from(self.current.best());
        for slot in 1..self.params.pop_size {
            self.fill_slot(slot, rng);
        }
        self.current.replace_with(&self.next);
    }

    /// Runs the remaining generations.
    pub fn run<R>(mut self, rng: &mut R) -> EvolutionOutcome<P::Value>
    where
        R: Rng + ?Sized,
    {
        let mut best_fitness_history = self.new_fitness_history();
        while !self.is_finished() {
            self.step(rng);
            best_fitness_history.push(self.best().fitness());
        }
        log::info!(
            "{} run finished after {} generations: best fitness = {}",
            self.rules.name(),
            self.generation + 1,
            self.best().fitness()
        );
        EvolutionOutcome {
            best: self.current.best().clone(),
            best_fitness_history,
        }
    }

    fn new_fitness_history(&self) -> Vec<usize> {
        let mut history =
            Vec::with_capacity(self.params.num_generations.min(MAX_HISTORY_RESERVE));
        history.push(self.best().fitness());
        history
    }

    fn fill_slot<R>(&mut self, slot: usize, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let rules = &self.rules;
        let training = self.training;
        let params = &self.params;
        let current = &self.current;
        let next = &mut self.next;

        let p: f64 = rng.random();
        if p < params.insertion_probability {
            next[slot].assign_random_insertion(rules, training, rng);
            return;
        }

        let operators = <P::Operator as Operator<P::Value>>::ALL;
        let op = operators[rng.random_range(0..operators.len())];
        let p1 = current.tournament_select(params.tournament_size, rng);
        let p2 = current.tournament_select(params.tournament_size, rng);
        let ps: f64 = rng.random();
        if ps <= params.crossover_probability {
            next[slot].assign_offspring(rules, training, op, &current[p1], &current[p2]);
        } else {
            next[slot].copy_from(&current[p1]);
        }
    }

    fn report(&self) {
        log::info!("{}", self.progress_message());
    }

    fn progress_message(&self) -> String {
        let best = self.best().fitness();
        match self.current.fitness_stats() {
            Some(stats) => format!(
                "generation = {} best fitness = {best} (min {}, mean {:.2}, max {})",
                self.generation, stats.min, stats.mean, stats.max
            ),
            None => format!("generation = {} best fitness = {best}", self.generation),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::{
        operator::LogicOperator,
        rules::{ClassificationRules, ParityRules},
    };

    fn xor_training() -> TrainingSet<bool, bool> {
        TrainingSet::new(
            vec![
                vec![false, false],
                vec![false, true],
                vec![true, false],
                vec![true, true],
            ],
            vec![false, true, true, false],
        )
        .unwrap()
    }

    fn even_parity_training(num_variables: usize) -> TrainingSet<bool, bool> {
        let samples: Vec<Vec<bool>> = (0..1_usize << num_variables)
            .map(|bits| (0..num_variables).map(|j| (bits >> j) & 1 == 1).collect())
            .collect();
        let targets = samples
            .iter()
            .map(|row| row.iter().filter(|&&b| b).count() % 2 == 0)
            .collect();
        TrainingSet::new(samples, targets).unwrap()
    }

    fn small_classification_training() -> TrainingSet<f64, u32> {
        let samples = (0..30)
            .map(|i| {
                let x = f64::from(i) / 10.0;
                vec![x, 3.0 - x, 1.0, 0.0]
            })
            .collect::<Vec<_>>();
        let targets = (0..30).map(|i| u32::from(i >= 15) + u32::from(i >= 25)).collect();
        TrainingSet::new(samples, targets).unwrap()
    }

    /// Repeats the draws `fill_slot` makes for a recombination slot.
    fn replay_recombination(
        current: &Population<bool>,
        tournament_size: usize,
        rng: &mut Pcg32,
    ) -> (LogicOperator, usize, usize) {
        let _insertion: f64 = rng.random();
        let operators = <LogicOperator as Operator<bool>>::ALL;
        let op = operators[rng.random_range(0..operators.len())];
        let p1 = current.tournament_select(tournament_size, rng);
        let p2 = current.tournament_select(tournament_size, rng);
        let _crossover: f64 = rng.random();
        (op, p1, p2)
    }

    fn params(pop_size: usize, num_generations: usize) -> EvolutionParams {
        EvolutionParams {
            pop_size,
            num_generations,
            ..Default::default()
        }
    }

    #[test]
    fn test_init_is_sorted_and_sized() {
        let training = even_parity_training(3);
        let mut rng = Pcg32::seed_from_u64(1);
        let evolution = Evolution::new(ParityRules, &training, params(20, 10), &mut rng).unwrap();
        assert_eq!(evolution.generation(), 0);
        assert_eq!(evolution.current().len(), 20);
        assert!(evolution.current().is_sorted_by_fitness());
    }

    #[test]
    fn test_invalid_params_fail_fast() {
        let training = xor_training();
        let mut rng = Pcg32::seed_from_u64(1);
        let result = Evolution::new(ParityRules, &training, params(0, 10), &mut rng);
        assert!(matches!(result, Err(ParamsError::EmptyPopulation)));
    }

    #[test]
    fn test_elitism_and_population_invariants() {
        let training = even_parity_training(4);
        let mut rng = Pcg32::seed_from_u64(99);
        let mut evolution =
            Evolution::new(ParityRules, &training, params(30, 200), &mut rng).unwrap();
        let mut previous_best = evolution.best().fitness();
        while !evolution.is_finished() {
            evolution.step(&mut rng);
            let current = evolution.current();
            assert_eq!(current.len(), 30);
            assert!(current.is_sorted_by_fitness());
            assert!(evolution.best().fitness() <= previous_best);
            previous_best = evolution.best().fitness();
            for c in current.chromosomes() {
                assert_eq!(ParityRules.count_errors(c.values(), training.targets()), c.fitness());
            }
        }
        assert_eq!(evolution.generation(), 199);
    }

    #[test]
    fn test_classification_fitness_never_drifts() {
        let training = small_classification_training();
        let rules = ClassificationRules::new(3);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut evolution = Evolution::new(rules, &training, params(25, 60), &mut rng).unwrap();
        while !evolution.is_finished() {
            evolution.step(&mut rng);
        }
        for c in evolution.current().chromosomes() {
            assert_eq!(rules.count_errors(c.values(), training.targets()), c.fitness());
        }
    }

    #[test]
    fn test_same_seed_same_history() {
        let training = small_classification_training();
        let run = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            Evolution::new(ClassificationRules::new(3), &training, params(40, 150), &mut rng)
                .unwrap()
                .run(&mut rng)
        };
        let a = run(2016);
        let b = run(2016);
        assert_eq!(a.best_fitness_history, b.best_fitness_history);
        assert_eq!(a.best.fitness(), b.best.fitness());
        let bits = |c: &Chromosome<f64>| c.values().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a.best), bits(&b.best));
    }

    #[test]
    fn test_history_is_monotonic_and_complete() {
        let training = even_parity_training(3);
        let mut rng = Pcg32::seed_from_u64(11);
        let outcome = Evolution::new(ParityRules, &training, params(50, 100), &mut rng)
            .unwrap()
            .run(&mut rng);
        assert_eq!(outcome.best_fitness_history.len(), 100);
        assert!(outcome.best_fitness_history.is_sorted_by(|a, b| a >= b));
        assert_eq!(outcome.best_fitness_history.last(), Some(&outcome.best.fitness()));
    }

    #[test]
    fn test_xor_end_to_end() {
        let training = xor_training();
        let mut rng = Pcg32::seed_from_u64(0);
        let evolution = Evolution::new(ParityRules, &training, params(10, 50), &mut rng).unwrap();
        let initial_best = evolution.best().fitness();
        let outcome = evolution.run(&mut rng);
        assert!(outcome.best.fitness() <= initial_best);
        assert_eq!(outcome.best.values().len(), 4);
    }

    #[test]
    fn test_single_generation_is_init_only() {
        let training = xor_training();
        let mut rng = Pcg32::seed_from_u64(3);
        let evolution = Evolution::new(ParityRules, &training, params(5, 1), &mut rng).unwrap();
        assert!(evolution.is_finished());
        let initial = evolution.best().clone();
        let outcome = evolution.run(&mut rng);
        assert_eq!(outcome.best, initial);
        assert_eq!(outcome.best_fitness_history, vec![initial.fitness()]);
    }

    #[test]
    fn test_zero_crossover_only_copies_parents() {
        // Without insertion or accepted crossover every slot is a copy of an existing
        // chromosome, so no new value vector can appear.
        let training = even_parity_training(3);
        let mut rng = Pcg32::seed_from_u64(8);
        let params = EvolutionParams {
            pop_size: 12,
            num_generations: 20,
            insertion_probability: 0.0,
            crossover_probability: 0.0,
            ..Default::default()
        };
        let mut evolution = Evolution::new(ParityRules, &training, params, &mut rng).unwrap();
        let columns: Vec<Vec<bool>> =
            (0..3).map(|j| training.column(j).collect()).collect();
        while !evolution.is_finished() {
            evolution.step(&mut rng);
        }
        for c in evolution.current().chromosomes() {
            assert!(columns.iter().any(|col| col.as_slice() == c.values()));
        }
    }

    #[test]
    fn test_even_parity_improves() {
        let training = even_parity_training(3);
        let mut rng = Pcg32::seed_from_u64(2024);
        let evolution =
            Evolution::new(ParityRules, &training, params(100, 500), &mut rng).unwrap();
        let initial_best = evolution.best().fitness();
        let outcome = evolution.run(&mut rng);
        assert_eq!(initial_best, 4);
        assert!(outcome.best.fitness() < initial_best);
    }

    #[test]
    fn test_rejected_crossover_copies_first_parent() {
        let training = even_parity_training(3);
        let params = EvolutionParams {
            pop_size: 12,
            insertion_probability: 0.0,
            crossover_probability: 0.0,
            ..Default::default()
        };
        let mut distinct_parents = 0;
        for seed in 0..8 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut evolution =
                Evolution::new(ParityRules, &training, params.clone(), &mut rng).unwrap();
            for slot in 1..params.pop_size {
                let mut replay = rng.clone();
                let (_, p1, p2) =
                    replay_recombination(&evolution.current, params.tournament_size, &mut replay);
                evolution.fill_slot(slot, &mut rng);
                assert_eq!(evolution.next[slot], evolution.current[p1]);
                assert_eq!(rng.random::<u64>(), replay.random::<u64>());
                if evolution.current[p1].values() != evolution.current[p2].values() {
                    distinct_parents += 1;
                }
            }
        }
        assert!(distinct_parents > 0);
    }

    #[test]
    fn test_accepted_crossover_combines_both_parents() {
        let training = even_parity_training(3);
        let params = EvolutionParams {
            pop_size: 12,
            insertion_probability: 0.0,
            crossover_probability: 1.0,
            ..Default::default()
        };
        for seed in 0..8 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut evolution =
                Evolution::new(ParityRules, &training, params.clone(), &mut rng).unwrap();
            for slot in 1..params.pop_size {
                let mut replay = rng.clone();
                let (op, p1, p2) =
                    replay_recombination(&evolution.current, params.tournament_size, &mut replay);
                evolution.fill_slot(slot, &mut rng);
                let expected: Vec<bool> = evolution.current[p1]
                    .values()
                    .iter()
                    .zip(evolution.current[p2].values())
                    .map(|(&a, &b)| op.apply(a, b))
                    .collect();
                let offspring = &evolution.next[slot];
                assert_eq!(offspring.values(), expected.as_slice());
                assert_eq!(
                    offspring.fitness(),
                    ParityRules.count_errors(&expected, training.targets())
                );
                assert_eq!(rng.random::<u64>(), replay.random::<u64>());
            }
        }
    }

    #[test]
    fn test_history_reserve_is_bounded() {
        let training = xor_training();
        let mut rng = Pcg32::seed_from_u64(4);
        let params = EvolutionParams {
            pop_size: 2,
            num_generations: usize::MAX / 2,
            report_interval: 0,
            ..Default::default()
        };
        let evolution = Evolution::new(ParityRules, &training, params, &mut rng).unwrap();
        let history = evolution.new_fitness_history();
        assert_eq!(history, vec![evolution.best().fitness()]);
        assert!(history.capacity() <= MAX_HISTORY_RESERVE);
    }

    #[test]
    fn test_progress_message_reports_min_mean_max() {
        let training = xor_training();
        let mut rng = Pcg32::seed_from_u64(6);
        let evolution = Evolution::new(ParityRules, &training, params(10, 5), &mut rng).unwrap();
        let stats = evolution.current().fitness_stats().unwrap();
        assert_eq!(stats.min, evolution.best().fitness());
        let message = evolution.progress_message();
        assert!(message.starts_with(&format!("generation = 0 best fitness = {}", stats.min)));
        assert!(message.contains(&format!(
            "(min {}, mean {:.2}, max {})",
            stats.min, stats.mean, stats.max
        )));
    }
}
