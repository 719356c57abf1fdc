//! Populations of genomes and the rank-based turnover between them.
//!
//! # Breeding Plan
//!
//! Genomes are ranked by fitness, best first. The best genome may have up to
//! `max_children` children, the next one child fewer, and so on down to a floor
//! of one child per rank. Once the children add up to the population size the
//! remaining ranks have none. Every child's second parent is drawn uniformly
//! from the whole ranked population, so a genome may breed with itself.
//!
//! ```
//! use flappy_evolution::breeding_plan;
//!
//! assert_eq!(breeding_plan(4, 2), vec![2, 1, 1, 0]);
//! assert_eq!(breeding_plan(8, 3), vec![3, 2, 1, 1, 1, 0, 0, 0]);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{EvolutionError, Genome, NetworkShape};

/// Identifier of a generation. The first generation of a run is 1.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct GenerationId(u64);

impl GenerationId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Issues strictly increasing [`GenerationId`]s.
///
/// Owned by whoever drives the evolution; every constructed [`Generation`]
/// takes exactly one id.
#[derive(Debug, Default, Clone)]
pub struct GenerationCounter {
    issued: u64,
}

impl GenerationCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids issued so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.issued
    }

    fn issue(&mut self) -> GenerationId {
        self.issued += 1;
        GenerationId(self.issued)
    }
}

/// How many children the fittest genome may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedingPolicy {
    pub max_children: usize,
}

impl Default for BreedingPolicy {
    fn default() -> Self {
        Self { max_children: 10 }
    }
}

/// Number of children for each rank, best rank first.
///
/// The result has one entry per rank and sums to `population`. A
/// `max_children` of 0 is treated as 1.
#[must_use]
pub fn breeding_plan(population: usize, max_children: usize) -> Vec<usize> {
    let mut plan = Vec::with_capacity(population);
    let mut remaining = population;
    let mut budget = max_children.max(1);
    for _ in 0..population {
        let children = budget.min(remaining);
        plan.push(children);
        remaining -= children;
        budget = budget.saturating_sub(1).max(1);
    }
    plan
}

/// One population of genomes sharing a network shape.
#[derive(Debug, Clone)]
pub struct Generation {
    id: GenerationId,
    genomes: Vec<Genome>,
}

impl Generation {
    /// Wraps `genomes` in a new generation with the next id from `counter`.
    ///
    /// Fails if there are no genomes or if their network shapes differ. No id
    /// is consumed on failure.
    pub fn new(
        genomes: Vec<Genome>,
        counter: &mut GenerationCounter,
    ) -> Result<Self, EvolutionError> {
        let first = genomes.first().ok_or(EvolutionError::EmptyPopulation)?;
        let shape = first.network().shape();
        for genome in &genomes[1..] {
            let other = genome.network().shape();
            if other != shape {
                let (what, expected, actual) = if other.inputs != shape.inputs {
                    ("genome input layer", shape.inputs, other.inputs)
                } else if other.hidden != shape.hidden {
                    ("genome hidden layer", shape.hidden, other.hidden)
                } else {
                    ("genome output layer", shape.outputs, other.outputs)
                };
                return Err(EvolutionError::DimensionMismatch {
                    what,
                    expected,
                    actual,
                });
            }
        }
        Ok(Self {
            id: counter.issue(),
            genomes,
        })
    }

    /// Creates a generation of `size` random genomes.
    pub fn random<R>(
        size: usize,
        shape: NetworkShape,
        rng: &mut R,
        counter: &mut GenerationCounter,
    ) -> Result<Self, EvolutionError>
    where
        R: Rng + ?Sized,
    {
        let genomes = (0..size)
            .map(|_| Genome::random(shape, rng))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(genomes, counter)
    }

    #[must_use]
    pub fn id(&self) -> GenerationId {
        self.id
    }

    #[must_use]
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    #[must_use]
    pub fn population_size(&self) -> usize {
        self.genomes.len()
    }

    #[must_use]
    pub fn network_shape(&self) -> NetworkShape {
        self.genomes[0].network().shape()
    }

    /// Fitness of every genome, in population order.
    pub fn fitness_values(&self) -> impl Iterator<Item = f32> + '_ {
        self.genomes.iter().map(Genome::fitness)
    }

    /// Writes one fitness value per genome, in population order.
    pub fn assign_fitness(&mut self, fitness: &[f32]) -> Result<(), EvolutionError> {
        if fitness.len() != self.genomes.len() {
            return Err(EvolutionError::DimensionMismatch {
                what: "fitness values",
                expected: self.genomes.len(),
                actual: fitness.len(),
            });
        }
        for (genome, &value) in self.genomes.iter_mut().zip(fitness) {
            genome.set_fitness(value);
        }
        Ok(())
    }

    /// Genomes ordered by fitness, best first. Ties keep population order.
    #[must_use]
    pub fn ranked(&self) -> Vec<&Genome> {
        let mut ranked: Vec<&Genome> = self.genomes.iter().collect();
        ranked.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
        ranked
    }

    /// The fittest genome; the earliest one on ties.
    #[must_use]
    pub fn best(&self) -> &Genome {
        self.genomes
            .iter()
            .reduce(|best, genome| {
                if genome.fitness().total_cmp(&best.fitness()).is_gt() {
                    genome
                } else {
                    best
                }
            })
            .expect("generation should never be empty")
    }

    /// Breeds the next generation.
    ///
    /// Walks the ranks following [`breeding_plan`]. For every child a second
    /// parent is drawn uniformly from the ranked population before the child is
    /// bred. The result has the same size and network shape and the next id
    /// from `counter`.
    ///
    /// # Panics
    ///
    /// Panics if `mutation_rate` is not in `[0, 1]`.
    #[must_use]
    pub fn next<R>(
        &self,
        policy: BreedingPolicy,
        mutation_rate: f32,
        rng: &mut R,
        counter: &mut GenerationCounter,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        let ranked = self.ranked();
        let total = ranked.len();
        let plan = breeding_plan(total, policy.max_children);

        let mut children = Vec::with_capacity(total);
        for (parent, &count) in ranked.iter().zip(&plan) {
            for _ in 0..count {
                let mate = ranked[rng.random_range(0..total)];
                children.push(parent.breed(mate, mutation_rate, rng));
            }
        }
        debug_assert_eq!(children.len(), total);

        Self {
            id: counter.issue(),
            genomes: children,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use ndarray::{Array1, Array2};
    use rand::{RngCore, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;
    use crate::NeuralNetwork;

    /// Generator whose every output is zero, counting how often it is used.
    ///
    /// With all-zero bits a fair coin always picks the first parent and a
    /// range draw always picks its lower bound.
    #[derive(Debug, Default)]
    struct ZeroRng {
        calls: usize,
    }

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            self.calls += 1;
            0
        }

        fn next_u64(&mut self) -> u64 {
            self.calls += 1;
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            self.calls += 1;
            dst.fill(0);
        }
    }

    fn constant_genome(value: f32) -> Genome {
        let shape = NetworkShape::default();
        Genome::new(
            NeuralNetwork::new(
                Array2::from_elem((shape.inputs, shape.hidden), value),
                Array1::from_elem(shape.hidden, value),
                Array2::from_elem((shape.hidden, shape.outputs), value),
                Array1::from_elem(shape.outputs, value),
            )
            .unwrap(),
        )
    }

    fn random_generation(size: usize, seed: u64, counter: &mut GenerationCounter) -> Generation {
        let mut rng = Pcg32::seed_from_u64(seed);
        Generation::random(size, NetworkShape::default(), &mut rng, counter).unwrap()
    }

    #[test]
    fn test_breeding_plan() {
        assert_eq!(breeding_plan(4, 2), vec![2, 1, 1, 0]);
        assert_eq!(breeding_plan(1, 10), vec![1]);
        assert_eq!(breeding_plan(3, 0), vec![1, 1, 1]);
        assert_eq!(breeding_plan(0, 10), Vec::<usize>::new());

        let plan = breeding_plan(50, 10);
        assert_eq!(plan.len(), 50);
        assert_eq!(plan.iter().sum::<usize>(), 50);
        // 10 + 9 + ... + 4 = 49 leaves a single child for rank 7.
        assert_eq!(&plan[..10], &[10, 9, 8, 7, 6, 5, 4, 1, 0, 0]);
        assert!(plan[8..].iter().all(|&c| c == 0));
        assert!(plan.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_breeding_plan_sums_to_population() {
        for population in 1..40 {
            for max_children in 0..12 {
                let plan = breeding_plan(population, max_children);
                assert_eq!(plan.len(), population);
                assert_eq!(plan.iter().sum::<usize>(), population);
                assert!(plan.iter().all(|&c| c >= plan[population - 1]));
            }
        }
    }

    #[test]
    fn test_ids_increase_by_one() {
        let mut counter = GenerationCounter::new();
        let first = random_generation(3, 1, &mut counter);
        assert_eq!(first.id().get(), 1);

        let mut rng = Pcg32::seed_from_u64(2);
        let second = first.next(BreedingPolicy::default(), 0.1, &mut rng, &mut counter);
        let third = second.next(BreedingPolicy::default(), 0.1, &mut rng, &mut counter);
        assert_eq!(second.id().get(), 2);
        assert_eq!(third.id().get(), 3);
        assert_eq!(counter.issued(), 3);
    }

    #[test]
    fn test_next_preserves_size_and_shape() {
        let mut counter = GenerationCounter::new();
        let mut rng = Pcg32::seed_from_u64(3);
        for size in 1..=12 {
            for rate in [0.0, 0.5, 1.0] {
                let generation = random_generation(size, 10 + size as u64, &mut counter);
                let next = generation.next(
                    BreedingPolicy { max_children: 2 },
                    rate,
                    &mut rng,
                    &mut counter,
                );
                assert_eq!(next.population_size(), size);
                assert_eq!(next.network_shape(), generation.network_shape());
                assert!(next.fitness_values().all(|f| f == 0.0));
            }
        }
    }

    #[test]
    fn test_next_walks_ranks_following_the_plan() {
        let mut counter = GenerationCounter::new();
        let genomes = (1..=4_u8).map(|i| constant_genome(f32::from(i))).collect();
        let mut generation = Generation::new(genomes, &mut counter).unwrap();
        generation.assign_fitness(&[10.0, 5.0, 5.0, 1.0]).unwrap();

        let mut rng = ZeroRng::default();
        let next = generation.next(
            BreedingPolicy { max_children: 2 },
            0.0,
            &mut rng,
            &mut counter,
        );

        // Every gene comes from the rank-walking parent, so each child is a
        // copy of it: ranks 0, 0, 1 and 2 breed, rank 3 has no child.
        let parents: Vec<&NeuralNetwork> = next.genomes().iter().map(Genome::network).collect();
        let genomes = generation.genomes();
        assert_eq!(
            parents,
            vec![
                genomes[0].network(),
                genomes[0].network(),
                genomes[1].network(),
                genomes[2].network(),
            ]
        );
        // Per child: one mate draw plus a coin and a mutation draw per parameter.
        let per_child = 2 * NetworkShape::default().parameter_count();
        assert!(rng.calls >= 4 * (per_child + 1));
    }

    #[test]
    fn test_identical_population_without_mutation_is_stable() {
        let mut counter = GenerationCounter::new();
        let mut rng = Pcg32::seed_from_u64(4);
        let genome = Genome::random(NetworkShape::default(), &mut rng).unwrap();
        let generation = Generation::new(vec![genome.clone(); 6], &mut counter).unwrap();
        let next = generation.next(BreedingPolicy::default(), 0.0, &mut rng, &mut counter);
        assert!(next.genomes().iter().all(|g| g.network() == genome.network()));
    }

    #[test]
    fn test_next_is_reproducible() {
        let run = || {
            let mut counter = GenerationCounter::new();
            let mut generation = random_generation(8, 5, &mut counter);
            generation
                .assign_fitness(&[3.0, 9.0, 1.0, 4.0, 4.0, 0.0, 7.0, 2.0])
                .unwrap();
            let mut rng = Pcg32::seed_from_u64(6);
            generation.next(BreedingPolicy::default(), 0.2, &mut rng, &mut counter)
        };
        let a: Vec<_> = run().genomes().iter().map(|g| g.network().clone()).collect();
        let b: Vec<_> = run().genomes().iter().map(|g| g.network().clone()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ranking_is_stable() {
        let mut counter = GenerationCounter::new();
        let mut generation = random_generation(4, 7, &mut counter);
        generation.assign_fitness(&[1.0, 10.0, 5.0, 5.0]).unwrap();

        let ranked = generation.ranked();
        let genomes = generation.genomes();
        let order: Vec<usize> = ranked
            .iter()
            .map(|r| genomes.iter().position(|g| ptr::eq(g, *r)).unwrap())
            .collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
        assert!(ptr::eq(generation.best(), &genomes[1]));
    }

    #[test]
    fn test_best_prefers_earliest_on_ties() {
        let mut counter = GenerationCounter::new();
        let mut generation = random_generation(3, 8, &mut counter);
        generation.assign_fitness(&[2.0, 2.0, 1.0]).unwrap();
        assert!(ptr::eq(generation.best(), &generation.genomes()[0]));
    }

    #[test]
    fn test_assign_fitness_checks_length() {
        let mut counter = GenerationCounter::new();
        let mut generation = random_generation(3, 9, &mut counter);
        assert_eq!(
            generation.assign_fitness(&[1.0, 2.0]),
            Err(EvolutionError::DimensionMismatch {
                what: "fitness values",
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_rejects_empty_and_mixed_populations() {
        let mut counter = GenerationCounter::new();
        assert!(matches!(
            Generation::new(vec![], &mut counter),
            Err(EvolutionError::EmptyPopulation)
        ));

        let genomes = vec![
            Genome::new(NeuralNetwork::zeros(NetworkShape::new(3, 3, 1))),
            Genome::new(NeuralNetwork::zeros(NetworkShape::new(2, 3, 1))),
        ];
        assert_eq!(
            Generation::new(genomes, &mut counter).unwrap_err(),
            EvolutionError::DimensionMismatch {
                what: "genome input layer",
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(counter.issued(), 0);
    }
}
