use flappy_engine::Action;
use rand::Rng;

use crate::{
    EvolutionError, NetworkShape, NeuralNetwork,
    operators::{crossover, mutate},
};

/// A candidate controller: a network and the fitness it earned.
///
/// Fitness starts at 0 and is written once per life by the training driver,
/// before the generation breeds.
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    network: NeuralNetwork,
    fitness: f32,
}

impl Genome {
    #[must_use]
    pub fn new(network: NeuralNetwork) -> Self {
        Self {
            network,
            fitness: 0.0,
        }
    }

    /// Creates a genome with a standard-normal random network.
    pub fn random<R>(shape: NetworkShape, rng: &mut R) -> Result<Self, EvolutionError>
    where
        R: Rng + ?Sized,
    {
        NeuralNetwork::random(shape, rng).map(Self::new)
    }

    #[must_use]
    pub fn network(&self) -> &NeuralNetwork {
        &self.network
    }

    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f32) {
        self.fitness = fitness;
    }

    /// Breeds a child with `other`.
    ///
    /// For each of W1, b1, W2 and b2 the child parameter is
    /// `mutate(crossover(self, other), mutation_rate)`. All crossover draws for a
    /// tensor happen before its mutation draws. The child starts with fitness 0
    /// and neither parent is modified.
    ///
    /// # Panics
    ///
    /// Panics if the parents have different network shapes or if
    /// `mutation_rate` is not in `[0, 1]`.
    #[must_use]
    pub fn breed<R>(&self, other: &Self, mutation_rate: f32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let (a, b) = (&self.network, &other.network);
        let w1 = mutate(&crossover(a.w1(), b.w1(), rng), mutation_rate, rng);
        let b1 = mutate(&crossover(a.b1(), b.b1(), rng), mutation_rate, rng);
        let w2 = mutate(&crossover(a.w2(), b.w2(), rng), mutation_rate, rng);
        let b2 = mutate(&crossover(a.b2(), b.b2(), rng), mutation_rate, rng);
        Self::new(NeuralNetwork::from_parts(w1, b1, w2, b2))
    }

    /// Decides whether to flap from one input vector.
    ///
    /// The first network output is compared against zero; see
    /// [`Action::from_output`].
    ///
    /// ```
    /// use flappy_evolution::{Genome, NetworkShape, NeuralNetwork};
    ///
    /// let genome = Genome::new(NeuralNetwork::zeros(NetworkShape::default()));
    /// assert!(genome.decide(&[0.0, 0.0, 0.0]).unwrap().trigger);
    /// ```
    pub fn decide(&self, input: &[f32]) -> Result<Action, EvolutionError> {
        let output = self.network.forward(input)?;
        Ok(Action::from_output(output[0]))
    }
}
