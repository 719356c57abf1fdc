//! Neuro-evolution of small feed-forward networks.
//!
//! Each agent is driven by a [`NeuralNetwork`] with one hidden layer. Networks
//! are never trained by gradients; instead a [`Generation`] of [`Genome`]s is
//! scored by the simulation and replaced by the next generation, bred from the
//! fittest genomes.
//!
//! # Evolution Cycle
//!
//! ```text
//! Generation (id n)
//!     ↓ each genome drives one bird
//! Fitness (ticks survived)
//!     ↓ ranked, budgeted by rank
//! Breeding (uniform crossover + multiplicative mutation)
//!     ↓ same population size
//! Generation (id n + 1)
//! ```
//!
//! # Modules
//!
//! - [`network`] - `tanh` multilayer perceptron and its forward pass
//! - [`operators`] - Element-wise crossover and mutation over parameter arrays
//! - [`genome`] - A network plus its fitness, breeding and decisions
//! - [`generation`] - Populations, rank-based breeding plans and generation ids
//!
//! # Randomness
//!
//! Every operation that needs randomness takes an `R: Rng + ?Sized`. Given the
//! same seeded generator the whole evolution is reproducible.

pub use self::{generation::*, genome::*, network::*};

pub mod generation;
pub mod genome;
pub mod network;
pub mod operators;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EvolutionError {
    #[display("dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[display("a generation needs at least one genome")]
    EmptyPopulation,
}
