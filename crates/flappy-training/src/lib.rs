//! Evolution driver tying the simulation and the genetic core together.
//!
//! # How Training Works
//!
//! 1. **Population** - A [`Generation`](flappy_evolution::Generation) of random
//!    networks, one per bird
//! 2. **Life** - Every tick each living bird observes the nearest pipe pair and
//!    its genome decides whether to flap
//! 3. **Fitness** - A genome's fitness is the score its bird held on the last tick it was alive
//! 4. **Turnover** - Once every bird is dead the generation is ranked and bred,
//!    and the world is reset
//! 5. **Repeat** - Forever, or until the caller stops ticking
//!
//! # Architecture
//!
//! ```text
//! World (flappy-engine)
//!     ↓ Observation per living bird
//! Genome::decide (flappy-evolution)
//!     ↓ Action
//! World::apply
//!     ↓ extinction
//! GenerationReport + Generation::next
//! ```
//!
//! # Example
//!
//! ```
//! use flappy_engine::Seed;
//! use flappy_training::{Trainer, TrainingConfig};
//!
//! let config = TrainingConfig {
//!     population: 10,
//!     seed: Some(Seed::from_u64(1)),
//!     score_limit: Some(200),
//!     ..TrainingConfig::default()
//! };
//! let mut trainer = Trainer::new(config).unwrap();
//! let report = loop {
//!     if let Some(report) = trainer.tick().unwrap() {
//!         break report;
//!     }
//! };
//! assert_eq!(report.generation.get(), 1);
//! assert_eq!(trainer.generation().id().get(), 2);
//! ```

use flappy_engine::PlayfieldError;
use flappy_evolution::EvolutionError;

pub use self::{config::*, fast_forward::*, replay::*, report::*, trainer::*};

pub mod config;
pub mod fast_forward;
pub mod replay;
pub mod report;
pub mod trainer;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainingError {
    #[display("invalid training configuration: {_0}")]
    Config(ConfigError),
    #[display("invalid playfield: {_0}")]
    Playfield(PlayfieldError),
    #[display("evolution failed: {_0}")]
    Evolution(EvolutionError),
}
