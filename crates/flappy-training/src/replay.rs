use flappy_engine::{Playfield, Seed, SensorMode, Surface, World};
use flappy_evolution::Genome;

use crate::{ConfigError, TrainingError};

/// How a replayed life ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Ticks the bird survived.
    pub score: u64,
    /// Whether the life was cut short by the score limit rather than a crash.
    pub reached_limit: bool,
}

/// Flies a single saved genome through a fresh one-bird world.
#[derive(Debug, Clone)]
pub struct Replay {
    world: World,
    genome: Genome,
    sensor: SensorMode,
    score_limit: u64,
    reached_limit: bool,
}

impl Replay {
    /// Fails if the genome's input layer does not match `sensor`.
    pub fn new(
        genome: Genome,
        sensor: SensorMode,
        playfield: Playfield,
        seed: Seed,
        score_limit: u64,
    ) -> Result<Self, TrainingError> {
        let inputs = genome.network().shape().inputs;
        if inputs != sensor.inputs() {
            return Err(ConfigError::SensorMismatch {
                mode: sensor,
                expected: sensor.inputs(),
                actual: inputs,
            }
            .into());
        }
        if score_limit == 0 {
            return Err(ConfigError::ZeroScoreLimit.into());
        }
        let world = World::new(playfield, 1, seed)?;
        Ok(Self {
            world,
            genome,
            sensor,
            score_limit,
            reached_limit: false,
        })
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.world.is_extinct()
    }

    /// Advances one tick; does nothing once the life is over.
    pub fn tick(&mut self) -> Result<(), TrainingError> {
        if self.is_finished() {
            return Ok(());
        }
        self.world.update();
        if self.world.is_extinct() {
            return Ok(());
        }
        if self.world.score() >= self.score_limit {
            self.reached_limit = true;
            self.world.end_life();
            return Ok(());
        }
        if let Some(observation) = self.world.observe(0) {
            let action = self.genome.decide(&observation.input(self.sensor))?;
            self.world.apply(0, action);
        }
        Ok(())
    }

    /// Ticks until the bird dies or reaches the score limit.
    pub fn run(mut self) -> Result<ReplayOutcome, TrainingError> {
        while !self.is_finished() {
            self.tick()?;
        }
        let outcome = self.outcome();
        tracing::info!(
            score = outcome.score,
            reached_limit = outcome.reached_limit,
            "replay finished"
        );
        Ok(outcome)
    }

    #[must_use]
    pub fn outcome(&self) -> ReplayOutcome {
        ReplayOutcome {
            score: self.world.birds()[0].score(),
            reached_limit: self.reached_limit,
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.world.render(surface);
    }
}
