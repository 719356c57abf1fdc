use std::path::Path;

use chrono::{DateTime, Utc};
use flappy_engine::{Playfield, Seed, SensorMode};
use flappy_evolution::{GenerationId, NeuralNetwork};
use serde::{Deserialize, Serialize};

use crate::util;

/// The best genome of a training run, saved for replay.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct ChampionModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub generation: GenerationId,
    pub fitness: f32,
    pub seed: Seed,
    pub sensor: SensorMode,
    pub playfield: Playfield,
    pub network: NeuralNetwork,
}

impl ChampionModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("champion", path)
    }
}
