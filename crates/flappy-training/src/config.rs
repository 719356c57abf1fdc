use flappy_engine::{Playfield, Seed, SensorMode};
use flappy_evolution::{BreedingPolicy, NetworkShape};
use serde::{Deserialize, Serialize};

use crate::TrainingError;

/// Largest score that converts to an `f32` fitness without rounding.
pub const MAX_EXACT_SCORE: u64 = 1 << f32::MANTISSA_DIGITS;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population must contain at least one bird")]
    EmptyPopulation,
    #[display("hidden layer must contain at least one unit")]
    EmptyHiddenLayer,
    #[display("mutation rate {rate} is outside [0, 1]")]
    MutationRate { rate: f32 },
    #[display("score limit must be at least 1")]
    ZeroScoreLimit,
    #[display("score limit {limit} is too large to keep fitness exact")]
    ScoreLimitTooLarge { limit: u64 },
    #[display("network expects {actual} inputs but the {mode:?} sensor produces {expected}")]
    SensorMismatch {
        mode: SensorMode,
        expected: usize,
        actual: usize,
    },
}

/// Parameters of a training run.
///
/// Every field has a default, so a JSON configuration file only needs to name
/// the fields it changes.
///
/// ```
/// use flappy_training::TrainingConfig;
///
/// let config: TrainingConfig = serde_json::from_str(r#"{ "population": 20 }"#).unwrap();
/// assert_eq!(config.population, 20);
/// assert_eq!(config.mutation_rate, 0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Birds (and genomes) per generation.
    pub population: usize,
    /// Units in the hidden layer.
    pub hidden: usize,
    pub sensor: SensorMode,
    /// Per-parameter mutation probability.
    pub mutation_rate: f32,
    /// Children allowed to the fittest genome.
    pub max_children: usize,
    /// Seed for the whole run; random when absent.
    pub seed: Option<Seed>,
    /// Ends a life once the world score reaches this value.
    ///
    /// At most [`MAX_EXACT_SCORE`]. Without a limit, scores past that value
    /// round to the nearest representable fitness.
    pub score_limit: Option<u64>,
    pub playfield: Playfield,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            population: 50,
            hidden: 3,
            sensor: SensorMode::default(),
            mutation_rate: 0.1,
            max_children: BreedingPolicy::default().max_children,
            seed: None,
            score_limit: None,
            playfield: Playfield::default(),
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), TrainingError> {
        if self.population == 0 {
            return Err(ConfigError::EmptyPopulation.into());
        }
        if self.hidden == 0 {
            return Err(ConfigError::EmptyHiddenLayer.into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRate {
                rate: self.mutation_rate,
            }
            .into());
        }
        match self.score_limit {
            Some(0) => return Err(ConfigError::ZeroScoreLimit.into()),
            Some(limit) if limit > MAX_EXACT_SCORE => {
                return Err(ConfigError::ScoreLimitTooLarge { limit }.into());
            }
            _ => {}
        }
        self.playfield.validate()?;
        Ok(())
    }

    /// Network shape implied by the sensor mode and hidden layer size.
    #[must_use]
    pub fn network_shape(&self) -> NetworkShape {
        NetworkShape::new(self.sensor.inputs(), self.hidden, 1)
    }

    #[must_use]
    pub fn breeding_policy(&self) -> BreedingPolicy {
        BreedingPolicy {
            max_children: self.max_children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.population, 50);
        assert_eq!(config.network_shape(), NetworkShape::new(3, 3, 1));
        assert_eq!(config.breeding_policy().max_children, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_offset_sensor_shape() {
        let config = TrainingConfig {
            sensor: SensorMode::Offset,
            hidden: 5,
            ..TrainingConfig::default()
        };
        assert_eq!(config.network_shape(), NetworkShape::new(2, 5, 1));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let invalid = [
            TrainingConfig {
                population: 0,
                ..TrainingConfig::default()
            },
            TrainingConfig {
                hidden: 0,
                ..TrainingConfig::default()
            },
            TrainingConfig {
                mutation_rate: 1.5,
                ..TrainingConfig::default()
            },
            TrainingConfig {
                mutation_rate: f32::NAN,
                ..TrainingConfig::default()
            },
            TrainingConfig {
                score_limit: Some(0),
                ..TrainingConfig::default()
            },
            TrainingConfig {
                playfield: Playfield {
                    gap_height: 1000.0,
                    ..Playfield::default()
                },
                ..TrainingConfig::default()
            },
        ];
        for config in invalid {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_score_limit_keeps_fitness_exact() {
        let at_cap = TrainingConfig {
            score_limit: Some(MAX_EXACT_SCORE),
            ..TrainingConfig::default()
        };
        assert!(at_cap.validate().is_ok());
        assert_eq!(MAX_EXACT_SCORE, 16_777_216);

        let limit = MAX_EXACT_SCORE + 1;
        let past_cap = TrainingConfig {
            score_limit: Some(limit),
            ..TrainingConfig::default()
        };
        assert!(matches!(
            past_cap.validate(),
            Err(TrainingError::Config(ConfigError::ScoreLimitTooLarge { limit: l })) if l == limit
        ));
    }

    #[test]
    fn test_json_round_trip_with_seed() {
        let json = r#"{
            "sensor": "offset",
            "seed": "000102030405060708090a0b0c0d0e0f",
            "score_limit": 5000,
            "playfield": { "gravity": 0.5 }
        }"#;
        let config: TrainingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.sensor, SensorMode::Offset);
        assert_eq!(config.score_limit, Some(5000));
        assert_eq!(config.playfield.gravity, 0.5);
        assert_eq!(config.playfield.width, 400.0);
        assert_eq!(
            config.seed.unwrap().to_string(),
            "000102030405060708090a0b0c0d0e0f"
        );
    }
}
