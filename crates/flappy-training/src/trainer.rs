use flappy_engine::{Playfield, Seed, Surface, World};
use flappy_evolution::{Generation, GenerationCounter, GenerationId, Genome};
use rand::Rng as _;
use rand_pcg::Pcg32;

use crate::{FastForward, GenerationReport, TrainingConfig, TrainingError};

/// The fittest genome seen so far in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Champion {
    pub generation: GenerationId,
    pub genome: Genome,
}

/// Runs the simulation and the evolution in lock step.
///
/// One [`Trainer::tick`] advances the world by one tick. While birds are alive
/// every living bird is steered by its genome. When the last bird dies the
/// generation is scored, reported and replaced, and the world starts a new
/// life with the next generation.
///
/// Randomness comes from one seed: a master `Pcg32` seeded from it first draws
/// the seed of the world's pipe stream and then drives network initialization
/// and breeding. Runs with the same configuration and seed are identical.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainingConfig,
    seed: Seed,
    rng: Pcg32,
    world: World,
    generation: Generation,
    counter: GenerationCounter,
    captured: Vec<f32>,
    champion: Option<Champion>,
    fast_forward: FastForward,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Result<Self, TrainingError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(Seed::random);
        let mut rng = seed.rng();
        let world_seed: Seed = rng.random();
        let world = World::new(config.playfield.clone(), config.population, world_seed)?;

        let mut counter = GenerationCounter::new();
        let generation = Generation::random(
            config.population,
            config.network_shape(),
            &mut rng,
            &mut counter,
        )?;

        tracing::info!(
            %seed,
            population = config.population,
            hidden = config.hidden,
            sensor = ?config.sensor,
            mutation_rate = config.mutation_rate,
            "training started"
        );

        Ok(Self {
            captured: vec![0.0; config.population],
            config,
            seed,
            rng,
            world,
            generation,
            counter,
            champion: None,
            fast_forward: FastForward::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// The seed actually used, including one chosen at random.
    #[must_use]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    #[must_use]
    pub fn playfield(&self) -> &Playfield {
        self.world.playfield()
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The generation currently playing.
    #[must_use]
    pub fn generation(&self) -> &Generation {
        &self.generation
    }

    #[must_use]
    pub fn champion(&self) -> Option<&Champion> {
        self.champion.as_ref()
    }

    #[must_use]
    pub fn fast_forward(&self) -> FastForward {
        self.fast_forward
    }

    pub fn fast_forward_mut(&mut self) -> &mut FastForward {
        &mut self.fast_forward
    }

    /// Advances one tick. Returns a report when this tick ended a life.
    pub fn tick(&mut self) -> Result<Option<GenerationReport>, TrainingError> {
        self.world.update();

        if !self.world.is_extinct()
            && self
                .config
                .score_limit
                .is_some_and(|limit| self.world.score() >= limit)
        {
            for (i, bird) in self.world.birds().iter().enumerate() {
                if bird.is_alive() {
                    self.captured[i] = score_to_fitness(bird.score());
                }
            }
            self.world.end_life();
        }

        if self.world.is_extinct() {
            return self.turnover().map(Some);
        }

        for (i, genome) in self.generation.genomes().iter().enumerate() {
            let Some(observation) = self.world.observe(i) else {
                continue;
            };
            self.captured[i] = score_to_fitness(observation.score);
            let action = genome.decide(&observation.input(self.config.sensor))?;
            self.world.apply(i, action);
        }
        Ok(None)
    }

    /// Runs as many ticks as the fast-forward speed, back to back.
    ///
    /// The result is the same as calling [`Trainer::tick`] that many times.
    pub fn frame(&mut self) -> Result<Vec<GenerationReport>, TrainingError> {
        let mut reports = Vec::new();
        for _ in 0..self.fast_forward.get() {
            if let Some(report) = self.tick()? {
                reports.push(report);
            }
        }
        Ok(reports)
    }

    /// Draws the current world.
    pub fn render(&self, surface: &mut dyn Surface) {
        self.world.render(surface);
    }

    fn turnover(&mut self) -> Result<GenerationReport, TrainingError> {
        self.generation.assign_fitness(&self.captured)?;

        let report = GenerationReport::new(&self.generation, self.world.max_score());
        report.log();
        self.update_champion();

        self.generation = self.generation.next(
            self.config.breeding_policy(),
            self.config.mutation_rate,
            &mut self.rng,
            &mut self.counter,
        );
        self.captured.fill(0.0);
        self.world.reset();
        Ok(report)
    }

    fn update_champion(&mut self) {
        let best = self.generation.best();
        let improved = self
            .champion
            .as_ref()
            .is_none_or(|champion| best.fitness() > champion.genome.fitness());
        if improved {
            tracing::debug!(
                generation = %self.generation.id(),
                fitness = best.fitness(),
                "new champion"
            );
            self.champion = Some(Champion {
                generation: self.generation.id(),
                genome: best.clone(),
            });
        }
    }
}

/// Exact up to [`MAX_EXACT_SCORE`](crate::config::MAX_EXACT_SCORE).
#[expect(clippy::cast_precision_loss)]
fn score_to_fitness(score: u64) -> f32 {
    score as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> TrainingConfig {
        TrainingConfig {
            population: 8,
            seed: Some(Seed::from_u64(seed)),
            score_limit: Some(500),
            ..TrainingConfig::default()
        }
    }

    fn run_until_report(trainer: &mut Trainer) -> GenerationReport {
        loop {
            if let Some(report) = trainer.tick().unwrap() {
                return report;
            }
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = TrainingConfig {
            population: 0,
            ..TrainingConfig::default()
        };
        assert!(matches!(
            Trainer::new(config),
            Err(TrainingError::Config(_))
        ));
    }

    #[test]
    fn test_turnover_resets_world_and_advances_generation() {
        let mut trainer = Trainer::new(config(1)).unwrap();
        assert_eq!(trainer.generation().id().get(), 1);

        let report = run_until_report(&mut trainer);
        assert_eq!(report.generation.get(), 1);
        assert_eq!(trainer.generation().id().get(), 2);
        assert_eq!(trainer.generation().population_size(), 8);
        assert_eq!(trainer.world().score(), 0);
        assert_eq!(trainer.world().remaining(), 8);
        assert!(trainer.generation().fitness_values().all(|f| f == 0.0));
    }

    #[test]
    fn test_fitness_is_last_living_score() {
        let mut trainer = Trainer::new(config(2)).unwrap();
        let report = run_until_report(&mut trainer);
        let max_score = trainer.world().max_score();
        // The tick that detects the last death is not survived by anyone.
        assert!(report.fitness.max < score_to_fitness(max_score) || max_score == 500);
        assert!(report.fitness.min >= 0.0);
    }

    #[test]
    fn test_score_limit_ends_life() {
        let config = TrainingConfig {
            score_limit: Some(1),
            ..config(3)
        };
        let mut trainer = Trainer::new(config).unwrap();
        let report = trainer.tick().unwrap().expect("limit reached on first tick");
        assert_eq!(report.fitness.min, 1.0);
        assert_eq!(report.fitness.max, 1.0);
        assert_eq!(report.max_score, 1);
    }

    #[test]
    fn test_champion_tracks_best_fitness() {
        let mut trainer = Trainer::new(config(4)).unwrap();
        assert!(trainer.champion().is_none());
        let mut best = f32::MIN;
        for _ in 0..3 {
            let report = run_until_report(&mut trainer);
            best = best.max(report.fitness.max);
            let champion = trainer.champion().unwrap();
            assert_eq!(champion.genome.fitness(), best);
            assert!(champion.generation <= report.generation);
        }
    }
}
