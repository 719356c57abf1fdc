use std::collections::VecDeque;

use rand_pcg::Pcg32;

use crate::{
    Action, Bird, Ground, Observation, PipePair, Playfield, PlayfieldError, Seed, SpriteMasks,
    engine::sprite::{Sprite, Surface},
};

/// The whole simulation: a flock of birds, the pipe stream and the ground.
///
/// Every call to [`World::update`] advances one tick. The score is the number
/// of ticks since the last reset and is copied into every bird that is still
/// alive, so a dead bird keeps the score of its last living tick.
///
/// # Example
///
/// ```
/// use flappy_engine::{Playfield, Seed, World};
///
/// let mut world = World::new(Playfield::default(), 3, Seed::from_u64(1)).unwrap();
/// while !world.is_extinct() {
///     world.update();
/// }
/// // Without flapping every bird falls to the ground at the same tick.
/// assert!(world.birds().iter().all(|b| b.score() == world.birds()[0].score()));
/// ```
#[derive(Debug, Clone)]
pub struct World {
    playfield: Playfield,
    masks: SpriteMasks,
    rng: Pcg32,
    bird_count: usize,
    birds: Vec<Bird>,
    pipes: VecDeque<PipePair>,
    ground: Ground,
    score: u64,
    max_score: u64,
    remaining: usize,
}

impl World {
    /// Creates a world with bounding-box collision masks.
    pub fn new(
        playfield: Playfield,
        bird_count: usize,
        seed: Seed,
    ) -> Result<Self, PlayfieldError> {
        let masks = SpriteMasks::solid(&playfield);
        Self::with_masks(playfield, masks, bird_count, seed)
    }

    /// Creates a world using caller-supplied pixel masks.
    pub fn with_masks(
        playfield: Playfield,
        masks: SpriteMasks,
        bird_count: usize,
        seed: Seed,
    ) -> Result<Self, PlayfieldError> {
        playfield.validate()?;
        if bird_count == 0 {
            return Err(PlayfieldError::NoBirds);
        }
        let ground = Ground::new(&playfield);
        let mut world = Self {
            masks,
            rng: seed.rng(),
            bird_count,
            birds: Vec::with_capacity(bird_count),
            pipes: VecDeque::new(),
            ground,
            score: 0,
            max_score: 0,
            remaining: bird_count,
            playfield,
        };
        world.reset();
        Ok(world)
    }

    /// Starts a new life: fresh birds, one pipe pair at the right edge, score 0.
    ///
    /// The maximum score and the random stream carry over.
    pub fn reset(&mut self) {
        self.score = 0;
        self.pipes.clear();
        self.pipes
            .push_back(PipePair::spawn(&self.playfield, self.playfield.width, &mut self.rng));
        self.birds = (0..self.bird_count)
            .map(|_| Bird::new(&self.playfield))
            .collect();
        self.ground = Ground::new(&self.playfield);
        self.remaining = self.bird_count;
    }

    /// Advances the simulation by one tick.
    pub fn update(&mut self) {
        self.score += 1;
        self.max_score = self.max_score.max(self.score);
        for pipe in &mut self.pipes {
            pipe.update();
        }
        self.flush_pipes();

        let frontier = self
            .pipes
            .back()
            .expect("pipe stream should never be empty");
        let score = self.score;
        for bird in &mut self.birds {
            if bird.check_alive(frontier, &self.masks) {
                bird.set_score(score);
                bird.update();
            }
        }
        self.remaining = self.birds.iter().filter(|b| b.is_alive()).count();
        self.ground.update();
    }

    fn flush_pipes(&mut self) {
        let bird_left = self.birds[0].left();
        if self.frontier().right() <= bird_left {
            let pipe = PipePair::spawn(&self.playfield, self.playfield.width, &mut self.rng);
            self.pipes.push_back(pipe);
        }
        if self.pipes.len() > 1 && self.pipes[0].right() <= 0.0 {
            self.pipes.pop_front();
        }
    }

    #[must_use]
    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    #[must_use]
    pub fn birds(&self) -> &[Bird] {
        &self.birds
    }

    pub fn pipes(&self) -> impl Iterator<Item = &PipePair> + '_ {
        self.pipes.iter()
    }

    /// The nearest pipe pair the birds have not yet passed.
    #[must_use]
    pub fn frontier(&self) -> &PipePair {
        self.pipes.back().expect("pipe stream should never be empty")
    }

    #[must_use]
    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    /// Ticks since the last reset.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Highest score reached since the world was created.
    #[must_use]
    pub fn max_score(&self) -> u64 {
        self.max_score
    }

    /// Number of birds alive after the last tick.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    #[must_use]
    pub fn is_extinct(&self) -> bool {
        self.remaining == 0
    }

    /// What bird `index` perceives, or `None` if it is dead.
    #[must_use]
    pub fn observe(&self, index: usize) -> Option<Observation> {
        let bird = self.birds.get(index).filter(|b| b.is_alive())?;
        let frontier = self.frontier();
        let (offset_x, offset_y) = bird.offset_to(frontier);
        Some(Observation {
            score: bird.score(),
            offset_x,
            offset_y,
            drift: frontier.normalized_drift(),
        })
    }

    /// Applies a decision to bird `index`. Dead birds ignore it.
    pub fn apply(&mut self, index: usize, action: Action) {
        if action.trigger {
            self.flap(index);
        }
    }

    pub fn flap(&mut self, index: usize) {
        if let Some(bird) = self.birds.get_mut(index).filter(|b| b.is_alive()) {
            bird.flap();
        }
    }

    /// Kills every surviving bird, ending the current life.
    pub fn end_life(&mut self) {
        for bird in &mut self.birds {
            bird.kill();
        }
        self.remaining = 0;
    }

    /// Draws pipes, living birds and the ground, back to front.
    pub fn render(&self, surface: &mut dyn Surface) {
        for pipe in &self.pipes {
            pipe.render(surface);
        }
        for bird in self.birds.iter().filter(|b| b.is_alive()) {
            bird.render(surface);
        }
        self.ground.render(surface);
    }
}
