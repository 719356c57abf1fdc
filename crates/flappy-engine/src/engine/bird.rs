use crate::{
    PipePair, Playfield, SpriteMasks,
    core::collide,
    engine::sprite::{Sprite, SpriteKind, Surface},
};

/// Maximum nose-down tilt, in degrees.
const MAX_TILT: f32 = 90.0;
/// Tilt reached when moving at exactly the flap velocity.
const FLAP_TILT: f32 = 45.0;

/// One agent: a bird falling under gravity that can flap upward.
///
/// A bird starts centred in the window at rest. Once it hits a pipe, the
/// ground or leaves the top of the window it is dead for the rest of the life.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    x: f32,
    y: f32,
    v: f32,
    alive: bool,
    score: u64,
    width: f32,
    height: f32,
    flap_velocity: f32,
    gravity: f32,
    window: (f32, f32),
    floor_y: f32,
}

impl Bird {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(playfield: &Playfield) -> Self {
        let width = playfield.bird_width as f32;
        let height = playfield.bird_height as f32;
        Self {
            x: (playfield.width - width) / 2.0,
            y: (playfield.height - height) / 2.0,
            v: 0.0,
            alive: true,
            score: 0,
            width,
            height,
            flap_velocity: playfield.flap_velocity,
            gravity: playfield.gravity,
            window: (playfield.width, playfield.height),
            floor_y: playfield.floor_y(),
        }
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Current vertical velocity (positive is downward).
    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.v
    }

    #[must_use]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Tick count at the last tick this bird was still alive.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    pub(crate) fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    /// Moves the bird to an explicit position, keeping its velocity.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn flap(&mut self) {
        self.v = self.flap_velocity;
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Re-evaluates whether the bird survives against the frontier pipe pair.
    ///
    /// Death is permanent: a dead bird stays dead.
    pub fn check_alive(&mut self, frontier: &PipePair, masks: &SpriteMasks) -> bool {
        if !self.alive {
            return false;
        }
        self.alive =
            self.y > -self.height && self.bottom() < self.floor_y && !self.collide(frontier, masks);
        self.alive
    }

    /// Pixel-accurate collision test against both pieces of a pipe pair.
    ///
    /// Horizontal extents come from the masks, which may differ in size from
    /// the playfield sprites.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn collide(&self, pipe: &PipePair, masks: &SpriteMasks) -> bool {
        let bird_right = self.x + masks.bird.width() as f32;
        let pipe_width = masks.pipe_top.width().max(masks.pipe_bottom.width());
        let pipe_right = pipe.left() + pipe_width as f32;
        if bird_right < pipe.left() || self.left() > pipe_right {
            return false;
        }
        let pos = (self.x, self.y);
        collide(&masks.bird, pos, &masks.pipe_top, (pipe.x(), pipe.top_piece_y()))
            || collide(
                &masks.bird,
                pos,
                &masks.pipe_bottom,
                (pipe.x(), pipe.bottom_piece_y()),
            )
    }

    /// Offset to the gap midpoint of `pipe`, normalized by the window size.
    #[must_use]
    pub fn offset_to(&self, pipe: &PipePair) -> (f32, f32) {
        let (mid_x, mid_y) = pipe.midpoint();
        (
            (mid_x - self.x) / self.window.0,
            (mid_y - self.y) / self.window.1,
        )
    }

    /// Rotation used when drawing, tilting with the vertical velocity.
    #[must_use]
    pub fn tilt(&self) -> f32 {
        f32::min(self.v / self.flap_velocity * FLAP_TILT, MAX_TILT)
    }
}

impl Sprite for Bird {
    fn update(&mut self) {
        self.y += self.v;
        self.v += self.gravity;
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw(SpriteKind::Bird, self.x, self.y, self.tilt());
    }
}
