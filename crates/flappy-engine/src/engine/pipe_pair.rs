use rand::Rng;

use crate::{
    Playfield,
    engine::sprite::{Sprite, SpriteKind, Surface},
};

/// An obstacle: a top and a bottom pipe piece separated by a fixed-height gap.
///
/// The pair scrolls left at the playfield scroll speed and drifts vertically,
/// bouncing between the positions where either piece would become shorter than
/// the minimum pipe height.
#[derive(Debug, Clone, PartialEq)]
pub struct PipePair {
    x: f32,
    gap_bottom: f32,
    v: f32,
    width: f32,
    piece_height: f32,
    gap_height: f32,
    min_pipe_height: f32,
    floor_y: f32,
    scroll_speed: f32,
    max_drift: f32,
}

impl PipePair {
    /// Spawns a pair at `x` with a random gap position and drift speed.
    ///
    /// Draws the gap bottom first, then the drift.
    #[expect(clippy::cast_precision_loss)]
    pub fn spawn<R>(playfield: &Playfield, x: f32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let (lower, upper) = playfield.gap_bottom_range();
        let gap_bottom = rng.random_range(lower..=upper) as f32;
        let drift = rng.random_range(0.0..=playfield.max_pipe_drift);
        Self::fixed(playfield, x, gap_bottom, drift)
    }

    /// Creates a pair with an explicit gap position and drift speed.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fixed(playfield: &Playfield, x: f32, gap_bottom: f32, drift: f32) -> Self {
        Self {
            x,
            gap_bottom,
            v: drift,
            width: playfield.pipe_width as f32,
            piece_height: playfield.pipe_height as f32,
            gap_height: playfield.gap_height,
            min_pipe_height: playfield.min_pipe_height,
            floor_y: playfield.floor_y(),
            scroll_speed: playfield.scroll_speed,
            max_drift: playfield.max_pipe_drift,
        }
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Current vertical drift (positive is downward).
    #[must_use]
    pub fn drift(&self) -> f32 {
        self.v
    }

    /// Y coordinate of the top pipe piece's top edge.
    #[must_use]
    pub fn top_piece_y(&self) -> f32 {
        self.gap_top() - self.piece_height
    }

    /// Y coordinate of the bottom pipe piece's top edge.
    #[must_use]
    pub fn bottom_piece_y(&self) -> f32 {
        self.gap_bottom
    }

    /// Y coordinate of the top piece's bottom edge.
    #[must_use]
    pub fn gap_top(&self) -> f32 {
        self.gap_bottom - self.gap_height
    }

    /// Centre of the gap.
    #[must_use]
    pub fn midpoint(&self) -> (f32, f32) {
        (
            self.x + self.width / 2.0,
            (self.gap_top() + self.gap_bottom) / 2.0,
        )
    }

    /// Drift divided by the maximum drift; 1 when drifting is disabled.
    #[must_use]
    pub fn normalized_drift(&self) -> f32 {
        if self.max_drift > 0.0 {
            self.v / self.max_drift
        } else {
            1.0
        }
    }

    fn drift_vertically(&mut self) {
        let can_move = if self.v > 0.0 {
            self.gap_bottom < self.floor_y - self.min_pipe_height
        } else {
            self.gap_top() > self.min_pipe_height
        };
        if can_move {
            self.gap_bottom += self.v;
        } else {
            self.v = -self.v;
        }
    }
}

impl Sprite for PipePair {
    fn update(&mut self) {
        self.drift_vertically();
        self.x -= self.scroll_speed;
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw(SpriteKind::PipeBottom, self.x, self.bottom_piece_y(), 0.0);
        surface.draw(SpriteKind::PipeTop, self.x, self.top_piece_y(), 0.0);
    }
}
