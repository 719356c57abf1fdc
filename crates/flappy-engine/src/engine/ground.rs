use crate::{
    Playfield,
    engine::sprite::{Sprite, SpriteKind, Surface},
};

/// Scrolling ground strip, drawn as tiles repeated across the window.
///
/// Purely cosmetic: birds die on the floor line, not on the ground sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    x: f32,
    y: f32,
    tile_width: f32,
    window_width: f32,
    scroll_speed: f32,
}

impl Ground {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(playfield: &Playfield) -> Self {
        Self {
            x: 0.0,
            y: playfield.floor_y(),
            tile_width: playfield.ground_tile_width as f32,
            window_width: playfield.width,
            scroll_speed: playfield.scroll_speed,
        }
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }
}

impl Sprite for Ground {
    fn update(&mut self) {
        self.x -= self.scroll_speed;
        if self.x <= -self.tile_width {
            self.x = 0.0;
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let mut x = self.x;
        while x <= self.window_width {
            surface.draw(SpriteKind::Ground, x, self.y, 0.0);
            x += self.tile_width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingSurface;

    #[test]
    fn test_wraps_after_one_tile() {
        let mut ground = Ground::new(&Playfield::default());
        // 336 / 3 = 112 ticks to scroll a full tile.
        for _ in 0..111 {
            ground.update();
        }
        assert_eq!(ground.x(), -333.0);
        ground.update();
        assert_eq!(ground.x(), 0.0);
    }

    #[test]
    fn test_tiles_cover_window() {
        let mut ground = Ground::new(&Playfield::default());
        ground.update();
        let mut surface = RecordingSurface::default();
        ground.render(&mut surface);
        let xs: Vec<f32> = surface.calls.iter().map(|c| c.1).collect();
        assert_eq!(xs, vec![-3.0, 333.0]);
    }
}
