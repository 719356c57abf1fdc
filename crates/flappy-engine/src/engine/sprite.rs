/// Image a sprite asks the surface to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SpriteKind {
    Bird,
    /// Upper pipe piece, drawn mirrored vertically.
    PipeTop,
    PipeBottom,
    Ground,
}

/// Drawing target supplied by a front end.
///
/// The engine never rasterizes anything itself; it only reports which image
/// goes where. Front ends map [`SpriteKind`]s to their own assets.
pub trait Surface {
    /// Draws `kind` with its top-left corner at `(x, y)`, rotated by `angle`
    /// degrees counter-clockwise around its centre.
    fn draw(&mut self, kind: SpriteKind, x: f32, y: f32, angle: f32);
}

/// Anything in the playfield that advances once per tick and can be drawn.
pub trait Sprite {
    fn update(&mut self);
    fn render(&self, surface: &mut dyn Surface);
}

/// Surface that records draw calls, used by tests and headless front ends.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingSurface {
    pub calls: Vec<(SpriteKind, f32, f32, f32)>,
}

impl Surface for RecordingSurface {
    fn draw(&mut self, kind: SpriteKind, x: f32, y: f32, angle: f32) {
        self.calls.push((kind, x, y, angle));
    }
}
