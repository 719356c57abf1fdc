use serde::{Deserialize, Serialize};

use crate::PlayfieldError;

/// Geometry and physics constants of the playfield.
///
/// All lengths are in pixels and all velocities in pixels per tick. The
/// defaults describe a 400×500 window with a 60 pixel ground strip, which is
/// the reference configuration the trainer is tuned for.
///
/// # Example
///
/// ```
/// use flappy_engine::Playfield;
///
/// let playfield = Playfield::default();
/// assert_eq!(playfield.floor_y(), 440.0);
/// assert!(playfield.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    /// Window width.
    pub width: f32,
    /// Window height, including the ground strip.
    pub height: f32,
    /// Height of the ground strip at the bottom of the window.
    pub ground_height: f32,
    /// Vertical size of the gap between the two pieces of a pipe pair.
    pub gap_height: f32,
    /// Minimum visible length of either pipe piece.
    pub min_pipe_height: f32,
    /// Horizontal scroll speed of pipes and ground.
    pub scroll_speed: f32,
    /// Upper bound of the vertical drift speed of a pipe pair.
    pub max_pipe_drift: f32,
    /// Vertical velocity assigned by a flap (negative is upward).
    pub flap_velocity: f32,
    /// Velocity added to a bird every tick.
    pub gravity: f32,
    /// Bird sprite size.
    pub bird_width: u32,
    pub bird_height: u32,
    /// Pipe sprite size (one piece).
    pub pipe_width: u32,
    pub pipe_height: u32,
    /// Width of one ground tile.
    pub ground_tile_width: u32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 500.0,
            ground_height: 60.0,
            gap_height: 125.0,
            min_pipe_height: 30.0,
            scroll_speed: 3.0,
            max_pipe_drift: 2.0,
            flap_velocity: -8.0,
            gravity: 0.6,
            bird_width: 34,
            bird_height: 24,
            pipe_width: 52,
            pipe_height: 320,
            ground_tile_width: 336,
        }
    }
}

impl Playfield {
    /// Y coordinate of the ground surface.
    #[must_use]
    pub fn floor_y(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Inclusive range of possible y coordinates for the top edge of a bottom pipe.
    ///
    /// The range is empty (`lower > upper`) for invalid configurations.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn gap_bottom_range(&self) -> (i32, i32) {
        let lower = (self.gap_height + self.min_pipe_height).ceil() as i32;
        let upper = (self.floor_y() - self.min_pipe_height).floor() as i32;
        (lower, upper)
    }

    /// Checks that a pipe pair can be placed and every sprite has a size.
    pub fn validate(&self) -> Result<(), PlayfieldError> {
        let sizes = [
            self.bird_width,
            self.bird_height,
            self.pipe_width,
            self.pipe_height,
            self.ground_tile_width,
        ];
        if sizes.contains(&0) {
            return Err(PlayfieldError::EmptySprite);
        }
        if !(self.width > 0.0 && self.floor_y() > 0.0) {
            return Err(PlayfieldError::EmptyWindow);
        }
        if self.max_pipe_drift < 0.0 {
            return Err(PlayfieldError::NegativeDrift);
        }
        let (lower, upper) = self.gap_bottom_range();
        if lower > upper {
            return Err(PlayfieldError::NoRoomForGap { lower, upper });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gap_range() {
        assert_eq!(Playfield::default().gap_bottom_range(), (155, 410));
    }

    #[test]
    fn test_gap_too_tall_is_rejected() {
        let playfield = Playfield {
            gap_height: 400.0,
            ..Playfield::default()
        };
        assert!(matches!(
            playfield.validate(),
            Err(PlayfieldError::NoRoomForGap { .. })
        ));
    }

    #[test]
    fn test_zero_sized_sprite_is_rejected() {
        let playfield = Playfield {
            bird_width: 0,
            ..Playfield::default()
        };
        assert!(matches!(
            playfield.validate(),
            Err(PlayfieldError::EmptySprite)
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let playfield: Playfield = serde_json::from_str(r#"{"gap_height": 150.0}"#).unwrap();
        assert_eq!(playfield.gap_height, 150.0);
        assert_eq!(playfield.width, 400.0);
    }
}
