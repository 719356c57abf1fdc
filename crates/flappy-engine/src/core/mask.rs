/// Pixel-accurate collision mask.
///
/// Each row is stored as a run of `u64` words, bit `x % 64` of word `x / 64`
/// representing the pixel at column `x`. Two masks collide when a set pixel of
/// each lands on the same cell after applying the relative offset.
///
/// # Example
///
/// ```
/// use flappy_engine::Mask;
///
/// let bird = Mask::solid(4, 4);
/// let pipe = Mask::solid(4, 10);
///
/// assert!(bird.overlaps(&pipe, (3, -9)));
/// // Touching edges do not overlap.
/// assert!(!bird.overlaps(&pipe, (4, 0)));
/// assert!(!bird.overlaps(&pipe, (0, -10)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// Creates a mask with every pixel unset.
    #[must_use]
    pub fn empty(width: u32, height: u32) -> Self {
        let words_per_row = (width as usize).div_ceil(64);
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height as usize],
        }
    }

    /// Creates a mask with every pixel set (a bounding box).
    #[must_use]
    pub fn solid(width: u32, height: u32) -> Self {
        let mut mask = Self::empty(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.set(x, y, true);
            }
        }
        mask
    }

    /// Builds a mask from text rows, `#` marking a set pixel.
    ///
    /// Rows shorter than the longest row are padded with unset pixels.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn from_rows<S>(rows: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        let width = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut mask = Self::empty(width as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.as_ref().chars().enumerate() {
                mask.set(x as u32, y as u32, ch == '#');
            }
        }
        mask
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns whether the pixel at `(x, y)` is set.
    ///
    /// Pixels outside the mask are unset.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (word, bit) = self.locate(x, y);
        self.bits[word] & (1 << bit) != 0
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let (word, bit) = self.locate(x, y);
        if value {
            self.bits[word] |= 1 << bit;
        } else {
            self.bits[word] &= !(1 << bit);
        }
    }

    /// Returns a copy mirrored top to bottom.
    #[must_use]
    pub fn flipped_vertical(&self) -> Self {
        let mut flipped = Self::empty(self.width, self.height);
        for y in 0..self.height {
            let src = y as usize * self.words_per_row;
            let dst = (self.height - 1 - y) as usize * self.words_per_row;
            flipped.bits[dst..dst + self.words_per_row]
                .copy_from_slice(&self.bits[src..src + self.words_per_row]);
        }
        flipped
    }

    /// Number of set pixels.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// Tests whether `other`, placed at `offset` relative to `self`, shares a set pixel.
    #[must_use]
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (dx, dy) = (i64::from(offset.0), i64::from(offset.1));
        let x0 = dx.max(0);
        let x1 = (dx + i64::from(other.width)).min(i64::from(self.width));
        let y0 = dy.max(0);
        let y1 = (dy + i64::from(other.height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        // Coordinates below are within both masks, so the casts cannot wrap.
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let hit = (y0..y1).any(|y| {
            (x0..x1).any(|x| {
                self.get(x as u32, y as u32) && other.get((x - dx) as u32, (y - dy) as u32)
            })
        });
        hit
    }

    fn locate(&self, x: u32, y: u32) -> (usize, u32) {
        let word = y as usize * self.words_per_row + x as usize / 64;
        (word, x % 64)
    }
}

/// Collision masks for the sprites that take part in collision tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteMasks {
    pub bird: Mask,
    pub pipe_top: Mask,
    pub pipe_bottom: Mask,
}

impl SpriteMasks {
    /// Bounding-box masks matching the sprite sizes of a playfield.
    #[must_use]
    pub fn solid(playfield: &crate::Playfield) -> Self {
        let pipe = Mask::solid(playfield.pipe_width, playfield.pipe_height);
        Self {
            bird: Mask::solid(playfield.bird_width, playfield.bird_height),
            pipe_top: pipe.flipped_vertical(),
            pipe_bottom: pipe,
        }
    }

    /// Masks built from a bird image mask and a bottom pipe image mask.
    ///
    /// The top pipe is the bottom pipe mirrored vertically.
    #[must_use]
    pub fn from_images(bird: Mask, pipe: Mask) -> Self {
        Self {
            bird,
            pipe_top: pipe.flipped_vertical(),
            pipe_bottom: pipe,
        }
    }
}

/// Converts a sprite position to the pixel it is drawn at.
#[expect(clippy::cast_possible_truncation)]
#[must_use]
pub fn pixel(position: (f32, f32)) -> (i32, i32) {
    (position.0.floor() as i32, position.1.floor() as i32)
}

/// Tests whether two sprites at the given positions overlap pixel-wise.
#[must_use]
pub fn collide(a: &Mask, a_pos: (f32, f32), b: &Mask, b_pos: (f32, f32)) -> bool {
    let (ax, ay) = pixel(a_pos);
    let (bx, by) = pixel(b_pos);
    a.overlaps(b, (bx - ax, by - ay))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let mask = Mask::from_rows(&[".#.", "###", "#"]);
        assert_eq!(mask.width(), 3);
        assert_eq!(mask.height(), 3);
        assert_eq!(mask.count(), 5);
        assert!(mask.get(1, 0));
        assert!(!mask.get(2, 2));
    }

    #[test]
    fn test_wide_mask_spans_words() {
        let mut mask = Mask::empty(130, 2);
        mask.set(129, 1, true);
        mask.set(64, 0, true);
        assert!(mask.get(129, 1));
        assert!(mask.get(64, 0));
        assert!(!mask.get(63, 0));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_flipped_vertical() {
        let mask = Mask::from_rows(&["#..", "...", "..#"]).flipped_vertical();
        assert!(mask.get(2, 0));
        assert!(mask.get(0, 2));
        assert!(!mask.get(0, 0));
    }

    #[test]
    fn test_transparent_pixels_do_not_collide() {
        // A diamond-ish bird whose corners are transparent.
        let bird = Mask::from_rows(&[".##.", "####", "####", ".##."]);
        let corner = Mask::solid(1, 1);
        assert!(!bird.overlaps(&corner, (0, 0)));
        assert!(!bird.overlaps(&corner, (3, 3)));
        assert!(bird.overlaps(&corner, (1, 0)));
    }

    #[test]
    fn test_collide_floors_positions() {
        let a = Mask::solid(10, 10);
        let b = Mask::solid(10, 10);
        assert!(!collide(&a, (0.0, 0.0), &b, (10.0, 0.0)));
        assert!(collide(&a, (0.0, 0.0), &b, (9.9, 0.0)));
        assert!(collide(&a, (0.5, 0.0), &b, (-9.0, 0.0)));
        assert!(!collide(&a, (0.5, 0.0), &b, (-9.5, 0.0)));
    }
}
