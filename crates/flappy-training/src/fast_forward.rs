/// Number of simulation ticks run per displayed frame.
///
/// Never drops below 1.
///
/// ```
/// use flappy_training::FastForward;
///
/// let mut speed = FastForward::default();
/// speed.change(10);
/// assert_eq!(speed.get(), 11);
/// speed.change(-100);
/// assert_eq!(speed.get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastForward(usize);

impl Default for FastForward {
    fn default() -> Self {
        Self(1)
    }
}

impl FastForward {
    #[must_use]
    pub fn new(speed: usize) -> Self {
        Self(speed.max(1))
    }

    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }

    pub fn change(&mut self, delta: isize) {
        self.0 = self.0.saturating_add_signed(delta).max(1);
    }

    /// Back to real time.
    pub fn reset(&mut self) {
        self.0 = 1;
    }
}
