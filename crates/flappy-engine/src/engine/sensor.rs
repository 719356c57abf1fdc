use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Largest number of network inputs any [`SensorMode`] produces.
pub const MAX_INPUTS: usize = 3;

/// Which normalized quantities are fed to a bird's network.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum SensorMode {
    /// Offset to the gap midpoint only (2 inputs).
    Offset,
    /// Offset plus the vertical drift of the pipe pair (3 inputs).
    #[default]
    OffsetAndDrift,
}

impl SensorMode {
    /// Number of network inputs this mode produces.
    #[must_use]
    pub const fn inputs(self) -> usize {
        match self {
            Self::Offset => 2,
            Self::OffsetAndDrift => 3,
        }
    }
}

/// What one living bird perceives at the start of a decision.
///
/// Offsets point from the bird's top-left corner to the midpoint of the gap
/// in the frontier pipe pair, scaled by the window width and height. They are
/// roughly in `[-1, 1]` but not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Ticks survived so far.
    pub score: u64,
    pub offset_x: f32,
    pub offset_y: f32,
    /// Vertical drift of the pipe pair divided by the maximum drift.
    pub drift: f32,
}

impl Observation {
    /// Assembles the network input vector for `mode`.
    ///
    /// ```
    /// use flappy_engine::{Observation, SensorMode};
    ///
    /// let obs = Observation { score: 7, offset_x: 0.25, offset_y: -0.5, drift: 1.0 };
    /// assert_eq!(obs.input(SensorMode::Offset).as_slice(), &[0.25, -0.5]);
    /// assert_eq!(obs.input(SensorMode::OffsetAndDrift).as_slice(), &[0.25, -0.5, 1.0]);
    /// ```
    #[must_use]
    pub fn input(&self, mode: SensorMode) -> ArrayVec<f32, MAX_INPUTS> {
        let mut input = ArrayVec::new();
        input.push(self.offset_x);
        input.push(self.offset_y);
        if mode.is_offset_and_drift() {
            input.push(self.drift);
        }
        input
    }
}

/// Decision written back to the simulation for one bird and one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Action {
    /// Whether the bird flaps this tick.
    pub trigger: bool,
}

impl Action {
    /// Interprets the first network output: non-negative means flap.
    ///
    /// ```
    /// use flappy_engine::Action;
    ///
    /// assert!(Action::from_output(0.0).trigger);
    /// assert!(Action::from_output(0.3).trigger);
    /// assert!(!Action::from_output(-0.01).trigger);
    /// ```
    #[must_use]
    pub fn from_output(value: f32) -> Self {
        Self {
            trigger: value >= 0.0,
        }
    }
}
