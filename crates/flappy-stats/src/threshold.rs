use serde::{Deserialize, Serialize};

/// Number of values strictly above each of a set of thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdCounts {
    counts: Vec<(f32, usize)>,
}

impl ThresholdCounts {
    /// Counts, for every threshold, the values strictly greater than it.
    ///
    /// ```
    /// # use flappy_stats::threshold::ThresholdCounts;
    /// let counts = ThresholdCounts::new([999.0, 1000.0, 1001.0], &[1000.0]);
    /// assert_eq!(counts.get(1000.0), Some(1));
    /// assert_eq!(counts.get(5.0), None);
    /// ```
    #[must_use]
    pub fn new<I>(values: I, thresholds: &[f32]) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        let mut counts: Vec<(f32, usize)> = thresholds.iter().map(|&t| (t, 0)).collect();
        for value in values {
            for (threshold, count) in &mut counts {
                if value > *threshold {
                    *count += 1;
                }
            }
        }
        Self { counts }
    }

    /// The count for `threshold`, if it was one of the requested thresholds.
    #[must_use]
    #[expect(clippy::float_cmp)]
    pub fn get(&self, threshold: f32) -> Option<usize> {
        self.counts
            .iter()
            .find(|(t, _)| *t == threshold)
            .map(|&(_, count)| count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f32, usize)> + '_ {
        self.counts.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_each_threshold() {
        let counts = ThresholdCounts::new([0.0, 1e3, 2e3, 1e4, 3e4], &[1e3, 1e4]);
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![(1e3, 3), (1e4, 1)]);
    }

    #[test]
    fn test_empty_values() {
        let counts = ThresholdCounts::new([], &[1e3]);
        assert_eq!(counts.get(1e3), Some(0));
    }
}
