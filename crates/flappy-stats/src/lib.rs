//! Summary statistics for per-generation fitness reports.
//!
//! # Modules
//!
//! - [`descriptive`]: Minimum, maximum, mean, median and spread of a dataset
//! - [`threshold`]: How many values exceed fixed milestones
//!
//! # Examples
//!
//! ```
//! use flappy_stats::{descriptive::DescriptiveStats, threshold::ThresholdCounts};
//!
//! let fitness = [12.0, 1500.0, 40.0, 20_000.0];
//! let stats = DescriptiveStats::new(fitness).unwrap();
//! assert_eq!(stats.max, 20_000.0);
//!
//! let counts = ThresholdCounts::new(fitness, &[1e3, 1e4]);
//! assert_eq!(counts.get(1e3), Some(2));
//! assert_eq!(counts.get(1e4), Some(1));
//! ```

pub mod descriptive;
pub mod threshold;
