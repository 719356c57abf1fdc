use flappy_evolution::{Generation, GenerationId};
use flappy_stats::{descriptive::DescriptiveStats, threshold::ThresholdCounts};
use serde::Serialize;

/// Fitness milestones counted in every report.
pub const FITNESS_MILESTONES: [f32; 2] = [1e3, 1e4];

/// Fitness summary of a generation whose life just ended.
///
/// Purely diagnostic: building or logging a report has no effect on training.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub generation: GenerationId,
    pub fitness: DescriptiveStats,
    /// Genomes with fitness above 1000.
    pub above_1e3: usize,
    /// Genomes with fitness above 10000.
    pub above_1e4: usize,
    /// Best world score reached so far in the run.
    pub max_score: u64,
}

impl GenerationReport {
    #[must_use]
    pub fn new(generation: &Generation, max_score: u64) -> Self {
        let fitness = DescriptiveStats::new(generation.fitness_values())
            .expect("generation should never be empty");
        let counts = ThresholdCounts::new(generation.fitness_values(), &FITNESS_MILESTONES);
        Self {
            generation: generation.id(),
            fitness,
            above_1e3: counts.get(FITNESS_MILESTONES[0]).unwrap_or_default(),
            above_1e4: counts.get(FITNESS_MILESTONES[1]).unwrap_or_default(),
            max_score,
        }
    }

    /// Emits the report as a structured `tracing` event.
    pub fn log(&self) {
        tracing::info!(
            generation = %self.generation,
            mean = self.fitness.mean,
            min = self.fitness.min,
            median = self.fitness.median,
            max = self.fitness.max,
            above_1e3 = self.above_1e3,
            above_1e4 = self.above_1e4,
            max_score = self.max_score,
            "generation finished"
        );
    }
}
