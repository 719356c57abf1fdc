use std::path::PathBuf;

use chrono::Utc;
use flappy_engine::{Seed, SensorMode};
use flappy_training::{Trainer, TrainingConfig};

use crate::{model::champion::ChampionModel, util};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum SensorArg {
    /// Offset to the gap midpoint
    Offset,
    /// Offset plus the drift of the pipe pair
    OffsetAndDrift,
}

impl From<SensorArg> for SensorMode {
    fn from(arg: SensorArg) -> Self {
        match arg {
            SensorArg::Offset => SensorMode::Offset,
            SensorArg::OffsetAndDrift => SensorMode::OffsetAndDrift,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Training configuration file (JSON); flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of generations to run
    #[arg(long, default_value_t = 100)]
    generations: u64,
    /// Birds per generation
    #[arg(long)]
    population: Option<usize>,
    /// Hidden layer size
    #[arg(long)]
    hidden: Option<usize>,
    #[arg(long, value_enum)]
    sensor: Option<SensorArg>,
    /// Per-parameter mutation probability
    #[arg(long)]
    mutation_rate: Option<f32>,
    /// Children allowed to the fittest genome
    #[arg(long)]
    max_children: Option<usize>,
    /// Run seed as 32 hexadecimal characters
    #[arg(long)]
    seed: Option<Seed>,
    /// End every life at this score. Without a limit a perfect flock never dies
    #[arg(long)]
    score_limit: Option<u64>,
    /// Name stored in the champion file
    #[arg(long, default_value = "champion")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TrainArg {
    fn load_config(&self) -> anyhow::Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("training config", path)?,
            None => TrainingConfig::default(),
        };
        if let Some(population) = self.population {
            config.population = population;
        }
        if let Some(hidden) = self.hidden {
            config.hidden = hidden;
        }
        if let Some(sensor) = self.sensor {
            config.sensor = sensor.into();
        }
        if let Some(mutation_rate) = self.mutation_rate {
            config.mutation_rate = mutation_rate;
        }
        if let Some(max_children) = self.max_children {
            config.max_children = max_children;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(score_limit) = self.score_limit {
            config.score_limit = Some(score_limit);
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = arg.load_config()?;
    let mut trainer = Trainer::new(config)?;
    tracing::info!(
        seed = %trainer.seed(),
        population = trainer.config().population,
        "training started"
    );

    let mut finished = 0;
    while finished < arg.generations {
        let Some(report) = trainer.tick()? else {
            continue;
        };
        finished += 1;
        eprintln!("Generation #{}:", report.generation);
        eprintln!("  Fitness Stats:");
        eprintln!("    Min:    {:.1}", report.fitness.min);
        eprintln!("    Median: {:.1}", report.fitness.median);
        eprintln!("    Max:    {:.1}", report.fitness.max);
        eprintln!("    Mean:   {:.3}", report.fitness.mean);
        eprintln!("    >1e3:   {}", report.above_1e3);
        eprintln!("    >1e4:   {}", report.above_1e4);
        eprintln!("  High score: {}", report.max_score);
    }

    let champion = trainer
        .champion()
        .ok_or_else(|| anyhow::anyhow!("no generation finished"))?;
    eprintln!("Training completed.");

    let model = ChampionModel {
        name: arg.name.clone(),
        trained_at: Utc::now(),
        generation: champion.generation,
        fitness: champion.genome.fitness(),
        seed: trainer.seed(),
        sensor: trainer.config().sensor,
        playfield: trainer.playfield().clone(),
        network: champion.genome.network().clone(),
    };
    util::write_json_file("champion", &model, arg.output.as_deref())?;
    tracing::info!(
        path = ?arg.output,
        name = %model.name,
        generation = %model.generation,
        fitness = model.fitness,
        "champion saved"
    );

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Generation: {}", model.generation);
    eprintln!("  Fitness: {:.1}", model.fitness);

    Ok(())
}
