use std::path::PathBuf;

use flappy_engine::Seed;
use flappy_evolution::Genome;
use flappy_training::Replay;

use crate::model::champion::ChampionModel;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Path to the champion file (JSON format)
    model_file: PathBuf,
    /// Seed of the pipe stream; the training seed when omitted
    #[arg(long)]
    seed: Option<Seed>,
    /// Stop once the bird reaches this score
    #[arg(long, default_value_t = 100_000)]
    score_limit: u64,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg {
        model_file,
        seed,
        score_limit,
    } = arg;

    eprintln!("Loading champion from {}", model_file.display());
    let model = ChampionModel::open(model_file)?;
    tracing::info!(
        name = %model.name,
        generation = %model.generation,
        seed = %model.seed,
        "champion loaded"
    );
    eprintln!(
        "Loaded {:?} from generation #{} (fitness {:.1})",
        model.name, model.generation, model.fitness
    );

    let replay = Replay::new(
        Genome::new(model.network),
        model.sensor,
        model.playfield,
        seed.unwrap_or(model.seed),
        *score_limit,
    )?;
    let outcome = replay.run()?;
    tracing::info!(
        score = outcome.score,
        reached_limit = outcome.reached_limit,
        "replay finished"
    );

    if outcome.reached_limit {
        eprintln!("Reached the score limit: {}", outcome.score);
    } else {
        eprintln!("Crashed with score {}", outcome.score);
    }
    Ok(())
}
