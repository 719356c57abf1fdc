use flappy_engine::{RecordingSurface, Seed, SensorMode};
use flappy_training::{GenerationReport, Replay, Trainer, TrainingConfig};

fn config(seed: u64) -> TrainingConfig {
    TrainingConfig {
        population: 12,
        seed: Some(Seed::from_u64(seed)),
        score_limit: Some(400),
        ..TrainingConfig::default()
    }
}

fn tick_n(trainer: &mut Trainer, ticks: usize) -> Vec<GenerationReport> {
    let mut reports = Vec::new();
    for _ in 0..ticks {
        if let Some(report) = trainer.tick().unwrap() {
            reports.push(report);
        }
    }
    reports
}

fn snapshot(trainer: &Trainer) -> (u64, Vec<(f32, f32, bool)>, Vec<f32>) {
    let world = trainer.world();
    let birds = world
        .birds()
        .iter()
        .map(|b| (b.x(), b.y(), b.is_alive()))
        .collect();
    let params = trainer
        .generation()
        .genomes()
        .iter()
        .flat_map(|g| g.network().w1().iter().copied().collect::<Vec<_>>())
        .collect();
    (world.score(), birds, params)
}

#[test]
fn fast_forward_matches_single_ticks() {
    let mut stepped = Trainer::new(config(7)).unwrap();
    let mut forwarded = Trainer::new(config(7)).unwrap();
    forwarded.fast_forward_mut().change(6);
    assert_eq!(forwarded.fast_forward().get(), 7);

    let mut forwarded_reports = Vec::new();
    for _ in 0..150 {
        forwarded_reports.extend(forwarded.frame().unwrap());
    }
    let stepped_reports = tick_n(&mut stepped, 150 * 7);

    assert!(!stepped_reports.is_empty());
    assert_eq!(stepped_reports, forwarded_reports);
    assert_eq!(snapshot(&stepped), snapshot(&forwarded));
}

#[test]
fn seeded_runs_are_reproducible() {
    let mut a = Trainer::new(config(11)).unwrap();
    let mut b = Trainer::new(config(11)).unwrap();
    assert_eq!(a.seed(), b.seed());
    assert_eq!(tick_n(&mut a, 2000), tick_n(&mut b, 2000));
    assert_eq!(snapshot(&a), snapshot(&b));
}

#[test]
fn generations_turn_over_with_constant_size() {
    let mut trainer = Trainer::new(config(13)).unwrap();
    let mut ids = Vec::new();
    while ids.len() < 4 {
        if let Some(report) = trainer.tick().unwrap() {
            ids.push(report.generation.get());
            assert_eq!(report.fitness.count, 12);
            assert!(report.fitness.max <= 400.0);
        }
        assert_eq!(trainer.generation().population_size(), 12);
    }
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(trainer.generation().id().get(), 5);
}

#[test]
fn offset_sensor_trains() {
    let config = TrainingConfig {
        sensor: SensorMode::Offset,
        ..config(17)
    };
    let mut trainer = Trainer::new(config).unwrap();
    assert_eq!(trainer.generation().network_shape().inputs, 2);
    let reports = tick_n(&mut trainer, 1500);
    assert!(!reports.is_empty());
}

#[test]
fn champion_replays_in_a_fresh_world() {
    let mut trainer = Trainer::new(config(19)).unwrap();
    tick_n(&mut trainer, 1500);
    let champion = trainer.champion().expect("at least one generation finished");

    let replay = Replay::new(
        champion.genome.clone(),
        trainer.config().sensor,
        trainer.playfield().clone(),
        Seed::from_u64(23),
        400,
    )
    .unwrap();
    let outcome = replay.run().unwrap();
    assert!(outcome.score <= 400);
}

#[test]
fn render_draws_the_world() {
    let trainer = Trainer::new(config(29)).unwrap();
    let mut surface = RecordingSurface::default();
    trainer.render(&mut surface);
    let birds = surface.calls.iter().filter(|c| c.0.is_bird()).count();
    assert_eq!(birds, 12);
}
