use criterion::{criterion_group, criterion_main, Criterion};
use seatforge::config::{GaParams, ScoreWeights};
use seatforge::geometry::{GridSize, Seat};
use seatforge::group::Group;
use seatforge::optimizer::initialization::{initial_population, random_plan};
use seatforge::optimizer::runner::reproduce;
use seatforge::problem::{Problem, ProblemParams};
use std::hint::black_box;
use std::sync::Arc;

/// A classroom-sized hall: 12x8 seats, an aisle down the middle, 14 groups.
fn setup_problem() -> Arc<Problem> {
    let aisle = (0..8).map(|line| Seat::new(line, 6)).collect();
    let groups = (0..14)
        .map(|i| Group::new(format!("G{}", i), 2 + i % 5, "red", None))
        .collect();

    let problem = ProblemParams::builder()
        .grid(GridSize::new(12, 8))
        .groups(groups)
        .forbidden_seats(aisle)
        .weights(ScoreWeights::default())
        .build()
        .build_problem()
        .expect("Failed to build problem");
    Arc::new(problem)
}

fn criterion_benchmark(c: &mut Criterion) {
    let problem = setup_problem();
    let mut rng = fastrand::Rng::with_seed(1);
    let plan = random_plan(&problem, &mut rng);

    c.bench_function("calculate_score (12x8, 14 groups)", |b| {
        b.iter(|| {
            let mut p = black_box(plan.clone());
            p.calculate_score();
            p.score()
        })
    });

    let ga = GaParams::default();
    let population = initial_population(&problem, ga.nb_plans, &mut rng);
    c.bench_function("one generation (20 plans, 10 children)", |b| {
        b.iter(|| reproduce(black_box(&population), &ga, &mut rng).expect("generation failed"))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
