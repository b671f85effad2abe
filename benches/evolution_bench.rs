//! Criterion benchmarks for the DFA evolution engine.
//!
//! Measures the building blocks (execution, evaluation, crossover,
//! selection) and a short end-to-end run on the reference language.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use genetic_dfa::dfa::{language, Automaton};
use genetic_dfa::ga::operators::crossover;
use genetic_dfa::ga::selection::{rank, roulette};
use genetic_dfa::ga::{Evolution, EvolutionConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ===========================================================================
// Building blocks
// ===========================================================================

fn bench_evaluate(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let training = language::reference_set(&mut rng);
    let config = EvolutionConfig::default();
    let dfa = Automaton::create_random(&config, &mut rng);

    c.bench_function("evaluate_reference_set", |b| {
        b.iter(|| genetic_dfa::dfa::evaluate(black_box(&dfa), training.examples()))
    });
}

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossover");
    for states in [5usize, 20, 80] {
        let mut rng = StdRng::seed_from_u64(42);
        let config = EvolutionConfig::default().with_state_count(states);
        let a = Automaton::create_random(&config, &mut rng);
        let b = Automaton::create_random(&config, &mut rng);

        group.bench_with_input(BenchmarkId::from_parameter(states), &states, |bench, _| {
            bench.iter(|| crossover(black_box(&a), black_box(&b), &mut rng))
        });
    }
    group.finish();
}

fn bench_roulette(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let training = language::reference_set(&mut rng);
    let config = EvolutionConfig::default().with_population_size(200);
    let mut population: Vec<Automaton> = (0..200)
        .map(|_| Automaton::create_random(&config, &mut rng))
        .collect();
    for dfa in &mut population {
        dfa.evaluate(training.examples());
    }
    rank(&mut population);

    c.bench_function("roulette_200", |b| {
        b.iter(|| roulette(black_box(&population), &mut rng))
    });
}

// ===========================================================================
// End to end
// ===========================================================================

fn bench_evolution(c: &mut Criterion) {
    let training = language::reference_set(&mut StdRng::seed_from_u64(7));
    let mut group = c.benchmark_group("evolution");
    group.sample_size(10);

    for population in [50usize, 200] {
        let config = EvolutionConfig::default()
            .with_population_size(population)
            .with_elitism_offset(population / 10)
            .with_max_epochs(50)
            .with_seed(7);

        group.bench_with_input(
            BenchmarkId::from_parameter(population),
            &config,
            |b, config| {
                b.iter(|| {
                    Evolution::new(config.clone(), training.clone())
                        .expect("valid benchmark config")
                        .run()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_crossover,
    bench_roulette,
    bench_evolution
);
criterion_main!(benches);
