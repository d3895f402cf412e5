use criterion::{black_box, criterion_group, criterion_main, Criterion};

use italic_phonetic::{CostVariant, PhonologicalEngine};

fn bench_pair(c: &mut Criterion) {
    let engine = PhonologicalEngine::default();

    c.bench_function("normalized_uniform_short", |b| {
        b.iter(|| engine.normalized(black_box("fratrEs"), black_box("fratrus"), CostVariant::Uniform))
    });

    c.bench_function("normalized_vowel_weighted_long", |b| {
        b.iter(|| {
            engine.normalized(
                black_box("pumpErias3kumts~a"),
                black_box("pompEriaisukomtsa"),
                CostVariant::VowelWeighted,
            )
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let engine = PhonologicalEngine::default();
    let pairs: Vec<(String, String)> = (0..200)
        .map(|i| (format!("pater{}", i % 7), format!("pEtir{}", i % 5)))
        .collect();

    c.bench_function("batch_200_vowel_weighted", |b| {
        b.iter(|| engine.batch_normalized(black_box(&pairs), CostVariant::VowelWeighted))
    });
}

criterion_group!(benches, bench_pair, bench_batch);
criterion_main!(benches);
