use std::collections::BTreeSet;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use kanapop::config::Config;
use kanapop::engine::selection::{select_distractors, select_target};
use kanapop::engine::{Difficulty, RoundEngine};
use kanapop::kana::{ActiveInventory, Subset, Variant};
use kanapop::store::{MemoryStorage, MistakeLedger, ProgressStore};

/// Ledger where early glyphs have many mistakes, like a struggling beginner.
fn make_skewed_ledger() -> MistakeLedger {
    let mut ledger = MistakeLedger::zeroed();
    for (i, glyph) in Variant::Hiragana.glyphs().enumerate() {
        for _ in 0..(i % 13) * 3 {
            ledger.increment(Variant::Hiragana, glyph);
        }
    }
    ledger
}

fn all_subsets() -> BTreeSet<Subset> {
    Subset::all().iter().copied().collect()
}

fn bench_select_target(c: &mut Criterion) {
    let ledger = make_skewed_ledger();
    let active = ActiveInventory::resolve(Variant::Hiragana, &all_subsets());
    let mut rng = SmallRng::seed_from_u64(1);

    c.bench_function("select_target (104 chars, skewed)", |b| {
        b.iter(|| {
            select_target(
                &mut rng,
                Variant::Hiragana,
                black_box(active.entries()),
                black_box(&ledger),
            )
        })
    });
}

fn bench_select_distractors(c: &mut Criterion) {
    let ledger = make_skewed_ledger();
    let active = ActiveInventory::resolve(Variant::Hiragana, &all_subsets());
    let mut rng = SmallRng::seed_from_u64(2);

    c.bench_function("select_distractors (9 of 103)", |b| {
        b.iter(|| {
            select_distractors(
                &mut rng,
                Variant::Hiragana,
                black_box(active.entries()),
                "か",
                black_box(&ledger),
                9,
            )
        })
    });
}

fn bench_full_round(c: &mut Criterion) {
    let config = Config {
        difficulty: Difficulty::Hard,
        subsets: vec!["basic".into(), "voiced".into(), "combination".into()],
        ..Config::default()
    };
    let mut engine =
        RoundEngine::new(ProgressStore::open(MemoryStorage::new()), &config).with_seed(3);

    c.bench_function("start_round (hard, all subsets)", |b| {
        b.iter(|| engine.start_round())
    });
}

criterion_group!(
    benches,
    bench_select_target,
    bench_select_distractors,
    bench_full_round
);
criterion_main!(benches);
