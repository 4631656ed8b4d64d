use std::collections::BTreeMap;
use std::iter::FromIterator;

use criterion::{criterion_group, criterion_main, Criterion};
use tiervec::TierMap;

mod test_data;
use test_data::{
    RAND_100, RAND_10_000, RAND_1_000, STD_100_RAND, STD_10_000_RAND, STD_1_000_RAND, TM_100_RAND,
    TM_10_000_RAND, TM_1_000_RAND,
};

// Benches -------------------------------------------------------------------------------------------------------------

fn bench_insert(c: &mut Criterion) {
    // TM vs STD 100 ---------------------------------------------------------------------------------------------------

    c.bench_function("tm_insert_100_rand", |b| {
        b.iter(|| {
            let mut tm = TierMap::new();
            for k in &RAND_100.keys {
                tm.insert(*k, *k);
            }
        })
    });

    c.bench_function("std_insert_100_rand", |b| {
        b.iter(|| {
            let mut std = BTreeMap::new();
            for k in &RAND_100.keys {
                std.insert(*k, *k);
            }
        })
    });

    // TM vs STD 1_000 -------------------------------------------------------------------------------------------------

    c.bench_function("tm_insert_1_000_rand", |b| {
        b.iter(|| {
            let mut tm = TierMap::new();
            for k in &RAND_1_000.keys {
                tm.insert(*k, *k);
            }
        })
    });

    c.bench_function("std_insert_1_000_rand", |b| {
        b.iter(|| {
            let mut std = BTreeMap::new();
            for k in &RAND_1_000.keys {
                std.insert(*k, *k);
            }
        })
    });

    // TM vs STD 10_000 ------------------------------------------------------------------------------------------------

    c.bench_function("tm_insert_10_000_rand", |b| {
        b.iter(|| {
            let mut tm = TierMap::new();
            for k in &RAND_10_000.keys {
                tm.insert(*k, *k);
            }
        })
    });

    c.bench_function("std_insert_10_000_rand", |b| {
        b.iter(|| {
            let mut std = BTreeMap::new();
            for k in &RAND_10_000.keys {
                std.insert(*k, *k);
            }
        })
    });
}

fn bench_get(c: &mut Criterion) {
    // TM vs STD 100 ---------------------------------------------------------------------------------------------------

    c.bench_function("tm_get_100_rand", |b| {
        b.iter(|| {
            for k in &RAND_100.get_idxs {
                let _ = &TM_100_RAND.get(k);
            }
        })
    });

    c.bench_function("std_get_100_rand", |b| {
        b.iter(|| {
            for k in &RAND_100.get_idxs {
                let _ = &STD_100_RAND.get(k);
            }
        })
    });

    // TM vs STD 1_000 -------------------------------------------------------------------------------------------------

    c.bench_function("tm_get_1_000_rand", |b| {
        b.iter(|| {
            for k in &RAND_1_000.get_idxs {
                let _ = &TM_1_000_RAND.get(k);
            }
        })
    });

    c.bench_function("std_get_1_000_rand", |b| {
        b.iter(|| {
            for k in &RAND_1_000.get_idxs {
                let _ = &STD_1_000_RAND.get(k);
            }
        })
    });

    // TM vs STD 10_000 ------------------------------------------------------------------------------------------------

    c.bench_function("tm_get_10_000_rand", |b| {
        b.iter(|| {
            for k in &RAND_10_000.get_idxs {
                let _ = &TM_10_000_RAND.get(k);
            }
        })
    });

    c.bench_function("std_get_10_000_rand", |b| {
        b.iter(|| {
            for k in &RAND_10_000.get_idxs {
                let _ = &STD_10_000_RAND.get(k);
            }
        })
    });
}

fn bench_remove(c: &mut Criterion) {
    let mut tm_100: TierMap<usize, usize> =
        TierMap::from_iter(RAND_100.keys.iter().map(|&k| (k, k)));
    let mut tm_1_000: TierMap<usize, usize> =
        TierMap::from_iter(RAND_1_000.keys.iter().map(|&k| (k, k)));
    let mut tm_10_000: TierMap<usize, usize> =
        TierMap::from_iter(RAND_10_000.keys.iter().map(|&k| (k, k)));

    let mut std_100: BTreeMap<usize, usize> =
        BTreeMap::from_iter(RAND_100.keys.iter().map(|&k| (k, k)));
    let mut std_1_000: BTreeMap<usize, usize> =
        BTreeMap::from_iter(RAND_1_000.keys.iter().map(|&k| (k, k)));
    let mut std_10_000: BTreeMap<usize, usize> =
        BTreeMap::from_iter(RAND_10_000.keys.iter().map(|&k| (k, k)));

    // TM vs STD 100 ---------------------------------------------------------------------------------------------------

    c.bench_function("tm_remove_100_rand", |b| {
        b.iter(|| {
            for k in &RAND_100.remove_idxs {
                tm_100.remove(k);
            }
        })
    });

    c.bench_function("std_remove_100_rand", |b| {
        b.iter(|| {
            for k in &RAND_100.remove_idxs {
                std_100.remove(k);
            }
        })
    });

    // TM vs STD 1_000 -------------------------------------------------------------------------------------------------

    c.bench_function("tm_remove_1_000_rand", |b| {
        b.iter(|| {
            for k in &RAND_1_000.remove_idxs {
                tm_1_000.remove(k);
            }
        })
    });

    c.bench_function("std_remove_1_000_rand", |b| {
        b.iter(|| {
            for k in &RAND_1_000.remove_idxs {
                std_1_000.remove(k);
            }
        })
    });

    // TM vs STD 10_000 ------------------------------------------------------------------------------------------------

    c.bench_function("tm_remove_10_000_rand", |b| {
        b.iter(|| {
            for k in &RAND_10_000.remove_idxs {
                tm_10_000.remove(k);
            }
        })
    });

    c.bench_function("std_remove_10_000_rand", |b| {
        b.iter(|| {
            for k in &RAND_10_000.remove_idxs {
                std_10_000.remove(k);
            }
        })
    });
}

// Runner --------------------------------------------------------------------------------------------------------------

criterion_group!(benches, bench_insert, bench_get, bench_remove);
criterion_main!(benches);
