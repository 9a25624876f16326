//! Live-state derivation benchmarks for armada_core.
//!
//! Run with: `cargo bench -p armada_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use armada_core::checkpoint::Checkpoint;
use armada_core::curves::EconomyCurves;
use armada_core::jobs::{FleetJob, PendingJob, ProductionJob};
use armada_core::live::compute_live_state;
use armada_core::state::{Balances, ProductionTier, ShipType};
use armada_core::time::{DurationMs, Timestamp};
use armada_test_utils::fixtures::balance_config;

/// A checkpoint with a deep job queue and a month-long derivation gap.
fn busy_checkpoint() -> Checkpoint {
    let mut checkpoint = Checkpoint::new(
        Timestamp::from_millis(0),
        Balances {
            tier1: 10_000,
            tier2: 2_000,
            ..Balances::ZERO
        },
    );
    checkpoint.production.tier1 = 5;
    checkpoint.production.tier2 = 3;

    for i in 0..8u64 {
        let tier = match i % 3 {
            0 => ProductionTier::Tier1,
            1 => ProductionTier::Tier2,
            _ => ProductionTier::Tier3,
        };
        checkpoint
            .pending_jobs
            .push(PendingJob::Production(ProductionJob {
                tier,
                start_time: Timestamp::from_millis(i * 3_600_000),
                end_time: Timestamp::from_millis((i + 1) * 3_600_000),
            }));
    }
    for i in 0..4u64 {
        checkpoint.pending_jobs.push(PendingJob::Fleet(FleetJob {
            ship_type: ShipType::Ship1,
            count_remaining: 50,
            per_unit_interval: DurationMs::from_secs(30 + i),
            start_time: Timestamp::from_millis(i * 60_000),
        }));
    }
    checkpoint
}

pub fn live_state_benchmark(c: &mut Criterion) {
    let config = balance_config();
    let curves = EconomyCurves::new(&config);
    let checkpoint = busy_checkpoint();
    let month_later = Timestamp::from_millis(30 * 24 * 3_600_000);

    c.bench_function("live_state_month_gap", |b| {
        b.iter(|| {
            compute_live_state(black_box(&checkpoint), &curves, month_later)
                .expect("derivation succeeds")
        })
    });
}

criterion_group!(benches, live_state_benchmark);
criterion_main!(benches);
