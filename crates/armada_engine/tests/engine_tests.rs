//! Engine integration tests.
//!
//! Exercises the full write path - transaction, consolidation, validation,
//! commit, reminders - against the standard test configuration, including
//! the financially-sensitive paths: debits, rejections, raid embark/return,
//! and same-player concurrency.

use std::sync::Arc;

use armada_core::checkpoint::Checkpoint;
use armada_core::jobs::PendingJob;
use armada_core::raid::{Item, RaidDurationTier, RaidLocation, RaidStatus};
use armada_core::state::{Balances, Fleet, ProductionTier, ShipType};
use armada_core::time::Timestamp;
use armada_engine::engine::EconomyEngine;
use armada_engine::error::{EngineError, Outcome, Rejection};
use armada_engine::reminder::{Reminder, ReminderKind, ReminderScheduler, ScheduleError};
use armada_engine::store::PlayerId;
use armada_test_utils::fixtures::{balance_config, player_record, test_engine};

fn ts(millis: u64) -> Timestamp {
    Timestamp::from_millis(millis)
}

fn tier1_balance(amount: u64) -> Balances {
    Balances {
        tier1: amount,
        ..Balances::ZERO
    }
}

async fn seed(engine: &EconomyEngine, id: &str, checkpoint: Checkpoint) -> PlayerId {
    let player = PlayerId::new(id);
    engine.store().put(&player, player_record(checkpoint)).await;
    player
}

// =============================================================================
// Production upgrades
// =============================================================================

#[tokio::test]
async fn test_upgrade_success_debits_and_queues() {
    let (engine, scheduler) = test_engine();
    let mut checkpoint = Checkpoint::new(ts(0), tier1_balance(1000));
    checkpoint.production.tier1 = 2;
    let player = seed(&engine, "alice", checkpoint).await;

    // upgradeCost(level 2) = 125 * 2^2 = 500, duration = 60000 * 1.25^2.
    let receipt = engine
        .enqueue_production_upgrade(&player, ProductionTier::Tier1, ts(0))
        .await
        .unwrap()
        .into_accepted()
        .unwrap();

    assert_eq!(receipt.completion_time, ts(93_750));
    assert_eq!(receipt.new_level, 3);
    assert_eq!(receipt.cost.tier1, 500);

    let record = engine.store().read(&player).await.unwrap();
    assert_eq!(record.checkpoint.balances.tier1, 500);
    assert_eq!(record.checkpoint.pending_jobs.len(), 1);
    match &record.checkpoint.pending_jobs[0] {
        PendingJob::Production(job) => {
            assert_eq!(job.tier, ProductionTier::Tier1);
            assert_eq!(job.start_time, ts(0));
            assert_eq!(job.end_time, ts(93_750));
        }
        other => panic!("expected production job, got {other:?}"),
    }

    // A completion reminder was requested.
    let reminders = scheduler.scheduled();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].kind, ReminderKind::ProductionUpgrade);
    assert_eq!(reminders[0].payload, "tier1-3");
    assert_eq!(reminders[0].fire_at, ts(93_750));
}

#[tokio::test]
async fn test_upgrade_insufficient_funds_leaves_state_untouched() {
    let (engine, scheduler) = test_engine();
    let mut checkpoint = Checkpoint::new(ts(0), tier1_balance(100));
    checkpoint.production.tier1 = 2;
    let player = seed(&engine, "bob", checkpoint).await;
    let before = engine.store().read(&player).await.unwrap();

    let outcome = engine
        .enqueue_production_upgrade(&player, ProductionTier::Tier1, ts(0))
        .await
        .unwrap();

    match outcome {
        Outcome::Rejected(Rejection::InsufficientResources {
            required,
            available,
        }) => {
            assert_eq!(required.tier1, 500);
            assert_eq!(available.tier1, 100);
        }
        other => panic!("expected insufficient resources, got {other:?}"),
    }

    // Rollback includes the consolidation: nothing moved at all.
    assert_eq!(engine.store().read(&player).await.unwrap(), before);
    assert!(scheduler.scheduled().is_empty());
}

#[tokio::test]
async fn test_queued_upgrades_sequence_per_tier() {
    let (engine, _scheduler) = test_engine();
    let wallet = Balances {
        tier1: 10_000,
        tier2: 500,
        ..Balances::ZERO
    };
    let player = seed(&engine, "carol", Checkpoint::new(ts(0), wallet)).await;

    // Level 0 -> 1: cost 125, duration 60000.
    let first = engine
        .enqueue_production_upgrade(&player, ProductionTier::Tier1, ts(0))
        .await
        .unwrap()
        .into_accepted()
        .unwrap();
    // Queued behind the first: effective level 1, starts when it ends.
    let second = engine
        .enqueue_production_upgrade(&player, ProductionTier::Tier1, ts(0))
        .await
        .unwrap()
        .into_accepted()
        .unwrap();

    assert_eq!(first.completion_time, ts(60_000));
    assert_eq!(first.new_level, 1);
    assert_eq!(second.new_level, 2);
    assert_eq!(second.cost.tier1, 250);
    // duration(1) = 75000, appended after the first job.
    assert_eq!(second.completion_time, ts(135_000));
    assert!(second.completion_time > first.completion_time);

    // Another tier queues independently from now.
    let other = engine
        .enqueue_production_upgrade(&player, ProductionTier::Tier2, ts(0))
        .await
        .unwrap()
        .into_accepted()
        .unwrap();
    assert_eq!(other.completion_time, ts(120_000));
}

#[tokio::test]
async fn test_consolidation_applies_completed_upgrades_to_later_writes() {
    let (engine, _scheduler) = test_engine();
    let player = seed(&engine, "dave", Checkpoint::new(ts(0), tier1_balance(500))).await;

    engine
        .enqueue_production_upgrade(&player, ProductionTier::Tier1, ts(0))
        .await
        .unwrap()
        .into_accepted()
        .unwrap();

    // By t=120s the upgrade (done at 60s) has landed. Income: 60s at
    // 1.0/sec then 60s at 1.5/sec = 150 on top of the remaining 375.
    let receipt = engine
        .enqueue_production_upgrade(&player, ProductionTier::Tier1, ts(120_000))
        .await
        .unwrap()
        .into_accepted()
        .unwrap();
    assert_eq!(receipt.new_level, 2);
    assert_eq!(receipt.cost.tier1, 250);
    // Fresh queue: starts at now, not behind the consolidated job.
    assert_eq!(receipt.completion_time, ts(120_000 + 75_000));

    let record = engine.store().read(&player).await.unwrap();
    assert_eq!(record.checkpoint.time, ts(120_000));
    assert_eq!(record.checkpoint.production.tier1, 1);
    assert_eq!(record.checkpoint.balances.tier1, 375 + 150 - 250);
}

#[tokio::test]
async fn test_new_player_materializes_with_starting_balances() {
    let (engine, _scheduler) = test_engine();
    let player = PlayerId::new("fresh");

    // Starting tier1 balance is 500; level-0 upgrade costs 125.
    let receipt = engine
        .enqueue_production_upgrade(&player, ProductionTier::Tier1, ts(1000))
        .await
        .unwrap()
        .into_accepted()
        .unwrap();
    assert_eq!(receipt.new_level, 1);

    let record = engine.store().read(&player).await.unwrap();
    assert_eq!(record.checkpoint.balances.tier1, 375);
    assert_eq!(record.checkpoint.time, ts(1000));
}

// =============================================================================
// Fleet builds
// =============================================================================

#[tokio::test]
async fn test_fleet_build_debits_and_delivers_incrementally() {
    let (engine, _scheduler) = test_engine();
    let player = seed(&engine, "erin", Checkpoint::new(ts(0), tier1_balance(1000))).await;

    // 4 corvettes at 50 each, one every 30s.
    let receipt = engine
        .enqueue_fleet_build(&player, ShipType::Ship1, 4, ts(0))
        .await
        .unwrap()
        .into_accepted()
        .unwrap();
    assert_eq!(receipt.total_cost.tier1, 200);
    assert_eq!(receipt.completion_time, ts(120_000));

    let record = engine.store().read(&player).await.unwrap();
    assert_eq!(record.checkpoint.balances.tier1, 800);

    // Two units delivered by 65s; the stored job is untouched.
    let live = engine.live_state(&player, ts(65_000)).await.unwrap();
    assert_eq!(live.fleet.ship1, 2);
    match &live.pending_jobs[0] {
        PendingJob::Fleet(job) => assert_eq!(job.count_remaining, 2),
        other => panic!("expected fleet job, got {other:?}"),
    }
    let stored = engine.store().read(&player).await.unwrap();
    match &stored.checkpoint.pending_jobs[0] {
        PendingJob::Fleet(job) => assert_eq!(job.count_remaining, 4),
        other => panic!("expected fleet job, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fleet_build_zero_count_rejected() {
    let (engine, _scheduler) = test_engine();
    let player = seed(&engine, "frank", Checkpoint::new(ts(0), tier1_balance(1000))).await;

    let outcome = engine
        .enqueue_fleet_build(&player, ShipType::Ship1, 0, ts(0))
        .await
        .unwrap();
    assert_eq!(
        outcome.rejection(),
        Some(&Rejection::InvalidCount { count: 0 })
    );
}

// =============================================================================
// Raid lifecycle
// =============================================================================

#[tokio::test]
async fn test_raid_lifecycle() {
    let (engine, scheduler) = test_engine();
    let mut checkpoint = Checkpoint::new(ts(0), Balances::ZERO);
    checkpoint.fleet.ship1 = 10;
    let player = seed(&engine, "grace", checkpoint).await;

    // Dispatch at t=100 for a medium (1h) raid.
    let receipt = engine
        .dispatch_raid(&player, RaidLocation::Location1, RaidDurationTier::Medium, ts(100))
        .await
        .unwrap()
        .into_accepted()
        .unwrap();
    assert_eq!(receipt.departure_time, ts(100));
    assert_eq!(receipt.return_time, ts(3_600_100));
    assert_eq!(receipt.fleet_snapshot.ship1, 10);

    // The fleet is out: unavailable for anything else.
    let live = engine.live_state(&player, ts(200)).await.unwrap();
    assert_eq!(live.fleet, Fleet::EMPTY);

    // A second dispatch before return fails and changes nothing.
    let second = engine
        .dispatch_raid(&player, RaidLocation::Location1, RaidDurationTier::Short, ts(500))
        .await
        .unwrap();
    assert_eq!(
        second.rejection(),
        Some(&Rejection::RaidAlreadyActive {
            return_time: ts(3_600_100)
        })
    );
    let raid = engine.raid(&player).await.unwrap();
    assert_eq!(raid.status(), RaidStatus::Dispatched);
    assert_eq!(raid.fleet_snapshot.ship1, 10);

    // Resolving early is rejected.
    let early = engine
        .resolve_raid(&player, ts(1_000_000), vec![], None)
        .await
        .unwrap();
    assert_eq!(
        early.rejection(),
        Some(&Rejection::RaidNotReturned {
            return_time: ts(3_600_100)
        })
    );

    // Resolution at return time: two corvettes lost, rewards banked.
    let losses = Fleet {
        ship1: 2,
        ..Fleet::EMPTY
    };
    let resolution = engine
        .resolve_raid(
            &player,
            ts(3_600_100),
            vec![Item("salvage:hull".into()), Item("salvage:core".into())],
            Some(losses),
        )
        .await
        .unwrap()
        .into_accepted()
        .unwrap();
    assert_eq!(resolution.returned_fleet.ship1, 8);
    assert_eq!(resolution.reward_count, 2);

    let record = engine.store().read(&player).await.unwrap();
    assert_eq!(record.checkpoint.fleet.ship1, 8);
    assert_eq!(record.inventory.len(), 2);
    assert!(record.raid.as_ref().unwrap().is_returned());

    // Resolving again finds no active raid; a new dispatch is allowed.
    let again = engine
        .resolve_raid(&player, ts(3_700_000), vec![], None)
        .await
        .unwrap();
    assert_eq!(again.rejection(), Some(&Rejection::NoActiveRaid));
    assert!(engine
        .dispatch_raid(&player, RaidLocation::Location1, RaidDurationTier::Short, ts(3_700_000))
        .await
        .unwrap()
        .is_accepted());

    // The original dispatch requested a return reminder.
    let reminders = scheduler.scheduled();
    assert!(reminders
        .iter()
        .any(|r| r.kind == ReminderKind::RaidReturn && r.fire_at == ts(3_600_100)));
}

#[tokio::test]
async fn test_dispatch_locked_location_rejected_until_unlocked() {
    let (engine, _scheduler) = test_engine();
    let mut checkpoint = Checkpoint::new(ts(0), Balances::ZERO);
    checkpoint.fleet.ship2 = 3;
    let player = seed(&engine, "heidi", checkpoint).await;

    let outcome = engine
        .dispatch_raid(&player, RaidLocation::Location3, RaidDurationTier::Long, ts(0))
        .await
        .unwrap();
    assert_eq!(
        outcome.rejection(),
        Some(&Rejection::LocationUnavailable {
            location: RaidLocation::Location3
        })
    );

    engine
        .unlock_location(&player, RaidLocation::Location3, ts(10))
        .await
        .unwrap();
    assert!(engine
        .dispatch_raid(&player, RaidLocation::Location3, RaidDurationTier::Long, ts(20))
        .await
        .unwrap()
        .is_accepted());
}

#[tokio::test]
async fn test_dispatch_with_no_fleet_rejected() {
    let (engine, _scheduler) = test_engine();
    let player = PlayerId::new("ivan");

    let outcome = engine
        .dispatch_raid(&player, RaidLocation::Location1, RaidDurationTier::Short, ts(0))
        .await
        .unwrap();
    assert_eq!(outcome.rejection(), Some(&Rejection::NoFleetAvailable));
}

#[tokio::test]
async fn test_raid_persists_when_reminder_scheduling_fails() {
    struct FailingScheduler;
    impl ReminderScheduler for FailingScheduler {
        fn schedule(&self, _reminder: Reminder) -> Result<(), ScheduleError> {
            Err(ScheduleError("transport down".into()))
        }
    }

    let engine = EconomyEngine::new(Arc::new(balance_config()), Arc::new(FailingScheduler));
    let mut checkpoint = Checkpoint::new(ts(0), Balances::ZERO);
    checkpoint.fleet.ship1 = 5;
    let player = seed(&engine, "judy", checkpoint).await;

    // Best-effort: the dispatch commits even though scheduling failed.
    assert!(engine
        .dispatch_raid(&player, RaidLocation::Location1, RaidDurationTier::Short, ts(0))
        .await
        .unwrap()
        .is_accepted());
    assert!(engine.raid(&player).await.is_some());
}

// =============================================================================
// Reads, faults, concurrency
// =============================================================================

#[tokio::test]
async fn test_live_state_read_is_idempotent() {
    let (engine, _scheduler) = test_engine();
    let mut checkpoint = Checkpoint::new(ts(0), tier1_balance(777));
    checkpoint.production.tier2 = 3;
    let player = seed(&engine, "kim", checkpoint).await;

    let first = engine.live_state(&player, ts(98_765)).await.unwrap();
    let second = engine.live_state(&player, ts(98_765)).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_query_before_checkpoint_is_a_fault() {
    let (engine, _scheduler) = test_engine();
    let player = seed(&engine, "leo", Checkpoint::new(ts(5000), Balances::ZERO)).await;

    let err = engine.live_state(&player, ts(100)).await.unwrap_err();
    assert!(matches!(err, EngineError::Economy(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_double_tap_funds_only_one() {
    let (engine, _scheduler) = test_engine();
    let engine = Arc::new(engine);
    // Exactly enough for one corvette.
    let player = seed(&engine, "mallory", Checkpoint::new(ts(0), tier1_balance(50))).await;

    let a = {
        let engine = engine.clone();
        let player = player.clone();
        tokio::spawn(async move {
            engine
                .enqueue_fleet_build(&player, ShipType::Ship1, 1, ts(0))
                .await
                .unwrap()
        })
    };
    let b = {
        let engine = engine.clone();
        let player = player.clone();
        tokio::spawn(async move {
            engine
                .enqueue_fleet_build(&player, ShipType::Ship1, 1, ts(0))
                .await
                .unwrap()
        })
    };

    let outcomes = [a.await.unwrap(), b.await.unwrap()];
    let accepted = outcomes.iter().filter(|o| o.is_accepted()).count();
    assert_eq!(accepted, 1, "exactly one of two concurrent builds may pass");

    let record = engine.store().read(&player).await.unwrap();
    assert_eq!(record.checkpoint.balances.tier1, 0);
    assert_eq!(record.checkpoint.pending_jobs.len(), 1);
}

#[tokio::test]
async fn test_store_snapshot_survives_engine_restart() {
    let (engine, _scheduler) = test_engine();
    let player = seed(&engine, "nina", Checkpoint::new(ts(0), tier1_balance(1000))).await;
    engine
        .enqueue_fleet_build(&player, ShipType::Ship1, 2, ts(0))
        .await
        .unwrap()
        .into_accepted()
        .unwrap();

    let bytes = engine.store().snapshot().await.unwrap();
    let restored = EconomyEngine::with_store(
        armada_engine::store::MemoryStore::restore(&bytes).unwrap(),
        Arc::new(balance_config()),
        Arc::new(armada_engine::reminder::RecordingScheduler::new()),
    );

    let live = restored.live_state(&player, ts(60_000)).await.unwrap();
    assert_eq!(live.fleet.ship1, 2);
    assert_eq!(live.balances.tier1, 900 + 60); // debit survived, income accrues
}
