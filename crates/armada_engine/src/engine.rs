//! The economy engine: reads, job enqueueing, raid dispatch/resolution.
//!
//! Every write follows the same shape: open a transaction on the player's
//! row, consolidate the checkpoint to `now` so the mutation applies against
//! current balances, validate business rules (rejecting rolls the
//! transaction back untouched), mutate the working copy, commit. Commit
//! conflicts are retried a bounded number of times, never indefinitely.
//!
//! Callers supply `now` with every call; the engine never reads the wall
//! clock, so behavior is reproducible under test.

use std::sync::Arc;

use armada_core::curves::EconomyCurves;
use armada_core::data::GameConfig;
use armada_core::jobs::{FleetJob, PendingJob, ProductionJob};
use armada_core::live::{compute_live_state, LiveState};
use armada_core::raid::{Item, Raid, RaidDurationTier, RaidLocation};
use armada_core::state::{Balances, Fleet, ProductionTier, ShipType};
use armada_core::time::Timestamp;

use crate::error::{EngineError, Outcome, Rejection};
use crate::reminder::{Reminder, ReminderKind, ReminderScheduler};
use crate::store::{MemoryStore, PlayerId, PlayerRecord, StoreError, Transaction};

/// Bounded number of commit attempts before surfacing a conflict.
const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// Success payload of a queued production upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeReceipt {
    /// When the upgrade completes.
    pub completion_time: Timestamp,
    /// The level the lane reaches on completion.
    pub new_level: u32,
    /// What was debited.
    pub cost: Balances,
}

/// Success payload of a queued fleet build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReceipt {
    /// When the final unit delivers.
    pub completion_time: Timestamp,
    /// What was debited for the whole order.
    pub total_cost: Balances,
}

/// Success payload of a raid dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaidReceipt {
    /// When the fleet embarked.
    pub departure_time: Timestamp,
    /// When the fleet is due back.
    pub return_time: Timestamp,
    /// The embarked fleet.
    pub fleet_snapshot: Fleet,
}

/// Success payload of a raid resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaidResolution {
    /// Ships that made it home.
    pub returned_fleet: Fleet,
    /// Number of reward items banked.
    pub reward_count: usize,
}

/// The stateful economy engine.
///
/// Cheap to share: hold it in an `Arc` and call from as many concurrent
/// command executions as needed.
pub struct EconomyEngine {
    store: MemoryStore,
    config: Arc<GameConfig>,
    scheduler: Arc<dyn ReminderScheduler>,
}

impl EconomyEngine {
    /// Create an engine over an empty store.
    #[must_use]
    pub fn new(config: Arc<GameConfig>, scheduler: Arc<dyn ReminderScheduler>) -> Self {
        Self {
            store: MemoryStore::new(),
            config,
            scheduler,
        }
    }

    /// Create an engine over an existing store (e.g. restored from a
    /// snapshot).
    #[must_use]
    pub fn with_store(
        store: MemoryStore,
        config: Arc<GameConfig>,
        scheduler: Arc<dyn ReminderScheduler>,
    ) -> Self {
        Self {
            store,
            config,
            scheduler,
        }
    }

    /// The loaded game-balance configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The underlying store, for snapshot/restore by the embedder.
    #[must_use]
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    fn curves(&self) -> EconomyCurves<'_> {
        EconomyCurves::new(&self.config)
    }

    fn new_player(&self, now: Timestamp) -> PlayerRecord {
        PlayerRecord::new_player(now, &self.config)
    }

    /// Derive a player's live state at `now`.
    ///
    /// Reads a single consistent (checkpoint, jobs) snapshot and never
    /// mutates stored state; an unknown player reads as a fresh account.
    pub async fn live_state(
        &self,
        player: &PlayerId,
        now: Timestamp,
    ) -> Result<LiveState, EngineError> {
        let record = match self.store.read(player).await {
            Some(record) => record,
            None => self.new_player(now),
        };
        Ok(compute_live_state(&record.checkpoint, &self.curves(), now)?)
    }

    /// The player's most recent raid row, if any.
    pub async fn raid(&self, player: &PlayerId) -> Option<Raid> {
        self.store.read(player).await.and_then(|record| record.raid)
    }

    /// Add a raid location to the player's unlocked set.
    ///
    /// Called by the inventory subsystem when an unlock item is consumed.
    /// Idempotent.
    pub async fn unlock_location(
        &self,
        player: &PlayerId,
        location: RaidLocation,
        now: Timestamp,
    ) -> Result<(), EngineError> {
        self.write(player, now, |record, _curves| {
            record.unlocked_locations.insert(location);
            Ok(Outcome::Accepted(()))
        })
        .await
        .map(|_| ())
    }

    /// Queue one production upgrade for `tier`.
    ///
    /// The effective level accounts for already-queued upgrades of the same
    /// lane, so cost and duration are those of the level the new job will
    /// actually start from.
    pub async fn enqueue_production_upgrade(
        &self,
        player: &PlayerId,
        tier: ProductionTier,
        now: Timestamp,
    ) -> Result<Outcome<UpgradeReceipt>, EngineError> {
        let outcome = self
            .write(player, now, |record, curves| {
                let checkpoint = &record.checkpoint;
                let effective_level =
                    checkpoint.production.level(tier) + checkpoint.pending_production_count(tier);
                let cost = curves.upgrade_cost(tier, effective_level);

                let Some(debited) = checkpoint.balances.checked_sub_all(&cost) else {
                    return Ok(Outcome::Rejected(Rejection::InsufficientResources {
                        required: cost,
                        available: checkpoint.balances,
                    }));
                };

                let start_time = checkpoint
                    .last_pending_production_end(tier)
                    .map_or(now, |end| end.max(now));
                let end_time = start_time + curves.upgrade_duration(tier, effective_level);

                record.checkpoint.balances = debited;
                record
                    .checkpoint
                    .pending_jobs
                    .push(PendingJob::Production(ProductionJob {
                        tier,
                        start_time,
                        end_time,
                    }));

                Ok(Outcome::Accepted(UpgradeReceipt {
                    completion_time: end_time,
                    new_level: effective_level + 1,
                    cost,
                }))
            })
            .await?;

        if let Outcome::Accepted(receipt) = &outcome {
            tracing::info!(
                %player,
                tier = tier.as_key(),
                new_level = receipt.new_level,
                completion = %receipt.completion_time,
                "production upgrade queued"
            );
            self.schedule_best_effort(Reminder {
                player: player.clone(),
                kind: ReminderKind::ProductionUpgrade,
                payload: format!("{}-{}", tier.as_key(), receipt.new_level),
                fire_at: receipt.completion_time,
            });
        }
        Ok(outcome)
    }

    /// Queue a build order for `count` units of `ship`.
    pub async fn enqueue_fleet_build(
        &self,
        player: &PlayerId,
        ship: ShipType,
        count: u32,
        now: Timestamp,
    ) -> Result<Outcome<BuildReceipt>, EngineError> {
        let outcome = self
            .write(player, now, |record, curves| {
                if count == 0 {
                    return Ok(Outcome::Rejected(Rejection::InvalidCount { count }));
                }
                let unit_cost = curves.build_cost(ship);
                let Some(total_cost) = unit_cost.checked_mul(u64::from(count)) else {
                    return Ok(Outcome::Rejected(Rejection::InvalidCount { count }));
                };

                let Some(debited) = record.checkpoint.balances.checked_sub_all(&total_cost)
                else {
                    return Ok(Outcome::Rejected(Rejection::InsufficientResources {
                        required: total_cost,
                        available: record.checkpoint.balances,
                    }));
                };

                let job = FleetJob {
                    ship_type: ship,
                    count_remaining: count,
                    per_unit_interval: curves.build_time(ship),
                    start_time: now,
                };
                let completion_time = job.final_completion();

                record.checkpoint.balances = debited;
                record.checkpoint.pending_jobs.push(PendingJob::Fleet(job));

                Ok(Outcome::Accepted(BuildReceipt {
                    completion_time,
                    total_cost,
                }))
            })
            .await?;

        if let Outcome::Accepted(receipt) = &outcome {
            tracing::info!(
                %player,
                ship = ship.as_key(),
                count,
                completion = %receipt.completion_time,
                "fleet build queued"
            );
        }
        Ok(outcome)
    }

    /// Dispatch the player's entire live fleet on a raid.
    ///
    /// The whole fleet embarks; there is no partial commitment. Embarked
    /// ships are unavailable until [`EconomyEngine::resolve_raid`]. The
    /// return reminder is requested after the raid row commits; if
    /// scheduling fails the raid stands regardless.
    pub async fn dispatch_raid(
        &self,
        player: &PlayerId,
        location: RaidLocation,
        duration_tier: RaidDurationTier,
        now: Timestamp,
    ) -> Result<Outcome<RaidReceipt>, EngineError> {
        let outcome = self
            .write(player, now, |record, curves| {
                if let Some(raid) = &record.raid {
                    if !raid.is_returned() {
                        return Ok(Outcome::Rejected(Rejection::RaidAlreadyActive {
                            return_time: raid.return_time,
                        }));
                    }
                }
                if !record.unlocked_locations.contains(&location) {
                    return Ok(Outcome::Rejected(Rejection::LocationUnavailable {
                        location,
                    }));
                }
                // Post-consolidation, the checkpoint fleet *is* the live fleet.
                let fleet_snapshot = record.checkpoint.fleet;
                if fleet_snapshot.is_empty() {
                    return Ok(Outcome::Rejected(Rejection::NoFleetAvailable));
                }

                let return_time = now + curves.raid_duration(duration_tier);
                record.checkpoint.fleet = Fleet::EMPTY;
                record.raid = Some(Raid {
                    location,
                    duration_tier,
                    departure_time: now,
                    return_time,
                    fleet_snapshot,
                    reward_items: None,
                    fleet_losses: None,
                });

                Ok(Outcome::Accepted(RaidReceipt {
                    departure_time: now,
                    return_time,
                    fleet_snapshot,
                }))
            })
            .await?;

        if let Outcome::Accepted(receipt) = &outcome {
            tracing::info!(
                %player,
                location = location.as_key(),
                duration = duration_tier.as_key(),
                return_time = %receipt.return_time,
                ships = receipt.fleet_snapshot.total(),
                "raid dispatched"
            );
            self.schedule_best_effort(Reminder {
                player: player.clone(),
                kind: ReminderKind::RaidReturn,
                payload: format!("{}:{}", location.as_key(), duration_tier.as_key()),
                fire_at: receipt.return_time,
            });
        }
        Ok(outcome)
    }

    /// Finalize a returned raid.
    ///
    /// Called by the external resolution collaborator at or after the
    /// return time with the computed rewards and any fleet losses. The
    /// surviving fleet rejoins the checkpoint fleet and rewards are banked
    /// in the player's inventory.
    pub async fn resolve_raid(
        &self,
        player: &PlayerId,
        now: Timestamp,
        reward_items: Vec<Item>,
        fleet_losses: Option<Fleet>,
    ) -> Result<Outcome<RaidResolution>, EngineError> {
        let outcome = self
            .write(player, now, move |record, _curves| {
                let Some(raid) = record.raid.as_mut().filter(|raid| !raid.is_returned()) else {
                    return Ok(Outcome::Rejected(Rejection::NoActiveRaid));
                };
                if now < raid.return_time {
                    return Ok(Outcome::Rejected(Rejection::RaidNotReturned {
                        return_time: raid.return_time,
                    }));
                }

                let losses = fleet_losses.unwrap_or(Fleet::EMPTY);
                let returned_fleet = raid.fleet_snapshot.saturating_sub(&losses);
                raid.reward_items = Some(reward_items.clone());
                raid.fleet_losses = fleet_losses;

                record.checkpoint.fleet += returned_fleet;
                record.inventory.extend(reward_items.iter().cloned());

                Ok(Outcome::Accepted(RaidResolution {
                    returned_fleet,
                    reward_count: reward_items.len(),
                }))
            })
            .await?;

        if let Outcome::Accepted(resolution) = &outcome {
            tracing::info!(
                %player,
                ships_returned = resolution.returned_fleet.total(),
                rewards = resolution.reward_count,
                "raid resolved"
            );
        }
        Ok(outcome)
    }

    /// Run one write transaction: begin, consolidate, apply, commit, with
    /// bounded retry on commit conflicts.
    ///
    /// `apply` returning a rejection (or any error) drops the transaction,
    /// which rolls back everything including the consolidation.
    async fn write<T>(
        &self,
        player: &PlayerId,
        now: Timestamp,
        mut apply: impl FnMut(
            &mut PlayerRecord,
            &EconomyCurves<'_>,
        ) -> Result<Outcome<T>, EngineError>,
    ) -> Result<Outcome<T>, EngineError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let mut txn: Transaction = self.store.begin(player, || self.new_player(now)).await;
            let curves = self.curves();

            txn.record_mut().checkpoint.consolidate(&curves, now)?;
            let outcome = apply(txn.record_mut(), &curves)?;

            match outcome {
                Outcome::Rejected(rejection) => {
                    // Dropping txn rolls back the consolidation too.
                    return Ok(Outcome::Rejected(rejection));
                }
                Outcome::Accepted(payload) => match txn.commit() {
                    Ok(()) => return Ok(Outcome::Accepted(payload)),
                    Err(StoreError::Conflict { .. }) if attempts < MAX_COMMIT_ATTEMPTS => {
                        tracing::warn!(%player, attempts, "commit conflict, retrying");
                    }
                    Err(StoreError::Conflict { .. }) => {
                        return Err(EngineError::Conflict { attempts });
                    }
                    Err(other) => return Err(other.into()),
                },
            }
        }
    }

    fn schedule_best_effort(&self, reminder: Reminder) {
        if let Err(err) = self.scheduler.schedule(reminder) {
            tracing::warn!(%err, "reminder scheduling failed; continuing without it");
        }
    }
}
