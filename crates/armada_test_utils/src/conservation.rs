//! Conservation testing utilities.
//!
//! The economy's core financial invariant: no resource is created or
//! destroyed outside defined income accrual. For any sequence of enqueue
//! operations executed at a fixed instant, the balances before the sequence
//! must equal the live balances after it plus every accepted operation's
//! debit - rejected operations must not move a single unit.
//!
//! # Testing Strategy
//!
//! 1. **Unit tests**: individual debit paths (upgrade, build)
//! 2. **Property tests**: random operation sequences must still conserve
//! 3. **Integration tests**: full engine scenarios are audited end to end

use armada_core::state::{Balances, ProductionTier, ShipType};
use armada_core::time::Timestamp;
use armada_engine::engine::EconomyEngine;
use armada_engine::error::{EngineError, Outcome};
use armada_engine::store::PlayerId;

/// One enqueue operation in an audited sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomyOp {
    /// Queue a production upgrade for one lane.
    Upgrade(ProductionTier),
    /// Queue a build order for N units of one hull.
    Build(ShipType, u32),
}

/// Result of a conservation audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConservationReport {
    /// Live balances before the sequence.
    pub initial: Balances,
    /// Live balances after the sequence.
    pub live: Balances,
    /// Sum of every accepted operation's debit.
    pub spent: Balances,
    /// Operations that committed.
    pub accepted: usize,
    /// Operations rejected by business rules.
    pub rejected: usize,
}

impl ConservationReport {
    /// Whether `initial == live + spent` field-wise.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        self.live.saturating_add(&self.spent) == self.initial
    }

    /// Assert conservation with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if resources were created or destroyed by the sequence.
    pub fn assert_conserved(&self) {
        assert!(
            self.is_conserved(),
            "Resources not conserved!\n\
             Initial:  {:?}\n\
             Live:     {:?}\n\
             Spent:    {:?}\n\
             Accepted: {}, rejected: {}",
            self.initial,
            self.live,
            self.spent,
            self.accepted,
            self.rejected
        );
    }
}

/// Execute `ops` at a fixed instant and audit the balance ledger.
///
/// # Errors
///
/// Propagates engine faults; business rejections are counted, not errors.
pub async fn run_conservation_audit(
    engine: &EconomyEngine,
    player: &PlayerId,
    ops: &[EconomyOp],
    now: Timestamp,
) -> Result<ConservationReport, EngineError> {
    let initial = engine.live_state(player, now).await?.balances;
    let mut spent = Balances::ZERO;
    let mut accepted = 0;
    let mut rejected = 0;

    for op in ops {
        match op {
            EconomyOp::Upgrade(tier) => {
                match engine.enqueue_production_upgrade(player, *tier, now).await? {
                    Outcome::Accepted(receipt) => {
                        spent += receipt.cost;
                        accepted += 1;
                    }
                    Outcome::Rejected(_) => rejected += 1,
                }
            }
            EconomyOp::Build(ship, count) => {
                match engine.enqueue_fleet_build(player, *ship, *count, now).await? {
                    Outcome::Accepted(receipt) => {
                        spent += receipt.total_cost;
                        accepted += 1;
                    }
                    Outcome::Rejected(_) => rejected += 1,
                }
            }
        }
    }

    let live = engine.live_state(player, now).await?.balances;
    Ok(ConservationReport {
        initial,
        live,
        spent,
        accepted,
        rejected,
    })
}

/// Proptest strategies for economy operations.
pub mod strategies {
    use proptest::prelude::*;

    use super::EconomyOp;
    use armada_core::state::{ProductionTier, ShipType};

    /// Any production lane.
    pub fn arb_production_tier() -> impl Strategy<Value = ProductionTier> {
        prop_oneof![
            Just(ProductionTier::Tier1),
            Just(ProductionTier::Tier2),
            Just(ProductionTier::Tier3),
        ]
    }

    /// Any ship type.
    pub fn arb_ship_type() -> impl Strategy<Value = ShipType> {
        prop_oneof![
            Just(ShipType::Ship1),
            Just(ShipType::Ship2),
            Just(ShipType::Ship3),
            Just(ShipType::Ship4),
            Just(ShipType::ShipSpecial1),
        ]
    }

    /// Build counts including the invalid zero.
    pub fn arb_build_count() -> impl Strategy<Value = u32> {
        0u32..8
    }

    /// Any single enqueue operation.
    pub fn arb_economy_op() -> impl Strategy<Value = EconomyOp> {
        prop_oneof![
            arb_production_tier().prop_map(EconomyOp::Upgrade),
            (arb_ship_type(), arb_build_count())
                .prop_map(|(ship, count)| EconomyOp::Build(ship, count)),
        ]
    }

    /// A sequence of enqueue operations.
    pub fn arb_op_sequence(max_len: usize) -> impl Strategy<Value = Vec<EconomyOp>> {
        proptest::collection::vec(arb_economy_op(), 0..max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{player_record, test_engine};
    use armada_core::checkpoint::Checkpoint;
    use armada_core::state::Balances;
    use proptest::prelude::*;

    async fn seeded_engine(balances: Balances) -> (EconomyEngine, PlayerId) {
        let (engine, _scheduler) = test_engine();
        let player = PlayerId::new("auditee");
        let record = player_record(Checkpoint::new(Timestamp::from_millis(0), balances));
        engine.store().put(&player, record).await;
        (engine, player)
    }

    #[tokio::test]
    async fn test_mixed_sequence_conserves() {
        let (engine, player) = seeded_engine(Balances {
            tier1: 2000,
            tier2: 300,
            ..Balances::ZERO
        })
        .await;

        let ops = [
            EconomyOp::Upgrade(ProductionTier::Tier1),
            EconomyOp::Build(ShipType::Ship1, 5),
            EconomyOp::Upgrade(ProductionTier::Tier1),
            EconomyOp::Build(ShipType::Ship3, 2),
            // Far beyond remaining funds: must reject without moving units.
            EconomyOp::Build(ShipType::Ship4, 50),
        ];

        let report =
            run_conservation_audit(&engine, &player, &ops, Timestamp::from_millis(0))
                .await
                .unwrap();
        assert!(report.accepted >= 3);
        assert!(report.rejected >= 1);
        report.assert_conserved();
    }

    #[tokio::test]
    async fn test_rejections_move_nothing() {
        let (engine, player) = seeded_engine(Balances::ZERO).await;

        let ops = [
            EconomyOp::Upgrade(ProductionTier::Tier1),
            EconomyOp::Build(ShipType::Ship2, 3),
        ];
        let report =
            run_conservation_audit(&engine, &player, &ops, Timestamp::from_millis(0))
                .await
                .unwrap();
        assert_eq!(report.accepted, 0);
        assert_eq!(report.rejected, 2);
        assert_eq!(report.initial, report.live);
        report.assert_conserved();
    }

    proptest! {
        /// Random operation sequences never create or destroy resources.
        #[test]
        fn prop_random_sequences_conserve(ops in strategies::arb_op_sequence(12)) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("build test runtime");
            runtime.block_on(async {
                let (engine, player) = seeded_engine(Balances {
                    tier1: 5000,
                    tier2: 1000,
                    tier3: 200,
                    special1: 20,
                }).await;
                let report = run_conservation_audit(
                    &engine,
                    &player,
                    &ops,
                    Timestamp::from_millis(0),
                )
                .await
                .expect("audit runs");
                report.assert_conserved();
            });
        }
    }
}
