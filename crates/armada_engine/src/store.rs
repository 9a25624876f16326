//! Per-player checkpoint storage with transactional mutation.
//!
//! The store exclusively owns persisted state per player. Each player maps
//! to one row guarded by its own async mutex; a write locks the row, works
//! on a copy, and writes back only on explicit commit. Dropping the
//! transaction without committing discards the copy - rollback on every
//! error path without exception-driven control flow.
//!
//! Writers for the same player serialize on the row lock (lock wait, not
//! busy failure); writers for different players never contend. Reads clone
//! the row under its lock, so a (checkpoint, jobs, raid) triple is always
//! a single consistent snapshot.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};

use armada_core::checkpoint::Checkpoint;
use armada_core::data::GameConfig;
use armada_core::raid::{Item, Raid, RaidLocation};
use armada_core::time::Timestamp;

/// Opaque player identifier, as issued by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a player id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the store persists for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// The economy checkpoint plus pending jobs.
    pub checkpoint: Checkpoint,
    /// The most recent raid row, if any. `Dispatched` status blocks new
    /// dispatches; `Returned` rows stay until the next dispatch replaces
    /// them.
    pub raid: Option<Raid>,
    /// Raid locations this player may dispatch to. Written by the external
    /// inventory subsystem through the engine's unlock write.
    pub unlocked_locations: BTreeSet<RaidLocation>,
    /// Opaque reward items collected from resolved raids.
    pub inventory: Vec<Item>,
    /// Bumped on every committed write; checked at commit time.
    pub version: u64,
}

impl PlayerRecord {
    /// Starting record for a player touched for the first time at `now`.
    #[must_use]
    pub fn new_player(now: Timestamp, config: &GameConfig) -> Self {
        Self {
            checkpoint: Checkpoint::new(now, config.starting_balances),
            raid: None,
            unlocked_locations: config.default_unlocked_locations().collect(),
            inventory: Vec::new(),
            version: 0,
        }
    }

    /// Whether a non-returned raid exists.
    #[must_use]
    pub fn has_active_raid(&self) -> bool {
        self.raid.as_ref().is_some_and(|raid| !raid.is_returned())
    }
}

/// Storage-layer failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Commit-time version check failed: another writer got there first.
    /// Surfaced to the engine, which retries a bounded number of times.
    #[error("concurrent modification of player {player} (expected version {expected}, found {found})")]
    Conflict {
        /// The contended player.
        player: PlayerId,
        /// Version the transaction began from.
        expected: u64,
        /// Version found at commit time.
        found: u64,
    },

    /// Snapshot bytes could not be produced.
    #[error("failed to encode store snapshot: {0}")]
    Encode(String),

    /// Snapshot bytes could not be read back.
    #[error("failed to decode store snapshot: {0}")]
    Decode(String),
}

type Row = Arc<Mutex<PlayerRecord>>;

/// In-memory checkpoint store.
///
/// The outer map lock is held only long enough to find or insert a row;
/// all per-player work happens under the row's own mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<PlayerId, Row>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn row(&self, player: &PlayerId) -> Option<Row> {
        self.rows
            .read()
            .expect("store map lock poisoned")
            .get(player)
            .cloned()
    }

    fn row_or_insert(&self, player: &PlayerId, init: impl FnOnce() -> PlayerRecord) -> Row {
        if let Some(row) = self.row(player) {
            return row;
        }
        let mut rows = self.rows.write().expect("store map lock poisoned");
        rows.entry(player.clone())
            .or_insert_with(|| Arc::new(Mutex::new(init())))
            .clone()
    }

    /// Consistent snapshot of one player's record, if the player exists.
    pub async fn read(&self, player: &PlayerId) -> Option<PlayerRecord> {
        let row = self.row(player)?;
        let guard = row.lock().await;
        Some(guard.clone())
    }

    /// Insert or replace a player's record wholesale.
    ///
    /// Used to seed state (tests, migrations); normal mutation goes through
    /// [`MemoryStore::begin`].
    pub async fn put(&self, player: &PlayerId, record: PlayerRecord) {
        let row = self.row_or_insert(player, || record.clone());
        *row.lock().await = record;
    }

    /// Open a write transaction on one player's row, creating the row from
    /// `init` if the player is new. Waits for any in-flight writer.
    pub async fn begin(
        &self,
        player: &PlayerId,
        init: impl FnOnce() -> PlayerRecord,
    ) -> Transaction {
        let row = self.row_or_insert(player, init);
        let guard = row.lock_owned().await;
        let working = guard.clone();
        let expected_version = guard.version;
        Transaction {
            guard,
            working,
            expected_version,
            player: player.clone(),
        }
    }

    /// Serialize every player record to bytes.
    pub async fn snapshot(&self) -> Result<Vec<u8>, StoreError> {
        let rows: Vec<(PlayerId, Row)> = {
            let map = self.rows.read().expect("store map lock poisoned");
            map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
        };
        let mut records = BTreeMap::new();
        for (player, row) in rows {
            let record = row.lock().await.clone();
            records.insert(player, record);
        }
        bincode::serialize(&records).map_err(|err| StoreError::Encode(err.to_string()))
    }

    /// Rebuild a store from [`MemoryStore::snapshot`] bytes.
    pub fn restore(bytes: &[u8]) -> Result<Self, StoreError> {
        let records: BTreeMap<PlayerId, PlayerRecord> =
            bincode::deserialize(bytes).map_err(|err| StoreError::Decode(err.to_string()))?;
        let rows = records
            .into_iter()
            .map(|(player, record)| (player, Arc::new(Mutex::new(record))))
            .collect();
        Ok(Self {
            rows: RwLock::new(rows),
        })
    }
}

/// A write transaction scoped to one player's row.
///
/// Holds the row lock for its whole lifetime. Mutations apply to a working
/// copy; [`Transaction::commit`] writes it back and bumps the version.
/// Dropping without committing rolls back.
#[must_use = "dropping a transaction without commit rolls it back"]
pub struct Transaction {
    guard: OwnedMutexGuard<PlayerRecord>,
    working: PlayerRecord,
    expected_version: u64,
    player: PlayerId,
}

impl Transaction {
    /// The working copy.
    #[must_use]
    pub fn record(&self) -> &PlayerRecord {
        &self.working
    }

    /// Mutable access to the working copy.
    pub fn record_mut(&mut self) -> &mut PlayerRecord {
        &mut self.working
    }

    /// Write the working copy back.
    ///
    /// # Errors
    ///
    /// [`StoreError::Conflict`] if the row version moved since `begin` -
    /// impossible under this store's row lock, but the contract every
    /// backend must satisfy, and what the engine's bounded retry handles.
    pub fn commit(self) -> Result<(), StoreError> {
        let Self {
            mut guard,
            mut working,
            expected_version,
            player,
        } = self;
        if guard.version != expected_version {
            return Err(StoreError::Conflict {
                player,
                expected: expected_version,
                found: guard.version,
            });
        }
        working.version = expected_version + 1;
        *guard = working;
        Ok(())
    }
}
