use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::loyalty::{
    error::{LoyaltyError, ledger_conflict},
    ports::LedgerStore,
    types::{LoyaltyLedger, VersionedLedger},
};

// In-memory ledger store for tests and embedded hosts, enforcing the same
// optimistic-concurrency contract as the external backend.
#[derive(Default)]
pub struct MemoryLedgerStore {
    records: Mutex<BTreeMap<String, VersionedLedger>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn get(&self, participant_id: &str) -> Result<Option<VersionedLedger>, LoyaltyError> {
        let records = self.records.lock().await;
        Ok(records.get(participant_id).cloned())
    }

    async fn put(
        &self,
        participant_id: &str,
        expected_version: Option<u64>,
        ledger: &LoyaltyLedger,
    ) -> Result<u64, LoyaltyError> {
        let mut records = self.records.lock().await;
        let current_version = records.get(participant_id).map(|record| record.version);

        if current_version != expected_version {
            return Err(ledger_conflict(format!(
                "ledger '{}' version mismatch: expected {:?}, found {:?}",
                participant_id, expected_version, current_version
            )));
        }

        let version = current_version.unwrap_or(0) + 1;
        records.insert(
            participant_id.to_string(),
            VersionedLedger {
                version,
                ledger: ledger.clone(),
            },
        );
        Ok(version)
    }
}
