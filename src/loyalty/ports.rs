use async_trait::async_trait;

use crate::loyalty::{error::LoyaltyError, types::{LoyaltyLedger, VersionedLedger}};

// Persistence boundary for the ledger record. `put` is a compare-and-swap:
// `expected_version` of `None` asserts creation, `Some(v)` asserts the
// record is still at version `v`. A mismatch is a `LedgerConflict` error and
// the caller re-reads and recomputes.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn get(&self, participant_id: &str) -> Result<Option<VersionedLedger>, LoyaltyError>;

    async fn put(
        &self,
        participant_id: &str,
        expected_version: Option<u64>,
        ledger: &LoyaltyLedger,
    ) -> Result<u64, LoyaltyError>;
}
