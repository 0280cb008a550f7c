use std::sync::Arc;

use time::Date;

use crate::{
    loyalty::{
        conversion,
        error::{LoyaltyError, LoyaltyErrorKind},
        invariants,
        policy::LoyaltyPolicy,
        ports::LedgerStore,
        tracker,
        types::{CheckInOutcome, LoyaltyLedger, NoChangeReason, ViolationKind, WorkEvent},
    },
    observability,
    types::Role,
};

// Service facade over the pure loyalty transitions. The ledger record is
// the sole contended resource: every mutation is a read-modify-write under
// optimistic concurrency, re-read and recomputed on conflict up to
// policy.max_write_attempts. Transitions are pure, so a retry is always
// safe.
pub struct LoyaltyEngine {
    store: Arc<dyn LedgerStore>,
    policy: LoyaltyPolicy,
}

impl LoyaltyEngine {
    pub fn new(store: Arc<dyn LedgerStore>, policy: LoyaltyPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &LoyaltyPolicy {
        &self.policy
    }

    pub async fn check_in(
        &self,
        participant_id: &str,
        role: Role,
        today: Date,
    ) -> Result<CheckInOutcome, LoyaltyError> {
        if !role.is_supplier() {
            tracing::debug!(
                target: "loyalty",
                participant_id,
                "check_in_not_applicable_role"
            );
            return Ok(CheckInOutcome::NoChange {
                reason: NoChangeReason::NotSupplier,
            });
        }

        let mut attempt = 0;
        loop {
            attempt += 1;

            let current = self.store.get(participant_id).await?;
            let (expected_version, ledger) = match current {
                Some(record) => (Some(record.version), record.ledger),
                None => (
                    None,
                    LoyaltyLedger::new(participant_id, self.policy.max_guards),
                ),
            };

            let outcome = tracker::record_check_in(&ledger, role, today, &self.policy);
            let CheckInOutcome::Applied {
                ledger: next,
                guard_awarded,
            } = &outcome
            else {
                tracing::debug!(
                    target: "loyalty",
                    participant_id,
                    "check_in_no_change"
                );
                return Ok(outcome);
            };

            invariants::assert_ledger_consistency(next, &self.policy)?;

            match self.store.put(participant_id, expected_version, next).await {
                Ok(version) => {
                    observability::record_check_in(*guard_awarded);
                    tracing::info!(
                        target: "loyalty",
                        participant_id,
                        version,
                        consecutive_logins = next.consecutive_logins,
                        guards = next.guards,
                        guard_awarded,
                        "check_in_applied"
                    );
                    return Ok(outcome);
                }
                Err(err) if retryable(&err, attempt, self.policy.max_write_attempts) => {
                    observability::record_ledger_conflict();
                    tracing::debug!(
                        target: "loyalty",
                        participant_id,
                        attempt,
                        "ledger_write_conflict_retry"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    pub async fn apply_event(&self, event: &WorkEvent) -> Result<LoyaltyLedger, LoyaltyError> {
        match event {
            WorkEvent::WorkCompleted {
                participant_id,
                hours_worked,
                work_date,
            } => {
                self.record_work_completion(participant_id, *hours_worked, *work_date)
                    .await
            }
            WorkEvent::ViolationReported {
                participant_id,
                kind,
                ..
            } => self.record_violation(participant_id, *kind).await,
        }
    }

    pub async fn record_work_completion(
        &self,
        participant_id: &str,
        hours_worked: u32,
        work_date: Date,
    ) -> Result<LoyaltyLedger, LoyaltyError> {
        let ledger = self
            .commit(participant_id, |ledger, policy| {
                conversion::apply_work_completion(ledger, hours_worked, work_date, policy)
            })
            .await?;
        tracing::info!(
            target: "loyalty",
            participant_id,
            hours_worked,
            current_count = ledger.current_count,
            points = ledger.points,
            "work_completion_applied"
        );
        Ok(ledger)
    }

    pub async fn record_violation(
        &self,
        participant_id: &str,
        kind: ViolationKind,
    ) -> Result<LoyaltyLedger, LoyaltyError> {
        let ledger = self
            .commit(participant_id, |ledger, policy| {
                conversion::apply_violation(ledger, policy)
            })
            .await?;
        tracing::info!(
            target: "loyalty",
            participant_id,
            kind = ?kind,
            current_count = ledger.current_count,
            points = ledger.points,
            "violation_applied"
        );
        Ok(ledger)
    }

    async fn commit<F>(
        &self,
        participant_id: &str,
        transition: F,
    ) -> Result<LoyaltyLedger, LoyaltyError>
    where
        F: Fn(&LoyaltyLedger, &LoyaltyPolicy) -> Result<LoyaltyLedger, LoyaltyError>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;

            let current = self.store.get(participant_id).await?;
            let (expected_version, ledger) = match current {
                Some(record) => (Some(record.version), record.ledger),
                None => (
                    None,
                    LoyaltyLedger::new(participant_id, self.policy.max_guards),
                ),
            };

            let next = transition(&ledger, &self.policy)?;
            invariants::assert_ledger_consistency(&next, &self.policy)?;

            match self
                .store
                .put(participant_id, expected_version, &next)
                .await
            {
                Ok(_) => return Ok(next),
                Err(err) if retryable(&err, attempt, self.policy.max_write_attempts) => {
                    observability::record_ledger_conflict();
                    tracing::debug!(
                        target: "loyalty",
                        participant_id,
                        attempt,
                        "ledger_write_conflict_retry"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn retryable(err: &LoyaltyError, attempt: u32, max_attempts: u32) -> bool {
    err.kind == LoyaltyErrorKind::LedgerConflict && attempt < max_attempts
}
