use crate::loyalty::{
    error::{LoyaltyError, invariant_violation},
    policy::LoyaltyPolicy,
    types::LoyaltyLedger,
};

// Checked by the engine after every transition, before the write reaches
// the store.
pub fn assert_ledger_consistency(
    ledger: &LoyaltyLedger,
    policy: &LoyaltyPolicy,
) -> Result<(), LoyaltyError> {
    if ledger.points < 0 || ledger.points >= policy.points_per_streak_unit {
        return Err(invariant_violation(format!(
            "ledger '{}' holds unnormalized points balance {}",
            ledger.participant_id, ledger.points
        )));
    }

    if ledger.guards > ledger.max_guards {
        return Err(invariant_violation(format!(
            "ledger '{}' exceeds guard cap: {} > {}",
            ledger.participant_id, ledger.guards, ledger.max_guards
        )));
    }

    if ledger.consecutive_logins > 0 && ledger.last_login_date.is_none() {
        return Err(invariant_violation(format!(
            "ledger '{}' counts logins without a recorded login date",
            ledger.participant_id
        )));
    }

    Ok(())
}
