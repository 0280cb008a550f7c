use time::Date;

use crate::loyalty::{
    error::{LoyaltyError, arithmetic_error, invalid_request},
    policy::LoyaltyPolicy,
    types::LoyaltyLedger,
};

// Conversion contract for externally-triggered work events. Normalization
// runs atomically with every points mutation: no state with
// |points| >= points_per_streak_unit is ever persisted.

pub fn apply_work_completion(
    ledger: &LoyaltyLedger,
    hours_worked: u32,
    work_date: Date,
    policy: &LoyaltyPolicy,
) -> Result<LoyaltyLedger, LoyaltyError> {
    let mut next = ledger.clone();

    next.current_count = next
        .current_count
        .checked_add(1)
        .ok_or_else(|| arithmetic_error("streak count overflow on work completion"))?;

    let accrued = (hours_worked as i64)
        .checked_mul(policy.points_per_work_hour)
        .ok_or_else(|| arithmetic_error("points accrual overflow"))?;
    next.points = next
        .points
        .checked_add(accrued)
        .ok_or_else(|| arithmetic_error("points balance overflow on accrual"))?;

    next.last_work_date = Some(work_date);

    normalize_points(&mut next, policy)?;
    Ok(next)
}

pub fn apply_violation(
    ledger: &LoyaltyLedger,
    policy: &LoyaltyPolicy,
) -> Result<LoyaltyLedger, LoyaltyError> {
    let mut next = ledger.clone();

    next.points = next
        .points
        .checked_sub(policy.violation_penalty)
        .ok_or_else(|| arithmetic_error("points balance underflow on penalty"))?;

    normalize_points(&mut next, policy)?;
    Ok(next)
}

// Every full unit of positive points converts to one streak unit; a deficit
// borrows whole streak units back. Once the streak is exhausted the ledger
// floors at the all-zero state rather than recording unbounded debt.
pub fn normalize_points(
    ledger: &mut LoyaltyLedger,
    policy: &LoyaltyPolicy,
) -> Result<(), LoyaltyError> {
    let unit = policy.points_per_streak_unit;
    if unit <= 0 {
        return Err(invalid_request("points_per_streak_unit must be positive"));
    }

    while ledger.points >= unit {
        ledger.points -= unit;
        ledger.current_count = ledger
            .current_count
            .checked_add(1)
            .ok_or_else(|| arithmetic_error("streak count overflow on points conversion"))?;
    }

    while ledger.points < 0 && ledger.current_count > 0 {
        ledger.points += unit;
        ledger.current_count -= 1;
    }

    if ledger.points < 0 {
        ledger.points = 0;
    }

    Ok(())
}
