use time::Date;

use crate::{
    loyalty::{
        policy::LoyaltyPolicy,
        types::{CheckInOutcome, LoyaltyLedger, NoChangeReason},
    },
    types::Role,
};

// Pure daily check-in transition. At most one mutation per calendar day per
// participant; showing up never grows the streak count, it only gates guard
// accrual.
pub fn record_check_in(
    ledger: &LoyaltyLedger,
    role: Role,
    today: Date,
    policy: &LoyaltyPolicy,
) -> CheckInOutcome {
    if !role.is_supplier() {
        return CheckInOutcome::NoChange {
            reason: NoChangeReason::NotSupplier,
        };
    }

    // A backwards clock must never break a streak: today earlier than the
    // recorded login counts as a duplicate.
    if let Some(last) = ledger.last_login_date
        && today <= last
    {
        return CheckInOutcome::NoChange {
            reason: NoChangeReason::AlreadyCheckedIn,
        };
    }

    let gap_days = ledger.last_login_date.map(|last| (today - last).whole_days());

    let mut next = ledger.clone();
    next.consecutive_logins = match gap_days {
        // First-ever login, or a gap > 1 day breaking the streak. Guards
        // and current_count stay untouched either way.
        None => 1,
        Some(1) => ledger.consecutive_logins.saturating_add(1),
        Some(_) => 1,
    };

    let mut guard_awarded = false;
    if gap_days == Some(1)
        && policy.guard_award_interval != 0
        && next.consecutive_logins % policy.guard_award_interval == 0
        && next.guards < next.max_guards
    {
        next.guards += 1;
        guard_awarded = true;
    }

    next.last_login_date = Some(today);

    CheckInOutcome::Applied {
        ledger: next,
        guard_awarded,
    }
}
