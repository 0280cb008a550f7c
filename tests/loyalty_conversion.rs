use kiraya::loyalty::{
    LoyaltyErrorKind, LoyaltyLedger, LoyaltyPolicy, apply_violation, apply_work_completion,
    invariants::assert_ledger_consistency, normalize_points,
};
use time::macros::date;

fn ledger() -> LoyaltyLedger {
    LoyaltyLedger::new("sup:1", 5)
}

#[test]
fn given_completed_work_when_applying_then_streak_grows_and_points_accrue_per_hour() {
    let policy = LoyaltyPolicy::default();

    let next = apply_work_completion(&ledger(), 10, date!(2025 - 01 - 03), &policy)
        .expect("transition should apply");

    assert_eq!(next.current_count, 1);
    assert_eq!(next.points, 50);
    assert_eq!(next.last_work_date, Some(date!(2025 - 01 - 03)));
    assert_ledger_consistency(&next, &policy).expect("post-state must satisfy invariants");
}

#[test]
fn given_points_crossing_one_hundred_when_applying_then_conversion_is_immediate() {
    let policy = LoyaltyPolicy::default();
    let mut start = ledger();
    start.points = 80;
    start.current_count = 4;

    // 5 hours = 25 points; 80 + 25 = 105 converts one unit on the spot.
    let next = apply_work_completion(&start, 5, date!(2025 - 01 - 04), &policy)
        .expect("transition should apply");

    assert_eq!(next.current_count, 6); // +1 completion, +1 conversion
    assert_eq!(next.points, 5);
    assert_ledger_consistency(&next, &policy).expect("post-state must satisfy invariants");
}

#[test]
fn given_many_accrued_units_when_applying_then_every_full_unit_converts() {
    let policy = LoyaltyPolicy::default();

    // 50 hours = 250 points = 2 units + 50 remainder.
    let next = apply_work_completion(&ledger(), 50, date!(2025 - 01 - 05), &policy)
        .expect("transition should apply");

    assert_eq!(next.current_count, 3);
    assert_eq!(next.points, 50);
}

#[test]
fn given_a_violation_when_points_would_go_negative_then_the_deficit_borrows_a_streak_unit() {
    let policy = LoyaltyPolicy::default();
    let mut start = ledger();
    start.points = 30;
    start.current_count = 3;

    let next = apply_violation(&start, &policy).expect("transition should apply");

    // 30 - 50 = -20 borrows one unit: streak 2, points 80.
    assert_eq!(next.current_count, 2);
    assert_eq!(next.points, 80);
    assert_ledger_consistency(&next, &policy).expect("post-state must satisfy invariants");
}

#[test]
fn given_a_violation_with_no_streak_left_then_the_ledger_floors_at_zero() {
    let policy = LoyaltyPolicy::default();
    let mut start = ledger();
    start.points = 30;
    start.current_count = 0;

    let next = apply_violation(&start, &policy).expect("transition should apply");

    assert_eq!(next.current_count, 0);
    assert_eq!(next.points, 0);
    assert_ledger_consistency(&next, &policy).expect("post-state must satisfy invariants");
}

#[test]
fn given_a_deep_deficit_when_normalizing_then_whole_units_borrow_until_exhaustion() {
    let policy = LoyaltyPolicy::default();
    let mut state = ledger();
    state.points = -350;
    state.current_count = 2;

    normalize_points(&mut state, &policy).expect("normalization should apply");

    // Two units absorb 200 of the deficit; the residual is dropped at the
    // all-zero floor.
    assert_eq!(state.current_count, 0);
    assert_eq!(state.points, 0);
}

#[test]
fn given_a_nonpositive_conversion_unit_when_normalizing_then_the_request_is_invalid() {
    let mut policy = LoyaltyPolicy::default();
    policy.points_per_streak_unit = 0;
    let mut state = ledger();

    let err = normalize_points(&mut state, &policy).expect_err("unit of zero must be rejected");

    assert_eq!(err.kind, LoyaltyErrorKind::InvalidRequest);
}

#[test]
fn given_any_event_sequence_when_applied_then_points_stay_normalized() {
    let policy = LoyaltyPolicy::default();
    let mut current = ledger();

    for day in 1..=9 {
        let date = date!(2025 - 02 - 01)
            .replace_day(day)
            .expect("fixture day should be valid");
        current = apply_work_completion(&current, (day as u32) * 3, date, &policy)
            .expect("transition should apply");
        assert!((0..100).contains(&current.points), "points {} left unnormalized", current.points);
    }

    for _ in 0..6 {
        current = apply_violation(&current, &policy).expect("transition should apply");
        assert!((0..100).contains(&current.points), "points {} left unnormalized", current.points);
    }
}
