use kiraya::pricing::{Location, PricingRule, ResourceProfile, resolve_price};

fn rule(id: &str, district: &str, mandal: &str, multiplier_milli: u32) -> PricingRule {
    PricingRule {
        id: id.to_string(),
        district: district.to_string(),
        mandal: mandal.to_string(),
        multiplier_milli,
        category: None,
        is_active: true,
    }
}

fn surge_resource() -> ResourceProfile {
    ResourceProfile {
        id: "res:tractor-1".to_string(),
        category: Some("tractor".to_string()),
        surge_enabled: true,
    }
}

fn husnabad() -> Location {
    Location {
        district: Some("Siddipet".to_string()),
        mandal: Some("Husnabad".to_string()),
        city: None,
    }
}

#[test]
fn given_mandal_and_global_rules_when_resolving_then_mandal_tier_wins() {
    let rules = vec![
        rule("r:global", "ALL", "ALL", 1_100),
        rule("r:mandal", "Siddipet", "Husnabad", 1_300),
    ];

    let quote = resolve_price(1_000, &surge_resource(), Some(&husnabad()), &rules);

    assert_eq!(quote.final_price, 1_300);
    assert!(quote.surge_applied);
    assert_eq!(quote.multiplier_milli, 1_300);
    assert_eq!(quote.matched_rule_id.as_deref(), Some("r:mandal"));
}

#[test]
fn given_district_and_global_rules_when_resolving_then_district_tier_wins_regardless_of_order() {
    let rules = vec![
        rule("r:global", "ALL", "ALL", 1_500),
        rule("r:district", "Siddipet", "ALL", 1_200),
    ];

    let quote = resolve_price(1_000, &surge_resource(), Some(&husnabad()), &rules);

    assert_eq!(quote.final_price, 1_200);
    assert_eq!(quote.matched_rule_id.as_deref(), Some("r:district"));
}

#[test]
fn given_surge_disabled_resource_when_resolving_then_base_price_unconditionally() {
    let resource = ResourceProfile {
        surge_enabled: false,
        ..surge_resource()
    };
    let rules = vec![rule("r:mandal", "Siddipet", "Husnabad", 1_300)];

    let quote = resolve_price(1_000, &resource, Some(&husnabad()), &rules);

    assert_eq!(quote.final_price, 1_000);
    assert!(!quote.surge_applied);
    assert_eq!(quote.multiplier_milli, 1_000);
    assert_eq!(quote.matched_rule_id, None);
}

#[test]
fn given_absent_location_or_empty_rules_when_resolving_then_base_price() {
    let rules = vec![rule("r:global", "ALL", "ALL", 1_300)];

    let no_location = resolve_price(1_000, &surge_resource(), None, &rules);
    assert_eq!(no_location.final_price, 1_000);
    assert!(!no_location.surge_applied);

    let no_rules = resolve_price(1_000, &surge_resource(), Some(&husnabad()), &[]);
    assert_eq!(no_rules.final_price, 1_000);
    assert!(!no_rules.surge_applied);
}

#[test]
fn given_matched_rule_at_or_below_one_when_resolving_then_no_op_but_distinct_from_no_match() {
    let rules = vec![rule("r:discount", "Siddipet", "Husnabad", 900)];

    let quote = resolve_price(1_000, &surge_resource(), Some(&husnabad()), &rules);

    assert_eq!(quote.final_price, 1_000);
    assert!(!quote.surge_applied);
    assert_eq!(quote.multiplier_milli, 1_000);
    assert_eq!(quote.matched_rule_id.as_deref(), Some("r:discount"));
}

#[test]
fn given_mixed_case_and_padding_when_resolving_then_matching_is_case_insensitive() {
    let rules = vec![rule("r:mandal", "  sIdDiPeT ", "HUSNABAD", 1_250)];
    let location = Location {
        district: Some("siddipet".to_string()),
        mandal: Some("  husnabad ".to_string()),
        city: None,
    };

    let quote = resolve_price(1_000, &surge_resource(), Some(&location), &rules);

    assert_eq!(quote.final_price, 1_250);
    assert!(quote.surge_applied);
}

#[test]
fn given_no_mandal_when_resolving_then_city_fills_the_mandal_slot() {
    let rules = vec![rule("r:mandal", "Siddipet", "Husnabad", 1_300)];
    let location = Location {
        district: Some("Siddipet".to_string()),
        mandal: None,
        city: Some("Husnabad".to_string()),
    };

    let quote = resolve_price(1_000, &surge_resource(), Some(&location), &rules);

    assert!(quote.surge_applied);
    assert_eq!(quote.final_price, 1_300);
}

#[test]
fn given_category_mismatch_at_mandal_tier_when_resolving_then_lower_tier_matches() {
    let mut scoped = rule("r:mandal-crane", "Siddipet", "Husnabad", 1_500);
    scoped.category = Some("crane".to_string());
    let rules = vec![scoped, rule("r:district", "Siddipet", "ALL", 1_100)];

    let quote = resolve_price(1_000, &surge_resource(), Some(&husnabad()), &rules);

    assert_eq!(quote.matched_rule_id.as_deref(), Some("r:district"));
    assert_eq!(quote.final_price, 1_100);
}

#[test]
fn given_half_rupee_product_when_resolving_then_rounding_is_half_up() {
    // 50 x 1.01 = 50.5 rounds up to 51.
    let rules = vec![rule("r:global", "ALL", "ALL", 1_010)];
    let quote = resolve_price(50, &surge_resource(), Some(&husnabad()), &rules);
    assert_eq!(quote.final_price, 51);

    // 999 x 1.001 = 999.999 rounds to 1000.
    let rules = vec![rule("r:global", "ALL", "ALL", 1_001)];
    let quote = resolve_price(999, &surge_resource(), Some(&husnabad()), &rules);
    assert_eq!(quote.final_price, 1_000);
}

#[test]
fn given_overflowing_product_when_resolving_then_fail_open_to_base_price() {
    let rules = vec![rule("r:global", "ALL", "ALL", 2_000)];

    let quote = resolve_price(i64::MAX, &surge_resource(), Some(&husnabad()), &rules);

    assert_eq!(quote.final_price, i64::MAX);
    assert!(!quote.surge_applied);
}
