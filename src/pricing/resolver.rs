use crate::pricing::types::{
    Location, MILLI_SCALE, PriceQuote, PricingRule, ResourceProfile, SCOPE_ALL,
};

// The resolver is fail-open by contract: malformed inputs and arithmetic
// overflow degrade to the base-price quote, never to an error. Pricing must
// not be able to fail a booking flow.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NormalizedLocation {
    pub district: String,
    pub mandal: String,
}

pub(crate) fn normalize_scope(value: &str) -> String {
    value.trim().to_lowercase()
}

// mandal falls back to city: the two occupy the same positional slot for
// matching purposes.
pub(crate) fn normalize_location(location: &Location) -> Option<NormalizedLocation> {
    let district = location
        .district
        .as_deref()
        .map(|value| normalize_scope(value))
        .filter(|value| !value.is_empty())?;
    let mandal = location
        .mandal
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .or(location.city.as_deref())
        .map(|value| normalize_scope(value))
        .filter(|value| !value.is_empty())?;
    Some(NormalizedLocation { district, mandal })
}

fn category_satisfied(rule: &PricingRule, resource: &ResourceProfile) -> bool {
    match rule.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        None => true,
        Some(rule_category) => resource
            .category
            .as_deref()
            .map(|candidate| candidate.trim().eq_ignore_ascii_case(rule_category))
            .unwrap_or(false),
    }
}

fn scope_is_all(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(SCOPE_ALL)
}

pub(crate) fn select_rule<'a>(
    resource: &ResourceProfile,
    location: &NormalizedLocation,
    rules: &'a [PricingRule],
) -> Option<&'a PricingRule> {
    let active = |rule: &&PricingRule| rule.is_active && category_satisfied(rule, resource);

    // Three sequential tier passes with early return; within a tier the
    // first qualifying rule in iteration order wins.
    rules
        .iter()
        .filter(active)
        .find(|rule| {
            normalize_scope(&rule.district) == location.district
                && normalize_scope(&rule.mandal) == location.mandal
        })
        .or_else(|| {
            rules.iter().filter(active).find(|rule| {
                normalize_scope(&rule.district) == location.district
                    && scope_is_all(&rule.mandal)
            })
        })
        .or_else(|| {
            rules
                .iter()
                .filter(active)
                .find(|rule| scope_is_all(&rule.district) && scope_is_all(&rule.mandal))
        })
}

// Round-half-up on the milli fixed-point product.
pub(crate) fn scale_price(base_price: i64, multiplier_milli: u32) -> Option<i64> {
    let product = (base_price as i128).checked_mul(multiplier_milli as i128)?;
    let adjusted = product.checked_add((MILLI_SCALE / 2) as i128)?;
    i64::try_from(adjusted.div_euclid(MILLI_SCALE as i128)).ok()
}

// Quote assembly for a selected rule. A matched rule at <= x1.0 is a
// no-op, distinct from no match: base price, no surge flag, effective
// multiplier x1.0, rule id retained. Overflow degrades to the plain base
// quote.
pub(crate) fn quote_from_rule(base_price: i64, rule_id: &str, multiplier_milli: u32) -> PriceQuote {
    if multiplier_milli <= MILLI_SCALE {
        return PriceQuote {
            matched_rule_id: Some(rule_id.to_string()),
            ..PriceQuote::base(base_price)
        };
    }

    match scale_price(base_price, multiplier_milli) {
        Some(final_price) => PriceQuote {
            final_price,
            surge_applied: true,
            multiplier_milli,
            matched_rule_id: Some(rule_id.to_string()),
        },
        None => PriceQuote::base(base_price),
    }
}

pub fn resolve_price(
    base_price: i64,
    resource: &ResourceProfile,
    location: Option<&Location>,
    rules: &[PricingRule],
) -> PriceQuote {
    if !resource.surge_enabled || rules.is_empty() || base_price < 0 {
        return PriceQuote::base(base_price);
    }
    let Some(normalized) = location.and_then(normalize_location) else {
        return PriceQuote::base(base_price);
    };
    let Some(rule) = select_rule(resource, &normalized, rules) else {
        return PriceQuote::base(base_price);
    };

    quote_from_rule(base_price, &rule.id, rule.multiplier_milli)
}
