use serde::{Deserialize, Serialize};

use crate::types::RuleSetVersion;

// Multipliers are fixed-point milli-units: 1300 means x1.3. Money never
// goes through floats.
pub const MILLI_SCALE: u32 = 1_000;

pub const SCOPE_ALL: &str = "ALL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRule {
    pub id: String,
    pub district: String,
    pub mandal: String,
    pub multiplier_milli: u32,
    #[serde(default)]
    pub category: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Location {
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub mandal: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceProfile {
    pub id: String,
    #[serde(default)]
    pub category: Option<String>,
    pub surge_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub final_price: i64,
    pub surge_applied: bool,
    pub multiplier_milli: u32,
    // Set for any matched rule, including a no-op match at <= x1.0, so
    // "matched but not surged" stays distinguishable from "no match".
    #[serde(default)]
    pub matched_rule_id: Option<String>,
}

impl PriceQuote {
    pub fn base(base_price: i64) -> Self {
        Self {
            final_price: base_price,
            surge_applied: false,
            multiplier_milli: MILLI_SCALE,
            matched_rule_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub base_price: i64,
    pub resource: ResourceProfile,
    #[serde(default)]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetSnapshot {
    pub version: RuleSetVersion,
    pub rules: Vec<PricingRule>,
}
