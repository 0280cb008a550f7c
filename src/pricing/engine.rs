use std::{collections::BTreeMap, sync::Arc};

use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::{
    observability,
    pricing::{
        error::PricingError,
        ports::RuleStore,
        resolver::{self, NormalizedLocation},
        types::{MILLI_SCALE, PriceQuote, QuoteRequest},
    },
    types::RuleSetVersion,
};

type MatchKey = (String, String, String);

#[derive(Debug, Clone, PartialEq, Eq)]
enum MatchOutcome {
    NoMatch,
    Rule { id: String, multiplier_milli: u32 },
}

#[derive(Default)]
struct MatchCache {
    version: RuleSetVersion,
    entries: BTreeMap<MatchKey, MatchOutcome>,
}

// Service wrapper around the pure resolver: queries the rule store, memoizes
// the selected match per (district, mandal, category) under the current
// rule-set version, and emits logs/metrics. Safe for unbounded concurrent
// quoting; the memo map is the only shared state.
pub struct PricingEngine {
    store: Arc<dyn RuleStore>,
    cache: RwLock<MatchCache>,
}

impl PricingEngine {
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self {
            store,
            cache: RwLock::new(MatchCache::default()),
        }
    }

    pub async fn quote(&self, request: &QuoteRequest) -> Result<PriceQuote, PricingError> {
        if !request.resource.surge_enabled || request.base_price < 0 {
            return Ok(self.finish(request, None, PriceQuote::base(request.base_price)));
        }

        let normalized = match request.location.as_ref() {
            None => {
                return Ok(self.finish(request, None, PriceQuote::base(request.base_price)));
            }
            Some(location) => match resolver::normalize_location(location) {
                Some(normalized) => normalized,
                None => {
                    // Present but unusable location: fail open, keep the
                    // booking flow alive, leave a trace for the host.
                    observability::record_pricing_fail_open();
                    tracing::warn!(
                        target: "pricing",
                        resource_id = %request.resource.id,
                        "pricing_fail_open_malformed_location"
                    );
                    return Ok(self.finish(request, None, PriceQuote::base(request.base_price)));
                }
            },
        };

        let category = request.resource.category.as_deref();
        let snapshot = self.store.list_active_rules(category).await?;
        if snapshot.rules.is_empty() {
            return Ok(self.finish(
                request,
                Some(snapshot.version),
                PriceQuote::base(request.base_price),
            ));
        }

        let key = match_key(&normalized, category);
        let outcome = {
            let cache = self.cache.read().await;
            (cache.version == snapshot.version)
                .then(|| cache.entries.get(&key).cloned())
                .flatten()
        };
        let outcome = match outcome {
            Some(outcome) => outcome,
            None => {
                let outcome = match resolver::select_rule(
                    &request.resource,
                    &normalized,
                    &snapshot.rules,
                ) {
                    Some(rule) => MatchOutcome::Rule {
                        id: rule.id.clone(),
                        multiplier_milli: rule.multiplier_milli,
                    },
                    None => MatchOutcome::NoMatch,
                };
                let mut cache = self.cache.write().await;
                if cache.version != snapshot.version {
                    cache.entries.clear();
                    cache.version = snapshot.version;
                }
                cache.entries.insert(key, outcome.clone());
                outcome
            }
        };

        let quote = match outcome {
            MatchOutcome::NoMatch => PriceQuote::base(request.base_price),
            MatchOutcome::Rule {
                id,
                multiplier_milli,
            } => {
                let quote = resolver::quote_from_rule(request.base_price, &id, multiplier_milli);
                if multiplier_milli > MILLI_SCALE && !quote.surge_applied {
                    observability::record_pricing_fail_open();
                    tracing::warn!(
                        target: "pricing",
                        rule_id = %id,
                        base_price = request.base_price,
                        multiplier_milli,
                        "pricing_fail_open_overflow"
                    );
                }
                quote
            }
        };

        Ok(self.finish(request, Some(snapshot.version), quote))
    }

    fn finish(
        &self,
        request: &QuoteRequest,
        rule_set_version: Option<RuleSetVersion>,
        quote: PriceQuote,
    ) -> PriceQuote {
        observability::record_price_quote(quote.surge_applied);
        tracing::info!(
            target: "pricing",
            quote_id = %derive_quote_id(request, rule_set_version),
            resource_id = %request.resource.id,
            rule_set_version = rule_set_version.unwrap_or(0),
            base_price = request.base_price,
            final_price = quote.final_price,
            surge_applied = quote.surge_applied,
            multiplier_milli = quote.multiplier_milli,
            matched_rule_id = quote.matched_rule_id.as_deref().unwrap_or(""),
            "price_quote"
        );
        quote
    }
}

fn match_key(normalized: &NormalizedLocation, category: Option<&str>) -> MatchKey {
    (
        normalized.district.clone(),
        normalized.mandal.clone(),
        category.map(resolver::normalize_scope).unwrap_or_default(),
    )
}

// Deterministic id for log correlation across the quote path. serde_json
// maps are ordered, so the serialization is canonical as-is.
pub fn derive_quote_id(request: &QuoteRequest, rule_set_version: Option<RuleSetVersion>) -> String {
    let canonical = serde_json::json!({
        "resource_id": request.resource.id,
        "base_price": request.base_price,
        "location": request.location,
        "rule_set_version": rule_set_version,
    });

    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string().as_bytes());
    let digest = hasher.finalize();
    let hex = format!("{:x}", digest);
    format!("quote:{}", &hex[..24])
}
