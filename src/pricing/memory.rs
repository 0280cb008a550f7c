use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    pricing::{
        error::PricingError,
        ports::RuleStore,
        types::{PricingRule, RuleSetSnapshot},
    },
    types::RuleSetVersion,
};

// In-memory rule store for tests and embedded hosts. Every replacement of
// the rule set bumps the version so engine memoization stays coherent.
pub struct MemoryRuleStore {
    inner: RwLock<Inner>,
}

struct Inner {
    version: RuleSetVersion,
    rules: Vec<PricingRule>,
}

impl MemoryRuleStore {
    pub fn new(rules: Vec<PricingRule>) -> Self {
        Self {
            inner: RwLock::new(Inner { version: 1, rules }),
        }
    }

    pub async fn replace_rules(&self, rules: Vec<PricingRule>) -> RuleSetVersion {
        let mut inner = self.inner.write().await;
        inner.rules = rules;
        inner.version += 1;
        inner.version
    }

    pub async fn version(&self) -> RuleSetVersion {
        self.inner.read().await.version
    }
}

impl Default for MemoryRuleStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn category_visible(rule: &PricingRule, category: Option<&str>) -> bool {
    match (rule.category.as_deref(), category) {
        (None, _) => true,
        (Some(_), None) => true,
        (Some(scoped), Some(requested)) => scoped.trim().eq_ignore_ascii_case(requested.trim()),
    }
}

#[async_trait]
impl RuleStore for MemoryRuleStore {
    async fn list_active_rules(
        &self,
        category: Option<&str>,
    ) -> Result<RuleSetSnapshot, PricingError> {
        let inner = self.inner.read().await;
        let rules = inner
            .rules
            .iter()
            .filter(|rule| rule.is_active && category_visible(rule, category))
            .cloned()
            .collect();
        Ok(RuleSetSnapshot {
            version: inner.version,
            rules,
        })
    }
}
