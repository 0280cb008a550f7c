use async_trait::async_trait;

use crate::pricing::{error::PricingError, types::RuleSetSnapshot};

// Read-only view of the externally-owned rule store. The version must
// increase whenever the active rule set changes; quote memoization is keyed
// on it.
#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn list_active_rules(
        &self,
        category: Option<&str>,
    ) -> Result<RuleSetSnapshot, PricingError>;
}
