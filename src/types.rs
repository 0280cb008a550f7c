use serde::{Deserialize, Serialize};

pub type ParticipantId = String;
pub type RuleSetVersion = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Supplier,
    Buyer,
}

impl Role {
    pub fn is_supplier(&self) -> bool {
        matches!(self, Role::Supplier)
    }
}
