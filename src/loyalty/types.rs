use serde::{Deserialize, Serialize};
use time::Date;

use crate::types::ParticipantId;

// The permanent economic record of a supplier. Created lazily, never
// deleted. `current_count` belongs to the work-completion contract;
// check-ins only gate guard accrual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyLedger {
    pub participant_id: ParticipantId,
    pub current_count: u32,
    #[serde(default)]
    pub last_login_date: Option<Date>,
    #[serde(default)]
    pub last_work_date: Option<Date>,
    pub guards: u8,
    pub max_guards: u8,
    pub points: i64,
    pub consecutive_logins: u32,
}

impl LoyaltyLedger {
    pub fn new(participant_id: impl Into<ParticipantId>, max_guards: u8) -> Self {
        Self {
            participant_id: participant_id.into(),
            current_count: 0,
            last_login_date: None,
            last_work_date: None,
            guards: 0,
            max_guards,
            points: 0,
            consecutive_logins: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedLedger {
    pub version: u64,
    pub ledger: LoyaltyLedger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoChangeReason {
    NotSupplier,
    AlreadyCheckedIn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckInOutcome {
    Applied {
        ledger: LoyaltyLedger,
        guard_awarded: bool,
    },
    NoChange {
        reason: NoChangeReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Cancellation,
    LateArrival,
    Dispute,
}

// Inbound contract of the external work-completion producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkEvent {
    WorkCompleted {
        participant_id: ParticipantId,
        hours_worked: u32,
        work_date: Date,
    },
    ViolationReported {
        participant_id: ParticipantId,
        kind: ViolationKind,
        reported_on: Date,
    },
}

impl WorkEvent {
    pub fn participant_id(&self) -> &str {
        match self {
            WorkEvent::WorkCompleted { participant_id, .. } => participant_id,
            WorkEvent::ViolationReported { participant_id, .. } => participant_id,
        }
    }
}
