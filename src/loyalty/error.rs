use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoyaltyErrorKind {
    InvalidRequest,
    InvariantViolation,
    LedgerConflict,
    Arithmetic,
    StoreUnavailable,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyError {
    pub kind: LoyaltyErrorKind,
    pub message: String,
}

impl LoyaltyError {
    pub fn new(kind: LoyaltyErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for LoyaltyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LoyaltyError {}

pub fn invalid_request(message: impl Into<String>) -> LoyaltyError {
    LoyaltyError::new(LoyaltyErrorKind::InvalidRequest, message)
}

pub fn invariant_violation(message: impl Into<String>) -> LoyaltyError {
    LoyaltyError::new(LoyaltyErrorKind::InvariantViolation, message)
}

pub fn ledger_conflict(message: impl Into<String>) -> LoyaltyError {
    LoyaltyError::new(LoyaltyErrorKind::LedgerConflict, message)
}

pub fn arithmetic_error(message: impl Into<String>) -> LoyaltyError {
    LoyaltyError::new(LoyaltyErrorKind::Arithmetic, message)
}

pub fn store_unavailable(message: impl Into<String>) -> LoyaltyError {
    LoyaltyError::new(LoyaltyErrorKind::StoreUnavailable, message)
}

pub fn internal_error(message: impl Into<String>) -> LoyaltyError {
    LoyaltyError::new(LoyaltyErrorKind::Internal, message)
}
