use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingErrorKind {
    StoreUnavailable,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingError {
    pub kind: PricingErrorKind,
    pub message: String,
}

impl PricingError {
    pub fn new(kind: PricingErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PricingError {}

pub fn store_unavailable(message: impl Into<String>) -> PricingError {
    PricingError::new(PricingErrorKind::StoreUnavailable, message)
}

pub fn internal_error(message: impl Into<String>) -> PricingError {
    PricingError::new(PricingErrorKind::Internal, message)
}
