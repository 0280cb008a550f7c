pub mod engine;
pub mod error;
pub mod memory;
pub mod ports;
pub mod resolver;
pub mod types;

pub use engine::PricingEngine;
pub use error::{PricingError, PricingErrorKind};
pub use memory::MemoryRuleStore;
pub use ports::RuleStore;
pub use resolver::resolve_price;
pub use types::{
    Location, MILLI_SCALE, PriceQuote, PricingRule, QuoteRequest, ResourceProfile, RuleSetSnapshot,
    SCOPE_ALL,
};
