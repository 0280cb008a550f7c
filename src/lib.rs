// Economic state engine for the Kiraya rental marketplace: surge pricing
// resolution and the supplier loyalty ledger. Transport, auth, and
// persistence live behind the module ports; this crate owns no wire format.
pub mod config;
pub mod logging;
pub mod loyalty;
pub mod observability;
pub mod pricing;
pub mod types;
