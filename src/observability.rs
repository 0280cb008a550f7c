use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use metrics::{Unit, counter, describe_counter};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const PRICE_QUOTES_METRIC: &str = "kiraya_price_quotes_total";
pub const SURGE_APPLIED_METRIC: &str = "kiraya_surge_applied_total";
pub const PRICING_FAIL_OPEN_METRIC: &str = "kiraya_pricing_fail_open_total";
pub const CHECK_INS_METRIC: &str = "kiraya_check_ins_total";
pub const GUARDS_AWARDED_METRIC: &str = "kiraya_guards_awarded_total";
pub const LEDGER_CONFLICTS_METRIC: &str = "kiraya_ledger_conflicts_total";

const DEFAULT_METRICS_PORT: u16 = 9464;

#[derive(Debug, Clone, Copy)]
pub struct MetricsRuntime {
    pub listen_addr: SocketAddr,
}

impl MetricsRuntime {
    pub fn default_listen_addr() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_METRICS_PORT)
    }
}

pub fn start_prometheus_exporter(listen_addr: SocketAddr) -> Result<MetricsRuntime, BuildError> {
    describe_counter!(
        PRICE_QUOTES_METRIC,
        Unit::Count,
        "Price quotes served, surged or not."
    );
    describe_counter!(
        SURGE_APPLIED_METRIC,
        Unit::Count,
        "Quotes where a surge multiplier was applied."
    );
    describe_counter!(
        PRICING_FAIL_OPEN_METRIC,
        Unit::Count,
        "Quotes degraded to the base price by the fail-open policy."
    );
    describe_counter!(
        CHECK_INS_METRIC,
        Unit::Count,
        "Daily check-ins applied to a loyalty ledger."
    );
    describe_counter!(
        GUARDS_AWARDED_METRIC,
        Unit::Count,
        "Streak guards awarded by consecutive check-ins."
    );
    describe_counter!(
        LEDGER_CONFLICTS_METRIC,
        Unit::Count,
        "Ledger write conflicts observed before a retry."
    );

    PrometheusBuilder::new()
        .with_http_listener(listen_addr)
        .install()?;

    Ok(MetricsRuntime { listen_addr })
}

pub fn record_price_quote(surge_applied: bool) {
    counter!(PRICE_QUOTES_METRIC).increment(1);
    if surge_applied {
        counter!(SURGE_APPLIED_METRIC).increment(1);
    }
}

pub fn record_pricing_fail_open() {
    counter!(PRICING_FAIL_OPEN_METRIC).increment(1);
}

pub fn record_check_in(guard_awarded: bool) {
    counter!(CHECK_INS_METRIC).increment(1);
    if guard_awarded {
        counter!(GUARDS_AWARDED_METRIC).increment(1);
    }
}

pub fn record_ledger_conflict() {
    counter!(LEDGER_CONFLICTS_METRIC).increment(1);
}
