//! Application counters exported through OpenTelemetry.

use opentelemetry::metrics::{Counter, Meter};
use opentelemetry::{global, KeyValue};

pub const METER_NAME: &str = "api.member.metrics";

#[derive(Clone)]
pub struct MemberMetrics {
    new_member: Counter<u64>,
    failed_authentication: Counter<u64>,
    login: Counter<u64>,
}

impl MemberMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            new_member: meter
                .u64_counter("new_member")
                .with_description("Number of new registered member")
                .with_unit("1")
                .build(),
            failed_authentication: meter
                .u64_counter("failed_authentication")
                .with_description("Number of rejected authentication attempts")
                .with_unit("1")
                .build(),
            login: meter
                .u64_counter("login")
                .with_description("Number of issued login identities")
                .with_unit("1")
                .build(),
        }
    }

    /// Counters on the globally installed meter provider (no-op until one is set).
    pub fn from_global() -> Self {
        Self::new(&global::meter(METER_NAME))
    }

    pub fn record_new_member(&self) {
        self.new_member.add(1, &[]);
    }

    pub fn record_failed_authentication(&self, reason: &'static str) {
        self.failed_authentication
            .add(1, &[KeyValue::new("reason", reason)]);
    }

    pub fn record_login(&self) {
        self.login.add(1, &[]);
    }
}

impl Default for MemberMetrics {
    fn default() -> Self {
        Self::from_global()
    }
}
