//! Observability for the auth service.
//!
//! Metrics use the `metrics` facade with a Prometheus exporter. Labels are
//! bounded enums only. Tokens, passwords and keys never appear in labels or
//! log fields.

pub mod metrics;
