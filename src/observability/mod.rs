//! Observability subsystem.
//!
//! Structured logging goes through `tracing` directly at the call sites;
//! this module owns metric definitions and the exporter lifecycle.

pub mod metrics;
