//! Observability setup for Pressroom: structured logging via
//! `tracing-subscriber` with optional OpenTelemetry export.

pub mod tracing_setup;
