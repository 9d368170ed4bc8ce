//! Structured logging and optional OpenTelemetry export for the binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the hosting function (or the `env-vars` binary).
//!
//! # Telemetry invariants
//!
//! - **No plaintext or ciphertext** appears in any span attribute or log
//!   field; only variable names and document keys are recorded.
//! - Log level is configurable via `ENV_VARS_LOG_LEVEL` (default: `info`).

pub mod init;

pub use init::init_telemetry;
