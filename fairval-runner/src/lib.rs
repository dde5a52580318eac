//! FairVal Runner: batch evaluation on top of `fairval-core`.
//!
//! This crate provides:
//! - `StockCase` inputs and JSON/TOML loading helpers
//! - `BatchRunner`, which evaluates many stocks independently (rayon)
//! - Deterministic config fingerprints for result provenance
//! - Tracing subscriber setup for binaries and tools

pub mod batch;
pub mod case;
pub mod fingerprint;
pub mod logging;

pub use batch::{BatchReport, BatchRunner, BatchSummary, CaseOutcome, Outcome, SCHEMA_VERSION};
pub use case::{load_cases, load_config, StockCase};
pub use fingerprint::{config_fingerprint, FingerprintError};
pub use logging::init_tracing;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: batch types cross thread boundaries.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<StockCase>();
        require_sync::<StockCase>();
        require_send::<BatchRunner>();
        require_sync::<BatchRunner>();
        require_send::<BatchReport>();
        require_sync::<BatchReport>();
    }
}
