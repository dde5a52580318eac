//! Content hash of an engine configuration.

use fairval_core::EngineConfig;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to serialize config for fingerprinting: {0}")]
pub struct FingerprintError(#[from] serde_json::Error);

/// blake3 hex digest of the config's JSON form.
///
/// Two runs with identical configs share a fingerprint, so reports can be
/// traced back to the exact thresholds that produced them.
pub fn config_fingerprint(config: &EngineConfig) -> Result<String, FingerprintError> {
    let json = serde_json::to_string(config)?;
    Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
}
