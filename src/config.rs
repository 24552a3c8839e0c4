//! Runtime configuration for printing and image signing.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Wait this long for the surface to report ready before printing anyway.
pub const DEFAULT_READY_FALLBACK_MS: u64 = 500;
/// Delay between the print trigger and surface teardown.
pub const DEFAULT_TEARDOWN_DELAY_MS: u64 = 1000;
/// Staged receipts older than this (10 minutes) are pruned from the spool.
pub const DEFAULT_SPOOL_RETENTION_MS: u64 = 600_000;
/// Default timeout for signing requests (30 seconds).
pub const DEFAULT_SIGNING_TIMEOUT_MS: u64 = 30_000;

/// Directory name under the temp dir where spooled receipts are staged.
const SPOOL_DIR: &str = "receipts";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrintConfig {
    pub ready_fallback_ms: u64,
    pub teardown_delay_ms: u64,
    pub spool_dir: PathBuf,
    pub spool_retention_ms: u64,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            ready_fallback_ms: DEFAULT_READY_FALLBACK_MS,
            teardown_delay_ms: DEFAULT_TEARDOWN_DELAY_MS,
            spool_dir: std::env::temp_dir().join(SPOOL_DIR),
            spool_retention_ms: DEFAULT_SPOOL_RETENTION_MS,
        }
    }
}

impl PrintConfig {
    pub fn ready_fallback(&self) -> Duration {
        Duration::from_millis(self.ready_fallback_ms)
    }

    pub fn teardown_delay(&self) -> Duration {
        Duration::from_millis(self.teardown_delay_ms)
    }

    pub fn spool_retention(&self) -> Duration {
        Duration::from_millis(self.spool_retention_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignedImageConfig {
    /// Base URL of the POS API, without the `/api/...` path.
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for SignedImageConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_ms: DEFAULT_SIGNING_TIMEOUT_MS,
        }
    }
}

impl SignedImageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn print_config_defaults() {
        let config = PrintConfig::default();
        assert_eq!(config.ready_fallback(), Duration::from_millis(500));
        assert_eq!(config.teardown_delay(), Duration::from_secs(1));
        assert!(config.spool_dir.ends_with("receipts"));
        assert_eq!(config.spool_retention(), Duration::from_secs(600));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: PrintConfig =
            serde_json::from_value(json!({ "teardownDelayMs": 5000 })).expect("config");
        assert_eq!(config.teardown_delay(), Duration::from_secs(5));
        assert_eq!(config.ready_fallback_ms, DEFAULT_READY_FALLBACK_MS);

        let signing: SignedImageConfig =
            serde_json::from_value(json!({ "baseUrl": "https://pos.example" })).expect("signing");
        assert_eq!(signing.base_url, "https://pos.example");
        assert_eq!(signing.timeout(), Duration::from_secs(30));
    }
}
