//! Checker configuration

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// What to do with a conflict set that can never be satisfied sensibly
/// (cardinality below 2, fewer than two members)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedSetPolicy {
    /// Ignore the set and log the anomaly
    #[default]
    Skip,
    /// Abort the check with a configuration error
    Reject,
}

/// Dynamic separation-of-duty settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DsdConfig {
    /// Fail the activation instead of pruning violating roles
    pub strict: bool,
}

/// Temporal constraint settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// Run date/time/day/lockout/timeout checks before DSD
    pub enabled: bool,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Conflict-set cache settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Wrap the conflict-set store in a cache
    pub enabled: bool,

    /// Entry time-to-live in seconds
    pub ttl_secs: u64,

    /// Maximum number of cached (tenant, kind, role) entries
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 60,
            max_entries: 10_000,
        }
    }
}

impl CacheConfig {
    /// Entry time-to-live
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RbacConfig {
    /// DSD behaviour
    pub dsd: DsdConfig,

    /// Malformed conflict-set handling
    pub malformed_sets: MalformedSetPolicy,

    /// Temporal checks during activation
    pub temporal: TemporalConfig,

    /// Conflict-set cache
    pub cache: CacheConfig,
}

impl RbacConfig {
    /// Parse configuration from a JSON document; missing keys use defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
