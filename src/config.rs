//! Planner configuration
//!
//! Optional TOML file holding the default model, tier, and workload values
//! so repeated runs don't need the full flag set. Every field has a default;
//! a missing file is not an error.

use crate::cost::PricingTier;
use crate::error::PlannerError;
use crate::workload::{CacheTtl, WorkloadSpec};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlannerConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub tier: PricingTier,

    /// Replacement price table; the embedded one is used when absent
    #[serde(default)]
    pub price_table: Option<PathBuf>,

    #[serde(default)]
    pub workload: WorkloadDefaults,
}

fn default_model() -> String {
    "claude-sonnet-4".to_string()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            tier: PricingTier::Standard,
            price_table: None,
            workload: WorkloadDefaults::default(),
        }
    }
}

/// Workload defaults, mirroring [`WorkloadSpec`]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkloadDefaults {
    pub students: u64,
    pub turns_per_student: u64,
    pub system_tokens: u64,
    pub shared_context_tokens: u64,
    pub submission_tokens: u64,
    pub instruction_tokens: u64,
    pub output_tokens: u64,
    pub summary_tokens: u64,
    pub conversational: bool,
    pub progressive_submission: bool,
    pub submission_cacheable: bool,
    pub cache_ttl: CacheTtl,
}

impl Default for WorkloadDefaults {
    fn default() -> Self {
        let spec = WorkloadSpec::default();
        Self {
            students: spec.students,
            turns_per_student: spec.turns_per_student,
            system_tokens: spec.system_tokens,
            shared_context_tokens: spec.shared_context_tokens,
            submission_tokens: spec.submission_tokens,
            instruction_tokens: spec.instruction_tokens,
            output_tokens: spec.output_tokens,
            summary_tokens: spec.summary_tokens,
            conversational: spec.conversational,
            progressive_submission: spec.progressive_submission,
            submission_cacheable: spec.submission_cacheable,
            cache_ttl: spec.cache_ttl,
        }
    }
}

impl WorkloadDefaults {
    pub fn to_spec(&self) -> WorkloadSpec {
        WorkloadSpec {
            students: self.students,
            turns_per_student: self.turns_per_student,
            system_tokens: self.system_tokens,
            shared_context_tokens: self.shared_context_tokens,
            submission_tokens: self.submission_tokens,
            instruction_tokens: self.instruction_tokens,
            output_tokens: self.output_tokens,
            summary_tokens: self.summary_tokens,
            conversational: self.conversational,
            progressive_submission: self.progressive_submission,
            submission_cacheable: self.submission_cacheable,
            cache_ttl: self.cache_ttl,
        }
    }
}

/// Load configuration from a TOML file, or defaults when `path` is `None`
pub fn load_config(path: Option<&Path>) -> Result<PlannerConfig, PlannerError> {
    let Some(path) = path else {
        debug!("No config file given, using defaults");
        return Ok(PlannerConfig::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| {
        PlannerError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;
    let config: PlannerConfig = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.model, "claude-sonnet-4");
        assert_eq!(config.tier, PricingTier::Standard);
        assert!(config.price_table.is_none());
        assert_eq!(config.workload.to_spec(), WorkloadSpec::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let toml = r#"
            model = "gpt-4o"

            [workload]
            students = 120
            conversational = true
            instruction_tokens = 4000
        "#;
        let config: PlannerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.model, "gpt-4o");
        let spec = config.workload.to_spec();
        assert_eq!(spec.students, 120);
        assert!(spec.conversational);
        assert_eq!(spec.instruction_tokens, 4000);
        // Untouched fields keep their defaults
        assert_eq!(spec.turns_per_student, 5);
        assert_eq!(spec.cache_ttl, CacheTtl::FiveMinutes);
    }
}
