//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - estimate: per-strategy cost breakdowns
//! - sweep: cheapest-strategy surface over one parameter
//! - breakeven: summary-caching break-even analysis
//! - trace: per-turn history trace
//! - models: list the price table

pub mod breakeven;
pub mod estimate;
pub mod models;
pub mod sweep;
pub mod trace;

use crate::cli::{Cli, WorkloadArgs};
use anyhow::{Context as _, Result};
use llm_cost_planner::catalog::{Catalog, ModelPrice};
use llm_cost_planner::config::{self, PlannerConfig};
use llm_cost_planner::cost::PricingTier;
use llm_cost_planner::workload::WorkloadSpec;

/// Resolved inputs shared by every command
pub struct Context {
    pub catalog: Catalog,
    pub model: String,
    pub tier: PricingTier,
    pub spec: WorkloadSpec,
    pub json: bool,
}

impl Context {
    /// Load config and price table, then apply CLI overrides
    pub fn build(args: &Cli, workload: &WorkloadArgs) -> Result<Self> {
        let cfg: PlannerConfig = config::load_config(args.config.as_deref())?;

        let price_table = args.price_table.as_deref().or(cfg.price_table.as_deref());
        let catalog = match price_table {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("loading price table {}", path.display()))?,
            None => Catalog::builtin()?,
        };

        let model = workload.model.clone().unwrap_or(cfg.model);
        let tier = workload.tier.unwrap_or(cfg.tier);

        let mut spec = cfg.workload.to_spec();
        apply_overrides(&mut spec, workload);
        spec.validate()?;

        Ok(Self {
            catalog,
            model,
            tier,
            spec,
            json: args.json,
        })
    }

    pub fn price(&self) -> Result<&ModelPrice> {
        Ok(self.catalog.require(&self.model)?)
    }
}

fn apply_overrides(spec: &mut WorkloadSpec, args: &WorkloadArgs) {
    if let Some(v) = args.students {
        spec.students = v;
    }
    if let Some(v) = args.turns {
        spec.turns_per_student = v;
    }
    if let Some(v) = args.system_tokens {
        spec.system_tokens = v;
    }
    if let Some(v) = args.context_tokens {
        spec.shared_context_tokens = v;
    }
    if let Some(v) = args.submission_tokens {
        spec.submission_tokens = v;
    }
    if let Some(v) = args.instruction_tokens {
        spec.instruction_tokens = v;
    }
    if let Some(v) = args.output_tokens {
        spec.output_tokens = v;
    }
    if let Some(v) = args.summary_tokens {
        spec.summary_tokens = v;
    }
    if args.conversational {
        spec.conversational = true;
    }
    if args.progressive {
        spec.progressive_submission = true;
    }
    if args.volatile_submission {
        spec.submission_cacheable = false;
    }
    if let Some(v) = args.cache_ttl {
        spec.cache_ttl = v;
    }
}

/// Format a currency amount for table output
pub fn format_currency(amount: f64) -> String {
    if amount == 0.0 {
        "-".to_string()
    } else if amount < 0.01 {
        format!("${:.6}", amount)
    } else {
        format!("${:.4}", amount)
    }
}
