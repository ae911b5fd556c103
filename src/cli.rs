use clap::{Args, Parser, Subcommand};
use llm_cost_planner::cost::{PricingTier, Strategy};
use llm_cost_planner::sweep::SweepParameter;
use llm_cost_planner::workload::CacheTtl;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cost-planner", version, about = "LLM inference cost planner")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Replacement price table (TOML)
    #[arg(long, global = true)]
    pub price_table: Option<PathBuf>,

    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Estimate per-strategy cost breakdowns for a workload
    Estimate {
        #[command(flatten)]
        workload: WorkloadArgs,

        /// Restrict to specific strategies (repeatable)
        #[arg(short, long)]
        strategy: Vec<Strategy>,
    },

    /// Sweep one parameter and find the cheapest strategy per point
    Sweep {
        /// Parameter to sweep
        parameter: SweepParameter,

        #[command(flatten)]
        workload: WorkloadArgs,

        /// Restrict to specific strategies (repeatable)
        #[arg(short, long)]
        strategy: Vec<Strategy>,
    },

    /// Summary-caching break-even analysis
    Breakeven {
        #[command(flatten)]
        workload: WorkloadArgs,
    },

    /// Show the per-turn history trace for a conversational workload
    Trace {
        #[command(flatten)]
        workload: WorkloadArgs,
    },

    /// List models in the price table
    Models,
}

/// Workload parameter overrides, applied on top of the config defaults
#[derive(Args, Debug, Clone, Default)]
pub struct WorkloadArgs {
    /// Model to price against
    #[arg(short, long)]
    pub model: Option<String>,

    /// Pricing tier (standard, priority, flex)
    #[arg(long)]
    pub tier: Option<PricingTier>,

    /// Number of independent actors
    #[arg(long)]
    pub students: Option<u64>,

    /// Turns each actor runs
    #[arg(long)]
    pub turns: Option<u64>,

    #[arg(long)]
    pub system_tokens: Option<u64>,

    #[arg(long)]
    pub context_tokens: Option<u64>,

    #[arg(long)]
    pub submission_tokens: Option<u64>,

    /// Flat instruction count, or history cap when conversational
    #[arg(long)]
    pub instruction_tokens: Option<u64>,

    #[arg(long)]
    pub output_tokens: Option<u64>,

    /// Summary size for summarization strategies
    #[arg(long)]
    pub summary_tokens: Option<u64>,

    /// History accumulates across turns
    #[arg(long)]
    pub conversational: bool,

    /// The submission grows across turns
    #[arg(long)]
    pub progressive: bool,

    /// The submission changes every turn (not deep-cacheable)
    #[arg(long)]
    pub volatile_submission: bool,

    /// Cache TTL (5min or 1hour)
    #[arg(long)]
    pub cache_ttl: Option<CacheTtl>,
}
