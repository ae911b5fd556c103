use crate::catalog::ModelPrice;
use crate::workload::WorkloadSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pricing strategy for a workload
///
/// The caching strategies and batch are mutually exclusive in practice: a
/// workload runs under exactly one of these, and the engine compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Every request pays full input price
    NoCache,
    /// Asynchronous batch processing at discounted prices
    Batch,
    /// Shallow cache over the shared system + context span (Strategy A)
    PrefixCache,
    /// Deep cache extending over the per-student submission (Strategy B)
    DeepPrefixCache,
    /// Periodic history summarization, no caching
    SummarizeNoCache,
    /// Summarization with the shared prefix cached
    SummarizeCachePrefix,
    /// Summarization with the shared prefix and the summary itself cached
    SummarizeCacheSummary,
}

impl Strategy {
    pub const ALL: [Strategy; 7] = [
        Strategy::NoCache,
        Strategy::Batch,
        Strategy::PrefixCache,
        Strategy::DeepPrefixCache,
        Strategy::SummarizeNoCache,
        Strategy::SummarizeCachePrefix,
        Strategy::SummarizeCacheSummary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::NoCache => "no-cache",
            Strategy::Batch => "batch",
            Strategy::PrefixCache => "prefix-cache",
            Strategy::DeepPrefixCache => "deep-prefix-cache",
            Strategy::SummarizeNoCache => "summarize-no-cache",
            Strategy::SummarizeCachePrefix => "summarize-cache-prefix",
            Strategy::SummarizeCacheSummary => "summarize-cache-summary",
        }
    }

    /// Presentation color hint for sweep rendering
    pub fn color(&self) -> &'static str {
        match self {
            Strategy::NoCache => "#dc2626",
            Strategy::Batch => "#9333ea",
            Strategy::PrefixCache => "#16a34a",
            Strategy::DeepPrefixCache => "#0d9488",
            Strategy::SummarizeNoCache => "#d97706",
            Strategy::SummarizeCachePrefix => "#2563eb",
            Strategy::SummarizeCacheSummary => "#0891b2",
        }
    }

    /// Fixed tie-break order for winner determination
    ///
    /// At equal cost the caching strategies win over batch, and batch over
    /// paying full price. Lower rank wins.
    pub fn tie_break_rank(&self) -> u8 {
        match self {
            Strategy::PrefixCache => 0,
            Strategy::SummarizeCacheSummary => 1,
            Strategy::SummarizeCachePrefix => 2,
            Strategy::DeepPrefixCache => 3,
            Strategy::Batch => 4,
            Strategy::SummarizeNoCache => 5,
            Strategy::NoCache => 6,
        }
    }

    /// Whether the strategy is meaningful for a workload
    ///
    /// Summarization only applies to conversational workloads. Caching and
    /// batch strategies stay comparable even when the model lacks the
    /// feature, since missing prices degrade to zero-cost contributions.
    pub fn applicable(&self, spec: &WorkloadSpec, _price: &ModelPrice) -> bool {
        match self {
            Strategy::SummarizeNoCache
            | Strategy::SummarizeCachePrefix
            | Strategy::SummarizeCacheSummary => {
                spec.conversational && spec.summary_tokens < spec.instruction_tokens
            }
            _ => true,
        }
    }

    /// Strategies meaningful for a workload, in declaration order
    pub fn enabled_for(spec: &WorkloadSpec, price: &ModelPrice) -> Vec<Strategy> {
        Self::ALL
            .iter()
            .copied()
            .filter(|s| s.applicable(spec, price))
            .collect()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name() == s)
            .ok_or_else(|| format!("unknown strategy: {}", s))
    }
}

/// Price tier applied to base input/output prices
///
/// Models provider priority/flex processing tiers as a scalar on the
/// standard prices. Cache write/read prices are not scaled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingTier {
    #[default]
    Standard,
    Priority,
    Flex,
}

impl PricingTier {
    pub fn multiplier(&self) -> f64 {
        match self {
            PricingTier::Standard => 1.0,
            PricingTier::Priority => 2.0,
            PricingTier::Flex => 0.5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PricingTier::Standard => "standard",
            PricingTier::Priority => "priority",
            PricingTier::Flex => "flex",
        }
    }
}

impl FromStr for PricingTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(PricingTier::Standard),
            "priority" => Ok(PricingTier::Priority),
            "flex" => Ok(PricingTier::Flex),
            other => Err(format!("unknown pricing tier: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
        assert!("turbo-cache".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_tie_break_ranks_are_distinct() {
        let mut ranks: Vec<u8> = Strategy::ALL.iter().map(|s| s.tie_break_rank()).collect();
        ranks.sort_unstable();
        ranks.dedup();
        assert_eq!(ranks.len(), Strategy::ALL.len());
    }

    #[test]
    fn test_summarization_requires_conversational() {
        let catalog = crate::catalog::Catalog::builtin().unwrap();
        let price = catalog.get("claude-sonnet-4").unwrap();

        let spec = WorkloadSpec::default();
        assert!(!Strategy::SummarizeNoCache.applicable(&spec, price));

        let spec = WorkloadSpec {
            conversational: true,
            instruction_tokens: 4000,
            summary_tokens: 500,
            ..WorkloadSpec::default()
        };
        assert!(Strategy::SummarizeNoCache.applicable(&spec, price));
        assert_eq!(Strategy::enabled_for(&spec, price).len(), 7);
    }
}
