//! Explicit cost memoization
//!
//! A sweep evaluates the same (strategy, workload, price) triples many times
//! as the user moves between parameters. Instead of ad-hoc module-level
//! caches, results are keyed by every input that affects them; a changed
//! input is a different key, so no invalidation hook is needed beyond
//! [`CostMemo::clear`] when a price table is reloaded.

use crate::catalog::ModelPrice;
use crate::cost::breakdown::CostBreakdown;
use crate::cost::formulas;
use crate::cost::strategy::Strategy;
use crate::workload::WorkloadSpec;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MemoKey {
    strategy: Strategy,
    spec: WorkloadSpec,
    /// Catalog entry identity: model name plus effective date
    price_identity: (String, String),
    /// Tier multiplier, bit-exact
    tier_bits: u64,
}

/// Memoized front-end to [`formulas::estimate`]
#[derive(Debug, Default)]
pub struct CostMemo {
    entries: HashMap<MemoKey, CostBreakdown>,
}

impl CostMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute or recall the cost of a (strategy, workload, price) triple
    pub fn estimate(
        &mut self,
        strategy: Strategy,
        spec: &WorkloadSpec,
        price: &ModelPrice,
        tier: f64,
    ) -> CostBreakdown {
        let key = MemoKey {
            strategy,
            spec: spec.clone(),
            price_identity: price.identity(),
            tier_bits: tier.to_bits(),
        };
        self.entries
            .entry(key)
            .or_insert_with(|| formulas::estimate(strategy, spec, price, tier))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all memoized results, e.g. after swapping the price table
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_memo_matches_direct_evaluation() {
        let catalog = Catalog::builtin().unwrap();
        let price = catalog.get("claude-sonnet-4").unwrap();
        let spec = WorkloadSpec::default();
        let mut memo = CostMemo::new();

        for strategy in [Strategy::NoCache, Strategy::PrefixCache, Strategy::Batch] {
            let memoized = memo.estimate(strategy, &spec, price, 1.0);
            let direct = formulas::estimate(strategy, &spec, price, 1.0);
            assert_eq!(memoized, direct);
        }
        assert_eq!(memo.len(), 3);

        // Second pass hits the cache without growing it.
        memo.estimate(Strategy::NoCache, &spec, price, 1.0);
        assert_eq!(memo.len(), 3);
    }

    #[test]
    fn test_changed_inputs_are_new_keys() {
        let catalog = Catalog::builtin().unwrap();
        let price = catalog.get("claude-sonnet-4").unwrap();
        let spec = WorkloadSpec::default();
        let mut memo = CostMemo::new();

        memo.estimate(Strategy::NoCache, &spec, price, 1.0);
        memo.estimate(Strategy::NoCache, &spec, price, 2.0);
        let other_spec = WorkloadSpec {
            students: 31,
            ..spec.clone()
        };
        memo.estimate(Strategy::NoCache, &other_spec, price, 1.0);
        assert_eq!(memo.len(), 3);

        memo.clear();
        assert!(memo.is_empty());
    }
}
