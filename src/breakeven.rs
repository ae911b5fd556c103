//! Summary-caching break-even analysis
//!
//! When a conversation's summary is refreshed every cycle, caching it is
//! only worth the write surcharge if enough turns reuse it before the next
//! refresh. Equating the per-cycle cost of sending the summary fresh for K
//! turns against one write plus K-1 reads of the cached prefix-plus-summary
//! gives a closed-form threshold on K.

use crate::catalog::ModelPrice;
use crate::summarize;
use crate::workload::WorkloadSpec;
use serde::Serialize;

/// Break-even verdict for caching a periodically refreshed summary
#[derive(Debug, Clone, Serialize)]
pub struct SummaryCacheBreakEven {
    /// Minimum turns per cycle at which caching wins; infinite when caching
    /// can never win at these prices
    pub threshold_turns: f64,
    /// Steady-state turns between summary refreshes for this workload
    pub turns_per_cycle: u64,
    pub viable: bool,
}

/// Closed-form break-even turn count
///
/// `prefix_tokens` is the span cached alongside the summary. A denominator
/// of zero or below means reading the cache costs at least as much as fresh
/// input, so the threshold is infinite by intent, not an error.
pub fn break_even_turns(
    prefix_tokens: u64,
    summary_tokens: u64,
    write_price: f64,
    read_price: f64,
    input_price: f64,
) -> f64 {
    let numerator = (prefix_tokens + summary_tokens) as f64 * (write_price - read_price);
    let denominator = summary_tokens as f64 * (input_price - read_price);
    if denominator <= 0.0 {
        return f64::INFINITY;
    }
    numerator / denominator
}

/// Evaluate summary-caching viability for a workload at a model's prices
pub fn evaluate(spec: &WorkloadSpec, price: &ModelPrice) -> SummaryCacheBreakEven {
    let trace = summarize::simulate(
        spec.turns_per_student,
        spec.instruction_tokens,
        spec.output_tokens,
        spec.summary_tokens,
    );

    let threshold_turns = break_even_turns(
        spec.prefix_tokens(),
        spec.summary_tokens,
        price.cache_write_price(spec.cache_ttl),
        price.effective_cache_read_price(),
        price.input_price,
    );

    SummaryCacheBreakEven {
        threshold_turns,
        turns_per_cycle: trace.turns_per_cycle,
        viable: trace.turns_per_cycle as f64 >= threshold_turns,
    }
}
