//! Closed-form cost formulas
//!
//! One dispatch function turns a (strategy, workload, price) triple into an
//! itemized [`CostBreakdown`]. Pure functions of their inputs: no I/O, no
//! shared state. All prices are per 1,000 tokens; missing prices for
//! features a workload does not use contribute zero.

use crate::catalog::ModelPrice;
use crate::cost::breakdown::CostBreakdown;
use crate::cost::strategy::Strategy;
use crate::summarize::{self, SummarizationTrace};
use crate::workload::WorkloadSpec;

/// Prices are quoted per this many tokens
pub const TOKENS_PER_PRICE_UNIT: f64 = 1000.0;

fn per_unit(tokens: f64) -> f64 {
    tokens / TOKENS_PER_PRICE_UNIT
}

/// Compute the cost of running `spec` under `strategy` at `price`
///
/// `tier` scales the base input/output prices (including the batch
/// substitutes) to model priority/flex processing; cache write/read prices
/// are not scaled.
pub fn estimate(
    strategy: Strategy,
    spec: &WorkloadSpec,
    price: &ModelPrice,
    tier: f64,
) -> CostBreakdown {
    let mut breakdown = match strategy {
        Strategy::NoCache => no_cache(spec, price, tier),
        Strategy::Batch => batch(spec, price, tier),
        Strategy::PrefixCache => prefix_cache(spec, price, tier),
        Strategy::DeepPrefixCache => deep_prefix_cache(spec, price, tier),
        Strategy::SummarizeNoCache => summarize_no_cache(spec, price, tier),
        Strategy::SummarizeCachePrefix => summarize_cache_prefix(spec, price, tier),
        Strategy::SummarizeCacheSummary => summarize_cache_summary(spec, price, tier),
    };
    breakdown.calculate_total();
    breakdown
}

fn output_cost(spec: &WorkloadSpec, output_price: f64, tier: f64) -> f64 {
    spec.total_requests() as f64 * per_unit(spec.output_tokens as f64) * output_price * tier
}

fn no_cache(spec: &WorkloadSpec, price: &ModelPrice, tier: f64) -> CostBreakdown {
    let requests = spec.total_requests() as f64;
    let request_tokens = spec.prefix_tokens() as f64
        + spec.effective_submission_tokens()
        + spec.effective_instruction_tokens();

    CostBreakdown {
        fresh_input: requests * per_unit(request_tokens) * price.input_price * tier,
        output: output_cost(spec, price.output_price, tier),
        ..Default::default()
    }
}

fn batch(spec: &WorkloadSpec, price: &ModelPrice, tier: f64) -> CostBreakdown {
    let requests = spec.total_requests() as f64;
    let request_tokens = spec.prefix_tokens() as f64
        + spec.effective_submission_tokens()
        + spec.effective_instruction_tokens();

    CostBreakdown {
        fresh_input: requests * per_unit(request_tokens) * price.effective_batch_input_price() * tier,
        output: output_cost(spec, price.effective_batch_output_price(), tier),
        ..Default::default()
    }
}

/// Strategy A: cache the shared system + context span once, read it on every
/// later request
fn prefix_cache(spec: &WorkloadSpec, price: &ModelPrice, tier: f64) -> CostBreakdown {
    let requests = spec.total_requests() as f64;
    let prefix = per_unit(spec.prefix_tokens() as f64);
    let per_request_fresh =
        spec.effective_submission_tokens() + spec.effective_instruction_tokens();

    CostBreakdown {
        cache_write: prefix * price.cache_write_price(spec.cache_ttl),
        cache_read: (requests - 1.0).max(0.0) * prefix * price.effective_cache_read_price(),
        fresh_input: requests * per_unit(per_request_fresh) * price.input_price * tier,
        output: output_cost(spec, price.output_price, tier),
        ..Default::default()
    }
}

/// Strategy B: extend the cache over the per-student submission
///
/// Prefix caching is strictly prefix-based: when the submission changes on
/// every turn, every segment after the shared span must be re-written, so
/// the unstable branch writes the submission span on each request while the
/// shared span in front of it stays cached.
fn deep_prefix_cache(spec: &WorkloadSpec, price: &ModelPrice, tier: f64) -> CostBreakdown {
    let requests = spec.total_requests() as f64;
    let students = spec.students as f64;
    let turns = spec.turns_per_student as f64;
    let write_price = price.cache_write_price(spec.cache_ttl);
    let read_price = price.effective_cache_read_price();

    let (cache_write, cache_read) = if spec.submission_cacheable {
        // Stable submission: one write per student over the full span, reads
        // on that student's remaining turns.
        let span = per_unit((spec.prefix_tokens() + spec.submission_tokens) as f64);
        (
            students * span * write_price,
            students * (turns - 1.0).max(0.0) * span * read_price,
        )
    } else {
        // Submission changes every turn: shared span cached once, the
        // submission span re-written on every request.
        let prefix = per_unit(spec.prefix_tokens() as f64);
        let submission = per_unit(spec.effective_submission_tokens());
        (
            prefix * write_price + requests * submission * write_price,
            (requests - 1.0).max(0.0) * prefix * read_price,
        )
    };

    CostBreakdown {
        cache_write,
        cache_read,
        fresh_input: requests
            * per_unit(spec.effective_instruction_tokens())
            * price.input_price
            * tier,
        output: output_cost(spec, price.output_price, tier),
        ..Default::default()
    }
}

fn run_trace(spec: &WorkloadSpec) -> SummarizationTrace {
    summarize::simulate(
        spec.turns_per_student,
        spec.instruction_tokens,
        spec.output_tokens,
        spec.summary_tokens,
    )
}

/// Cost of the summarization calls themselves: each event sends the system
/// prompt plus a cap-sized history and produces a summary, per student.
fn summarization_calls_cost(
    spec: &WorkloadSpec,
    trace: &SummarizationTrace,
    price: &ModelPrice,
    tier: f64,
) -> f64 {
    let calls = (spec.students * trace.num_summarizations) as f64;
    let call_input = per_unit((spec.system_tokens + spec.instruction_tokens) as f64);
    let call_output = per_unit(spec.summary_tokens as f64);

    calls * (call_input * price.input_price + call_output * price.output_price) * tier
}

fn summarize_no_cache(spec: &WorkloadSpec, price: &ModelPrice, tier: f64) -> CostBreakdown {
    let trace = run_trace(spec);
    let requests = spec.total_requests() as f64;
    let students = spec.students as f64;

    let static_tokens = spec.prefix_tokens() as f64 + spec.effective_submission_tokens();
    let fresh_tokens =
        requests * static_tokens + students * trace.total_history_tokens_sent as f64;

    CostBreakdown {
        fresh_input: per_unit(fresh_tokens) * price.input_price * tier,
        output: output_cost(spec, price.output_price, tier),
        guardrails: summarization_calls_cost(spec, &trace, price, tier),
        ..Default::default()
    }
}

fn summarize_cache_prefix(spec: &WorkloadSpec, price: &ModelPrice, tier: f64) -> CostBreakdown {
    let trace = run_trace(spec);
    let requests = spec.total_requests() as f64;
    let students = spec.students as f64;
    let prefix = per_unit(spec.prefix_tokens() as f64);

    let fresh_tokens = requests * spec.effective_submission_tokens()
        + students * trace.total_history_tokens_sent as f64;

    CostBreakdown {
        cache_write: prefix * price.cache_write_price(spec.cache_ttl),
        cache_read: (requests - 1.0).max(0.0) * prefix * price.effective_cache_read_price(),
        fresh_input: per_unit(fresh_tokens) * price.input_price * tier,
        output: output_cost(spec, price.output_price, tier),
        guardrails: summarization_calls_cost(spec, &trace, price, tier),
        ..Default::default()
    }
}

/// Summarization with the summary folded into the cached prefix
///
/// The per-student accounting treats the shared span as written once per
/// student; across students the shared span is common, so a correction
/// converts `students - 1` of those writes into reads. In aggregate the
/// shared span is written once and read `total_requests - 1` times, matching
/// Strategy A's accounting for that sub-span. The summary segment is
/// per-student and carries no correction.
fn summarize_cache_summary(spec: &WorkloadSpec, price: &ModelPrice, tier: f64) -> CostBreakdown {
    let trace = run_trace(spec);
    let acc = summarize::cache_accounting(&trace, spec.summary_tokens);

    let students = spec.students as f64;
    let requests = spec.total_requests() as f64;
    let prefix = per_unit(spec.prefix_tokens() as f64);
    let summary = per_unit(spec.summary_tokens as f64);
    let write_price = price.cache_write_price(spec.cache_ttl);
    let read_price = price.effective_cache_read_price();

    let correction = if acc.shared_writes > 0 {
        students - 1.0
    } else {
        0.0
    };
    let shared_writes = students * acc.shared_writes as f64 - correction;
    let shared_reads = students * acc.shared_reads as f64 + correction;

    let cache_write = shared_writes * prefix * write_price
        + students * acc.summary_writes as f64 * summary * write_price;
    let cache_read = shared_reads * prefix * read_price
        + students * acc.summary_reads as f64 * summary * read_price;

    let fresh_tokens = requests * spec.effective_submission_tokens()
        + students * acc.fresh_history_tokens as f64;

    CostBreakdown {
        cache_write,
        cache_read,
        fresh_input: per_unit(fresh_tokens) * price.input_price * tier,
        output: output_cost(spec, price.output_price, tier),
        guardrails: summarization_calls_cost(spec, &trace, price, tier),
        ..Default::default()
    }
}
