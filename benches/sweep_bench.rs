use criterion::{black_box, criterion_group, criterion_main, Criterion};
use llm_cost_planner::catalog::Catalog;
use llm_cost_planner::cost::{estimate, CostMemo, Strategy};
use llm_cost_planner::sweep::{self, SweepParameter};
use llm_cost_planner::workload::WorkloadSpec;

fn bench_estimate(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let price = catalog.get("claude-sonnet-4").unwrap();
    let spec = WorkloadSpec {
        conversational: true,
        turns_per_student: 50,
        instruction_tokens: 8000,
        summary_tokens: 500,
        ..WorkloadSpec::default()
    };

    c.bench_function("estimate_summarize_cache_summary", |b| {
        b.iter(|| {
            estimate(
                Strategy::SummarizeCacheSummary,
                black_box(&spec),
                price,
                1.0,
            )
        })
    });
}

fn bench_sweep(c: &mut Criterion) {
    let catalog = Catalog::builtin().unwrap();
    let price = catalog.get("claude-sonnet-4").unwrap();
    let spec = WorkloadSpec {
        conversational: true,
        instruction_tokens: 4000,
        summary_tokens: 500,
        ..WorkloadSpec::default()
    };
    let strategies = Strategy::enabled_for(&spec, price);

    c.bench_function("sweep_students_all_strategies", |b| {
        b.iter(|| {
            let mut memo = CostMemo::new();
            sweep::sweep(
                SweepParameter::Students,
                black_box(&spec),
                price,
                1.0,
                &strategies,
                &mut memo,
            )
        })
    });
}

criterion_group!(benches, bench_estimate, bench_sweep);
criterion_main!(benches);
