use crate::cli::{Cli, WorkloadArgs};
use crate::commands::{format_currency, Context};
use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use llm_cost_planner::cost::{CostBreakdown, CostMemo, Strategy};
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct EstimateReport<'a> {
    model: &'a str,
    tier: &'a str,
    strategies: Vec<StrategyCost>,
}

#[derive(Serialize)]
struct StrategyCost {
    strategy: Strategy,
    breakdown: CostBreakdown,
}

/// Execute the estimate command
pub fn execute(args: &Cli, workload: &WorkloadArgs, strategies: &[Strategy]) -> Result<()> {
    let ctx = Context::build(args, workload)?;
    let price = ctx.price()?;
    let tier = ctx.tier.multiplier();

    let enabled: Vec<Strategy> = if strategies.is_empty() {
        Strategy::enabled_for(&ctx.spec, price)
    } else {
        strategies.to_vec()
    };

    info!(model = %ctx.model, strategies = enabled.len(), "estimating workload cost");

    let mut memo = CostMemo::new();
    let costs: Vec<StrategyCost> = enabled
        .iter()
        .map(|&strategy| StrategyCost {
            strategy,
            breakdown: memo.estimate(strategy, &ctx.spec, price, tier),
        })
        .collect();

    if ctx.json {
        let report = EstimateReport {
            model: &ctx.model,
            tier: ctx.tier.name(),
            strategies: costs,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let cheapest = costs
        .iter()
        .map(|c| c.breakdown.total)
        .fold(f64::INFINITY, f64::min);

    println!(
        "Cost estimate: {} requests on {} ({} tier)\n",
        ctx.spec.total_requests(),
        ctx.model,
        ctx.tier.name()
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Strategy",
            "Cache write",
            "Cache read",
            "Fresh input",
            "Output",
            "Guardrails",
            "Total",
        ]);

    for cost in &costs {
        let b = &cost.breakdown;
        let name = if b.total == cheapest {
            format!("{} *", cost.strategy)
        } else {
            cost.strategy.to_string()
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format_currency(b.cache_write)),
            Cell::new(format_currency(b.cache_read)),
            Cell::new(format_currency(b.fresh_input)),
            Cell::new(format_currency(b.output)),
            Cell::new(format_currency(b.guardrails)),
            Cell::new(format_currency(b.total)),
        ]);
    }

    println!("{table}");

    if let Some(best) = costs.iter().find(|c| c.breakdown.total == cheapest) {
        println!(
            "\nCheapest: {} at {}",
            best.strategy.to_string().green().bold(),
            format_currency(cheapest).bold()
        );
    }

    if !price.capabilities.supports_caching {
        println!(
            "{}",
            "Note: this model reports no caching support; cache costs shown as zero \
             may understate real spend."
                .yellow()
        );
    }

    Ok(())
}
