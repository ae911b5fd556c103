use crate::cli::{Cli, WorkloadArgs};
use crate::commands::{format_currency, Context};
use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use llm_cost_planner::cost::{CostMemo, Strategy};
use llm_cost_planner::sweep::{self, SweepParameter};
use tracing::info;

/// Execute the sweep command
pub fn execute(
    args: &Cli,
    parameter: SweepParameter,
    workload: &WorkloadArgs,
    strategies: &[Strategy],
) -> Result<()> {
    let ctx = Context::build(args, workload)?;
    let price = ctx.price()?;
    let tier = ctx.tier.multiplier();

    let enabled: Vec<Strategy> = if strategies.is_empty() {
        Strategy::enabled_for(&ctx.spec, price)
    } else {
        strategies.to_vec()
    };

    info!(parameter = %parameter, model = %ctx.model, "sweeping");

    let mut memo = CostMemo::new();
    let result = sweep::sweep(parameter, &ctx.spec, price, tier, &enabled, &mut memo);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let live = parameter.live_value(&ctx.spec);
    println!(
        "Cheapest strategy by {} on {} ({} tier)\n",
        parameter, ctx.model, ctx.tier.name()
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header: Vec<Cell> = vec![Cell::new(parameter.name())];
    header.extend(enabled.iter().map(|s| Cell::new(s.name())));
    header.push(Cell::new("winner"));
    table.set_header(header);

    for point in &result.points {
        let value = if point.value == live {
            format!("{} (current)", point.value)
        } else {
            point.value.to_string()
        };
        let mut row: Vec<Cell> = vec![Cell::new(value)];
        for strategy in &enabled {
            let total = point.totals.get(strategy).copied().unwrap_or(0.0);
            row.push(Cell::new(format_currency(total)));
        }
        row.push(Cell::new(point.winner.name()));
        table.add_row(row);
    }

    println!("{table}");

    if result.crossovers.is_empty() {
        println!(
            "\nNo crossovers: {} wins across the whole range.",
            result.points[0].winner.to_string().green().bold()
        );
    } else {
        println!("\nCrossovers:");
        for c in &result.crossovers {
            println!(
                "  {} >= {}: {} -> {}",
                parameter.name(),
                c.value,
                c.from,
                c.to.to_string().green().bold()
            );
        }
    }

    Ok(())
}
