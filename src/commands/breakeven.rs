use crate::cli::{Cli, WorkloadArgs};
use crate::commands::Context;
use anyhow::Result;
use colored::Colorize;
use llm_cost_planner::breakeven;
use tracing::info;

/// Execute the breakeven command
pub fn execute(args: &Cli, workload: &WorkloadArgs) -> Result<()> {
    let ctx = Context::build(args, workload)?;
    let price = ctx.price()?;

    info!(model = %ctx.model, "evaluating summary-cache break-even");

    let verdict = breakeven::evaluate(&ctx.spec, price);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
        return Ok(());
    }

    println!("Summary-cache break-even for {}\n", ctx.model);
    println!(
        "  Cached span:        {} prefix + {} summary tokens",
        ctx.spec.prefix_tokens(),
        ctx.spec.summary_tokens
    );
    if verdict.threshold_turns.is_infinite() {
        println!("  Break-even turns:   never (cache reads cost at least as much as fresh input)");
    } else {
        println!("  Break-even turns:   {:.1}", verdict.threshold_turns);
    }
    println!("  Turns per cycle:    {}", verdict.turns_per_cycle);

    let verdict_label = if verdict.viable {
        "VIABLE".green().bold()
    } else {
        "NOT VIABLE".red().bold()
    };
    println!("\nCaching the summary is {verdict_label} at this cycle length.");

    Ok(())
}
