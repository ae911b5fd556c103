use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use llm_cost_planner::init_tracing;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing();

    match &args.command {
        cli::Commands::Estimate { workload, strategy } => {
            commands::estimate::execute(&args, workload, strategy)?;
        }
        cli::Commands::Sweep {
            parameter,
            workload,
            strategy,
        } => {
            commands::sweep::execute(&args, *parameter, workload, strategy)?;
        }
        cli::Commands::Breakeven { workload } => {
            commands::breakeven::execute(&args, workload)?;
        }
        cli::Commands::Trace { workload } => {
            commands::trace::execute(&args, workload)?;
        }
        cli::Commands::Models => {
            commands::models::execute(&args)?;
        }
    }

    Ok(())
}
