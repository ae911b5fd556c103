use crate::cli::{Cli, WorkloadArgs};
use crate::commands::Context;
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use llm_cost_planner::accumulation;
use llm_cost_planner::summarize;
use tracing::info;

/// Execute the trace command
///
/// Shows the turn-by-turn history growth and summarization events for a
/// conversational workload, plus the progressive submission ramp when
/// enabled.
pub fn execute(args: &Cli, workload: &WorkloadArgs) -> Result<()> {
    let ctx = Context::build(args, workload)?;
    let spec = &ctx.spec;

    info!(turns = spec.turns_per_student, "simulating history trace");

    let trace = summarize::simulate(
        spec.turns_per_student,
        spec.instruction_tokens,
        spec.output_tokens,
        spec.summary_tokens,
    );

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }

    println!(
        "History trace: {} turns, cap {} tokens, summary {} tokens\n",
        spec.turns_per_student, spec.instruction_tokens, spec.summary_tokens
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["Turn", "History tokens", "Event"];
    if spec.progressive_submission {
        header.insert(2, "Submission tokens");
    }
    table.set_header(header);

    for (idx, &history) in trace.history_per_turn.iter().enumerate() {
        let turn = idx as u64 + 1;
        let event = if trace.summarization_turns.contains(&turn) {
            "summarize"
        } else {
            ""
        };
        let mut row = vec![Cell::new(turn), Cell::new(history)];
        if spec.progressive_submission {
            row.push(Cell::new(accumulation::submission_at_turn(
                turn,
                spec.turns_per_student,
                spec.submission_tokens,
            )));
        }
        row.push(Cell::new(event));
        table.add_row(row);
    }

    println!("{table}");

    println!(
        "\nTotals: {} history tokens sent, {:.1} avg/turn, {} summarizations, cycle {} turns",
        trace.total_history_tokens_sent,
        trace.avg_history_per_turn,
        trace.num_summarizations,
        trace.turns_per_cycle
    );

    Ok(())
}
