use crate::cli::Cli;
use crate::commands::Context;
use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// Execute the models command: list the price table
pub fn execute(args: &Cli) -> Result<()> {
    let ctx = Context::build(args, &Default::default())?;

    if ctx.json {
        let models: Vec<_> = ctx.catalog.iter().collect();
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    println!("Price table ({} models, per 1k tokens)\n", ctx.catalog.len());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Model",
            "Provider",
            "Input",
            "Output",
            "Cache write 5m",
            "Cache read",
            "Batch input",
            "Effective date",
        ]);

    for price in ctx.catalog.iter() {
        table.add_row(vec![
            Cell::new(&price.model_name),
            Cell::new(&price.provider),
            Cell::new(format!("${}", price.input_price)),
            Cell::new(format!("${}", price.output_price)),
            Cell::new(optional_price(price.cache_write_price_5m)),
            Cell::new(optional_price(price.cache_read_price)),
            Cell::new(optional_price(price.batch_input_price)),
            Cell::new(&price.effective_date),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn optional_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("${}", p),
        None => "-".to_string(),
    }
}
