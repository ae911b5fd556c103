//! Price table loading from user-supplied files

use llm_cost_planner::catalog::Catalog;
use llm_cost_planner::error::PlannerError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn load_price_table_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        [models."custom-model"]
        provider = "custom"
        input_price = 0.002
        output_price = 0.008
        cache_write_price_5m = 0.0025
        cache_read_price = 0.0002
        effective_date = "2025-08-01"

        [models."custom-model".capabilities]
        supports_caching = true
        "#
    )
    .unwrap();

    let catalog = Catalog::load(file.path()).unwrap();
    assert_eq!(catalog.len(), 1);

    let price = catalog.require("custom-model").unwrap();
    assert_eq!(price.input_price, 0.002);
    assert_eq!(price.effective_date, "2025-08-01");
    assert!(price.capabilities.supports_caching);
    assert!(!price.capabilities.supports_batch);
    // No batch prices: strategies fall back to standard prices.
    assert_eq!(price.effective_batch_input_price(), 0.002);
}

#[test]
fn missing_effective_date_defaults_to_today() {
    let toml = r#"
        [models."undated"]
        provider = "custom"
        input_price = 0.001
        output_price = 0.002
    "#;
    let catalog = Catalog::from_toml_str(toml).unwrap();
    let price = catalog.get("undated").unwrap();
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    assert_eq!(price.effective_date, today);
}

#[test]
fn malformed_table_is_a_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "models = \"not a table\"").unwrap();

    match Catalog::load(file.path()) {
        Err(PlannerError::Parse(_)) => {}
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::path::Path::new("/nonexistent/prices.toml");
    assert!(matches!(Catalog::load(path), Err(PlannerError::Io(_))));
}
