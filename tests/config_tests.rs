use skimmer::config::generate::starter_config;
use skimmer::config::load_config;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_generated_config_is_valid() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yml");

    fs::write(&config_path, starter_config()).unwrap();

    let config = load_config(&config_path).expect("Generated config should be valid");

    assert_eq!(config.extract.event_type, "OrderTradeReportEvent");
    assert_eq!(config.extract.output.to_str(), Some("output.csv"));
    assert!(config.s3.bucket.is_none());
}

#[test]
fn test_flags_take_precedence_semantics_documented_in_config() {
    // the starter config mentions that flags override file values
    assert!(starter_config().contains("--bucket overrides"));
}

#[test]
fn test_config_with_s3_compatible_endpoint() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yml");

    let yaml = r#"
s3:
  bucket: local-archive
  endpoint: http://localhost:9000
  force_path_style: true
extract:
  event_type: OrderTradeReportEvent
  output: /tmp/trades.csv
"#;
    fs::write(&config_path, yaml).unwrap();

    let config = load_config(&config_path).unwrap();

    assert_eq!(config.s3.endpoint.as_deref(), Some("http://localhost:9000"));
    assert!(config.s3.force_path_style);
}

#[test]
fn test_tilde_output_path_is_expanded() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yml");

    fs::write(&config_path, "extract:\n  output: ~/extracts/out.csv\n").unwrap();

    let config = load_config(&config_path).unwrap();

    if let Some(home) = dirs::home_dir() {
        assert_eq!(config.extract.output, home.join("extracts/out.csv"));
    }
}
