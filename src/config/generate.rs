/// Commented starter config written by `skimmer config init`.
pub fn starter_config() -> &'static str {
    r#"# skimmer configuration
#
# Everything in this file is optional: flags passed to `skimmer extract`
# override these values, and a missing file means built-in defaults.
# Values support $env{VAR_NAME} expansion.

s3:
  # Bucket holding the time-partitioned archive. --bucket overrides.
  # bucket: my-event-archive

  # Explicit region. When unset, the AWS default provider chain applies
  # (AWS_REGION, shared config, instance metadata).
  # region: us-east-1

  # Endpoint URL for S3-compatible stores such as MinIO or LocalStack.
  # Most such stores also need force_path_style.
  # endpoint: http://localhost:9000
  # force_path_style: true

extract:
  # Event type copied to the output table; all other types are filtered out.
  event_type: OrderTradeReportEvent

  # Output CSV path. Truncated at the start of every run.
  output: output.csv
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Config;

    #[test]
    fn test_starter_config_parses_with_defaults() {
        let config: Config = serde_yaml::from_str(starter_config()).unwrap();

        // commented-out s3 section leaves the provider-chain defaults
        assert!(config.s3.bucket.is_none());
        assert!(config.s3.endpoint.is_none());
        assert_eq!(config.extract.event_type, "OrderTradeReportEvent");
    }
}
