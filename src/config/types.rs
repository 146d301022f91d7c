use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Every section and field has a default, so a missing or empty config file
/// is valid; CLI flags override whatever the file provides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub s3: S3Settings,
    #[serde(default)]
    pub extract: ExtractSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Settings {
    /// Bucket holding the archive. Optional here; `--bucket` overrides.
    pub bucket: Option<String>,
    /// Explicit region. Falls back to the AWS default provider chain.
    pub region: Option<String>,
    /// Endpoint URL for S3-compatible stores (MinIO, LocalStack).
    pub endpoint: Option<String>,
    #[serde(default)]
    pub force_path_style: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractSettings {
    #[serde(default = "default_event_type")]
    pub event_type: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            event_type: default_event_type(),
            output: default_output(),
        }
    }
}

fn default_event_type() -> String {
    "OrderTradeReportEvent".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("output.csv")
}
