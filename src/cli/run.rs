use chrono::{DateTime, TimeZone, Utc};
use clap::Args;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::parse::load_config;
use crate::config::types::Config;
use crate::config::ConfigError;
use crate::event::filter::{InvalidWindow, TimeWindow};
use crate::pipeline::runner::{run_extract, ExtractError, ExtractRequest};
use crate::sink::csv::CsvSink;
use crate::sink::SinkError;
use crate::store::s3::S3Store;

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// S3 bucket holding the archive (falls back to s3.bucket in the config)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Key prefix of the archived objects
    #[arg(long)]
    pub prefix: String,

    /// Window start, epoch seconds or RFC3339
    #[arg(long)]
    pub start_time: String,

    /// Window end, epoch seconds or RFC3339
    #[arg(long)]
    pub end_time: String,

    /// Event type to extract (falls back to extract.event_type in the config)
    #[arg(long)]
    pub event_type: Option<String>,

    /// Output CSV path (falls back to extract.output in the config)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Download every listed object instead of pruning by the end-time
    /// encoded in key names
    #[arg(long)]
    pub no_prune: bool,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Window(#[from] InvalidWindow),

    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),
}

pub async fn extract(config_path: Option<PathBuf>, args: ExtractArgs) -> Result<(), RunError> {
    let config = match &config_path {
        Some(path) => {
            info!(config_path = %path.display(), "Loading configuration");
            load_config(path)?
        }
        None => {
            debug!("No config file found, using defaults");
            Config::default()
        }
    };

    let bucket = args
        .bucket
        .or_else(|| config.s3.bucket.clone())
        .filter(|b| !b.is_empty())
        .ok_or_else(|| {
            RunError::InvalidArgument(
                "bucket is required: pass --bucket or set s3.bucket in the config".to_string(),
            )
        })?;

    if args.prefix.is_empty() {
        return Err(RunError::InvalidArgument(
            "prefix must not be empty".to_string(),
        ));
    }

    let start = parse_time(&args.start_time)
        .map_err(|e| RunError::InvalidArgument(format!("--start-time: {}", e)))?;
    let end = parse_time(&args.end_time)
        .map_err(|e| RunError::InvalidArgument(format!("--end-time: {}", e)))?;

    // Fail fast on an inverted window, before any object-store calls
    let window = TimeWindow::new(start, end)?;

    let output = args.output.unwrap_or_else(|| config.extract.output.clone());
    let event_type = args.event_type.unwrap_or(config.extract.event_type);

    info!(
        bucket = %bucket,
        prefix = %args.prefix,
        event_type = %event_type,
        window_start = %window.start(),
        window_end = %window.end(),
        "Starting extract"
    );

    let store = S3Store::connect(bucket, &config.s3).await;
    let mut sink = CsvSink::create(&output)?;

    let request = ExtractRequest {
        prefix: args.prefix,
        window,
        event_type,
        prune: !args.no_prune,
    };

    let summary = run_extract(&store, &mut sink, &request).await?;

    info!(
        output = %output.display(),
        rows = summary.matched_rows,
        "Wrote output table"
    );

    if summary.skipped > 0 {
        warn!(
            skipped = summary.skipped,
            "Some objects were skipped, their keys are in the log above"
        );
    }

    Ok(())
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(epoch) = value.parse::<i64>() {
        return Utc
            .timestamp_opt(epoch, 0)
            .single()
            .ok_or_else(|| format!("epoch value '{}' is out of range", value));
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("'{}' is neither epoch seconds nor RFC3339", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_epoch_seconds() {
        let ts = parse_time("1704067200").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_time_rfc3339() {
        let ts = parse_time("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(ts.timestamp(), 1704067200);
    }

    #[test]
    fn test_parse_time_rfc3339_with_offset() {
        let ts = parse_time("2024-01-01T05:30:00+05:30").unwrap();
        assert_eq!(ts.timestamp(), 1704067200);
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(parse_time("yesterday").is_err());
        assert!(parse_time("").is_err());
    }
}
