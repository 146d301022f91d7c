use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("key '{key}' does not match archive naming convention: {reason}")]
    MalformedKey { key: String, reason: String },
}

/// Decode the timestamp embedded in an archived object's name.
///
/// The archive names every object `<date>_<time>_<discriminator>.<ext1>.<ext2>`
/// with `date = YYYY-MM-DD` and `time = HH-MM-SS` in UTC at second resolution.
/// The timestamp is the END of the time range the object's content may cover,
/// so it is only useful for pruning objects that end before a window starts.
pub fn embedded_end_time(key: &str) -> Result<DateTime<Utc>, KeyError> {
    let basename = key.rsplit('/').next().unwrap_or(key);

    // Strip up to two trailing dot-separated extensions (e.g. ".json.gz")
    let stem = basename.rsplitn(3, '.').last().unwrap_or(basename);

    let tokens: Vec<&str> = stem.split('_').collect();
    if tokens.len() != 3 {
        return Err(KeyError::MalformedKey {
            key: key.to_string(),
            reason: format!(
                "expected 3 underscore-separated tokens in '{}', found {}",
                stem,
                tokens.len()
            ),
        });
    }

    let datetime = format!("{}_{}", tokens[0], tokens[1]);
    let parsed = NaiveDateTime::parse_from_str(&datetime, "%Y-%m-%d_%H-%M-%S").map_err(|e| {
        KeyError::MalformedKey {
            key: key.to_string(),
            reason: format!("invalid date/time '{}': {}", datetime, e),
        }
    })?;

    Ok(Utc.from_utc_datetime(&parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic_key() {
        let ts = embedded_end_time("2024-01-01_00-10-00_b.json.gz").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-01T00:10:00+00:00");
    }

    #[test]
    fn test_decode_ignores_prefix_path() {
        let bare = embedded_end_time("2024-03-05_12-30-45_x.json.gz").unwrap();
        let nested = embedded_end_time("ember/batches/2024/2024-03-05_12-30-45_x.json.gz").unwrap();
        assert_eq!(bare, nested);
    }

    #[test]
    fn test_decode_ignores_discriminator_and_extensions() {
        let a = embedded_end_time("2024-01-01_00-00-00_aaaa.json.gz").unwrap();
        let b = embedded_end_time("2024-01-01_00-00-00_zzzz.ndjson.gzip").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.timestamp(), 1704067200);
    }

    #[test]
    fn test_decode_second_precision() {
        let ts = embedded_end_time("2024-06-30_23-59-59_tail.json.gz").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-06-30T23:59:59+00:00");
    }

    #[test]
    fn test_wrong_token_count_is_malformed() {
        let err = embedded_end_time("2024-01-01_00-00-00.json.gz").unwrap_err();
        assert!(matches!(err, KeyError::MalformedKey { .. }));

        let err = embedded_end_time("2024-01-01_00-00-00_a_b.json.gz").unwrap_err();
        assert!(matches!(err, KeyError::MalformedKey { .. }));
    }

    #[test]
    fn test_non_numeric_components_are_malformed() {
        let err = embedded_end_time("not-a-date_00-00-00_a.json.gz").unwrap_err();
        assert!(matches!(err, KeyError::MalformedKey { .. }));

        let err = embedded_end_time("2024-01-01_bad-time_a.json.gz").unwrap_err();
        assert!(matches!(err, KeyError::MalformedKey { .. }));
    }

    #[test]
    fn test_out_of_range_time_is_malformed() {
        let err = embedded_end_time("2024-01-01_25-00-00_a.json.gz").unwrap_err();
        assert!(matches!(err, KeyError::MalformedKey { .. }));
    }

    #[test]
    fn test_unrelated_filename_is_malformed() {
        let err = embedded_end_time("manifest.json").unwrap_err();
        assert!(matches!(err, KeyError::MalformedKey { .. }));
    }
}
