use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

/// Required field carrying the event time.
pub const TIMESTAMP_FIELD: &str = "Timestamp";
/// Required field carrying the event kind tag.
pub const TYPE_FIELD: &str = "Type";

/// Timestamps above this are taken as epoch milliseconds rather than seconds.
const EPOCH_MILLIS_CUTOFF: i64 = 100_000_000_000;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("io error while reading object stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line} is not a JSON object")]
    NotAnObject { line: usize },

    #[error("line {line} is missing required field '{field}'")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line} field 'Type' is not a string")]
    TypeNotAString { line: usize },

    #[error("line {line} has unusable timestamp value '{value}'")]
    InvalidTimestamp { line: usize, value: String },
}

/// One decoded archive event. `fields` holds the full original object in its
/// original key order so pass-through attributes survive into the output
/// unchanged; `timestamp` and `kind` are the parsed copies of the two
/// required fields.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub timestamp: DateTime<Utc>,
    pub kind: String,
    pub fields: Map<String, Value>,
}

impl EventRecord {
    /// Decode one line of line-delimited JSON. `line_no` is 1-based and only
    /// used for diagnostics.
    pub fn from_json_line(line_no: usize, line: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(line).map_err(|e| DecodeError::Json {
            line: line_no,
            source: e,
        })?;

        let Value::Object(fields) = value else {
            return Err(DecodeError::NotAnObject { line: line_no });
        };

        let timestamp = match fields.get(TIMESTAMP_FIELD) {
            Some(value) => parse_timestamp(line_no, value)?,
            None => {
                return Err(DecodeError::MissingField {
                    line: line_no,
                    field: TIMESTAMP_FIELD,
                })
            }
        };

        let kind = match fields.get(TYPE_FIELD) {
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(DecodeError::TypeNotAString { line: line_no }),
            None => {
                return Err(DecodeError::MissingField {
                    line: line_no,
                    field: TYPE_FIELD,
                })
            }
        };

        Ok(Self {
            timestamp,
            kind,
            fields,
        })
    }
}

/// The archive has carried timestamps both as ISO-8601 strings and as epoch
/// numbers, so accept all three encodings: RFC3339, naive ISO (assumed UTC),
/// and integer epoch seconds/milliseconds.
fn parse_timestamp(line_no: usize, value: &Value) -> Result<DateTime<Utc>, DecodeError> {
    match value {
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Ok(dt.with_timezone(&Utc));
            }
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|ndt| Utc.from_utc_datetime(&ndt))
                .map_err(|_| DecodeError::InvalidTimestamp {
                    line: line_no,
                    value: s.clone(),
                })
        }
        Value::Number(n) => {
            let raw = n.as_i64().ok_or_else(|| DecodeError::InvalidTimestamp {
                line: line_no,
                value: n.to_string(),
            })?;

            let (seconds, nanos) = if raw >= EPOCH_MILLIS_CUTOFF || raw <= -EPOCH_MILLIS_CUTOFF {
                (raw / 1000, ((raw % 1000) * 1_000_000) as u32)
            } else {
                (raw, 0)
            };

            Utc.timestamp_opt(seconds, nanos)
                .single()
                .ok_or_else(|| DecodeError::InvalidTimestamp {
                    line: line_no,
                    value: n.to_string(),
                })
        }
        other => Err(DecodeError::InvalidTimestamp {
            line: line_no,
            value: other.to_string(),
        }),
    }
}
