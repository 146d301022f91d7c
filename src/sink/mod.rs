pub mod csv;
pub mod memory;

use serde_json::Value;
use thiserror::Error;

use crate::event::record::EventRecord;

pub use self::csv::CsvSink;
pub use memory::MemorySink;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
}

/// Append-only tabular output. The column set is fixed by the first record
/// of the first non-empty append; the header is written exactly once.
pub trait Sink {
    /// Append a batch of records, returning how many rows were written.
    /// Appending an empty batch is a no-op.
    fn append(&mut self, records: &[EventRecord]) -> Result<usize, SinkError>;

    /// Flush buffered rows. Called once when the pipeline ends, on every
    /// exit path.
    fn finish(&mut self) -> Result<(), SinkError>;
}

/// Render one field value as a cell. Scalars render bare, null and missing
/// fields render empty, nested values render as compact JSON.
pub(crate) fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(nested) => nested.to_string(),
    }
}
