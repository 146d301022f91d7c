use crate::event::record::EventRecord;
use crate::sink::{render_cell, Sink, SinkError};

/// In-memory output table with the same header-once and projection semantics
/// as [`CsvSink`](crate::sink::CsvSink). Lets pipeline tests assert on rows
/// without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
    pub finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sink for MemorySink {
    fn append(&mut self, records: &[EventRecord]) -> Result<usize, SinkError> {
        let Some(first) = records.first() else {
            return Ok(0);
        };

        if self.header.is_none() {
            self.header = Some(first.fields.keys().cloned().collect());
        }

        let Some(columns) = self.header.as_ref() else {
            return Ok(0);
        };

        for record in records {
            self.rows.push(
                columns
                    .iter()
                    .map(|column| render_cell(record.fields.get(column)))
                    .collect(),
            );
        }

        Ok(records.len())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_mirrors_csv_semantics() {
        let mut sink = MemorySink::new();

        let record = EventRecord::from_json_line(
            1,
            r#"{"Timestamp":"2024-01-01T00:02:00Z","Type":"Trade","Qty":5}"#,
        )
        .unwrap();

        assert_eq!(sink.append(&[record.clone()]).unwrap(), 1);
        assert_eq!(sink.append(&[]).unwrap(), 0);
        assert_eq!(sink.append(&[record]).unwrap(), 1);
        sink.finish().unwrap();

        assert_eq!(
            sink.header.as_deref(),
            Some(&["Timestamp".to_string(), "Type".to_string(), "Qty".to_string()][..])
        );
        assert_eq!(sink.rows.len(), 2);
        assert!(sink.finished);
    }
}
