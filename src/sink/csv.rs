use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::event::record::EventRecord;
use crate::sink::{render_cell, Sink, SinkError};

/// CSV output table. Creating the sink truncates the target file, so a rerun
/// never appends to a previous extract. Rows after the first are projected
/// onto the first record's columns: a missing field renders as an empty cell
/// and fields outside the header are dropped.
pub struct CsvSink {
    writer: csv::Writer<File>,
    header: Option<Vec<String>>,
}

impl CsvSink {
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        debug!(path = %path.display(), "output table created");

        Ok(Self {
            writer: csv::Writer::from_writer(file),
            header: None,
        })
    }
}

impl Sink for CsvSink {
    fn append(&mut self, records: &[EventRecord]) -> Result<usize, SinkError> {
        let Some(first) = records.first() else {
            return Ok(0);
        };

        if self.header.is_none() {
            let columns: Vec<String> = first.fields.keys().cloned().collect();
            self.writer.write_record(&columns)?;
            self.header = Some(columns);
        }

        let Some(columns) = self.header.as_ref() else {
            return Ok(0);
        };

        for record in records {
            let row: Vec<String> = columns
                .iter()
                .map(|column| render_cell(record.fields.get(column)))
                .collect();
            self.writer.write_record(&row)?;
        }

        Ok(records.len())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn record(json: &str) -> EventRecord {
        EventRecord::from_json_line(1, json).unwrap()
    }

    #[test]
    fn test_header_written_once_across_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.append(&[record(
            r#"{"Timestamp":"2024-01-01T00:02:00Z","Type":"Trade","Price":100.5}"#,
        )])
        .unwrap();
        sink.append(&[record(
            r#"{"Timestamp":"2024-01-01T00:03:00Z","Type":"Trade","Price":101.0}"#,
        )])
        .unwrap();
        sink.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Timestamp,Type,Price");
        assert_eq!(lines[1], "2024-01-01T00:02:00Z,Trade,100.5");
        assert_eq!(lines[2], "2024-01-01T00:03:00Z,Trade,101.0");
    }

    #[test]
    fn test_empty_append_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        assert_eq!(sink.append(&[]).unwrap(), 0);
        sink.finish().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_create_truncates_previous_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale,rows\n1,2\n").unwrap();

        let mut sink = CsvSink::create(&path).unwrap();
        sink.finish().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_rows_projected_onto_first_records_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.append(&[
            record(r#"{"Timestamp":"2024-01-01T00:02:00Z","Type":"Trade","Qty":5}"#),
            record(r#"{"Timestamp":"2024-01-01T00:03:00Z","Type":"Trade","Venue":"X"}"#),
        ])
        .unwrap();
        sink.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "Timestamp,Type,Qty");
        // second record has no Qty and its Venue is outside the header
        assert_eq!(lines[2], "2024-01-01T00:03:00Z,Trade,");
    }

    #[test]
    fn test_cell_rendering() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.append(&[record(
            r#"{"Timestamp":"2024-01-01T00:02:00Z","Type":"Trade","Live":true,"Note":null,"Legs":[1,2]}"#,
        )])
        .unwrap();
        sink.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[1], r#"2024-01-01T00:02:00Z,Trade,true,,"[1,2]""#);
    }

    #[test]
    fn test_values_with_commas_are_quoted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.append(&[record(
            r#"{"Timestamp":"2024-01-01T00:02:00Z","Type":"Trade","Note":"a,b"}"#,
        )])
        .unwrap();
        sink.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.lines().nth(1).unwrap().ends_with(r#""a,b""#));
    }
}
