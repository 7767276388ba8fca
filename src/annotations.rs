//! Annotation index builder.
//!
//! Reads a CSV export of human annotation judgments and builds the mapping
//! from task id to judgment record that forms the join side of the merge.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::input;

/// Columns the annotations CSV must carry.
const REQUIRED_COLUMNS: [&str; 4] = ["id", "sentiment", "notes", "highlight"];

/// One human judgment row from the annotations CSV.
///
/// Constructed once per row while reading the file and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRecord {
    /// Join key into the canonical task list.
    pub task_id: String,
    /// Sentiment label entered by the reviewer (may be empty).
    pub sentiment: String,
    /// Free-text reviewer notes (may be empty).
    pub notes: String,
    /// Highlight spans, passed through opaque from the source column.
    pub highlight: Vec<Value>,
}

impl AnnotationRecord {
    /// True when the row carried no judgment at all. An entirely blank row
    /// counts as "no annotation" during the merge.
    pub fn is_empty(&self) -> bool {
        self.sentiment.is_empty() && self.notes.is_empty() && self.highlight.is_empty()
    }
}

/// Build the task-id → judgment mapping from an annotations CSV.
///
/// The header must contain at least `id`, `sentiment`, `notes`, `highlight`.
/// A non-empty `highlight` cell must hold a JSON array of span objects;
/// anything else aborts the run. Silent data loss in a human-reviewed
/// pipeline is worse than a loud failure, so there is no partial result.
///
/// Duplicate ids keep the last row seen; each collision is reported at
/// warning level.
pub fn build_index(path: impl AsRef<Path>) -> Result<HashMap<String, AnnotationRecord>> {
    let path = path.as_ref();
    let mut reader = input::open_reader(path)?;
    let cols = input::column_indexes(&mut reader, &REQUIRED_COLUMNS, path)?;
    let (id_col, sentiment_col, notes_col, highlight_col) = (cols[0], cols[1], cols[2], cols[3]);

    let mut index = HashMap::new();
    for row in reader.records() {
        let row = row?;
        let cell = |i: usize| row.get(i).unwrap_or("").to_string();

        let record = AnnotationRecord {
            task_id: cell(id_col),
            sentiment: cell(sentiment_col),
            notes: cell(notes_col),
            highlight: parse_highlight(row.get(highlight_col).unwrap_or(""))?,
        };
        log::debug!(
            "annotation for task {}: sentiment={:?}, {} highlight span(s)",
            record.task_id,
            record.sentiment,
            record.highlight.len()
        );
        if let Some(previous) = index.insert(record.task_id.clone(), record) {
            log::warn!(
                "duplicate annotation row for task {}; keeping the later row",
                previous.task_id
            );
        }
    }
    Ok(index)
}

/// Parse the `highlight` cell. An empty cell means no spans; a non-empty
/// cell must be a JSON array.
fn parse_highlight(raw: &str) -> Result<Vec<Value>> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| Error::malformed_field("highlight", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("annotations.csv");
        fs::write(&path, content).expect("Failed to write test file");
        (dir, path)
    }

    #[test]
    fn builds_index_keyed_by_task_id() {
        let (_dir, path) = write_csv(
            "id,sentiment,notes,highlight\n\
             7,positive,solid opener,\n\
             9,negative,,\"[{\"\"start\"\":0,\"\"end\"\":4}]\"\n",
        );

        let index = build_index(&path).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index["7"].sentiment, "positive");
        assert_eq!(index["7"].notes, "solid opener");
        assert!(index["7"].highlight.is_empty());
        assert_eq!(index["9"].highlight.len(), 1);
        assert_eq!(index["9"].highlight[0]["end"], 4);
    }

    #[test]
    fn empty_highlight_cell_is_empty_sequence() {
        let (_dir, path) = write_csv("id,sentiment,notes,highlight\n1,positive,,\n");
        let index = build_index(&path).unwrap();
        assert!(index["1"].highlight.is_empty());
    }

    #[test]
    fn invalid_highlight_json_aborts() {
        let (_dir, path) = write_csv("id,sentiment,notes,highlight\n1,positive,,not-json\n");
        let err = build_index(&path).unwrap_err();
        match err {
            Error::MalformedField { field, .. } => assert_eq!(field, "highlight"),
            other => panic!("expected MalformedField, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_key_keeps_last_row() {
        let (_dir, path) = write_csv(
            "id,sentiment,notes,highlight\n\
             3,positive,first pass,\n\
             3,negative,second pass,\n",
        );
        let index = build_index(&path).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index["3"].sentiment, "negative");
        assert_eq!(index["3"].notes, "second pass");
    }

    #[test]
    fn blank_row_is_empty_record() {
        let (_dir, path) = write_csv("id,sentiment,notes,highlight\n5,,,\n");
        let index = build_index(&path).unwrap();
        assert!(index["5"].is_empty());
    }

    #[test]
    fn missing_header_column_is_fatal() {
        let (_dir, path) = write_csv("id,sentiment,notes\n1,positive,\n");
        let err = build_index(&path).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = build_index("/nonexistent/annotations.csv").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn highlight_round_trips_through_csv() {
        let spans = serde_json::json!([
            {"start": 3, "end": 9, "text": "amazing"},
            {"start": 40, "end": 52}
        ]);
        let encoded = serde_json::to_string(&spans).unwrap();
        // Quote the cell so embedded commas survive the CSV layer.
        let content = format!(
            "id,sentiment,notes,highlight\n1,positive,,\"{}\"\n",
            encoded.replace('"', "\"\"")
        );
        let (_dir, path) = write_csv(&content);

        let index = build_index(&path).unwrap();
        assert_eq!(Value::Array(index["1"].highlight.clone()), spans);
    }
}
