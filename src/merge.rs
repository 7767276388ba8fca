//! Task merge engine.
//!
//! Joins the annotation index onto the canonical task list and renders the
//! platform's bulk-import document. The index build completes before the
//! merge pass starts; the merge itself is a pure, order-preserving transform.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::annotations::{build_index, AnnotationRecord};
use crate::error::Result;
use crate::tasks::{read_tasks, AnnotationBlock, AnnotationResult, ResultValue, TaskRecord};

/// Canonical reviewer identity attached to every merged annotation block.
const COMPLETED_BY: u64 = 1;

/// Shape one judgment into the platform's labeling-config result schema.
///
/// Pure and total: any record, including one with an empty sentiment string,
/// produces a structurally valid result.
pub fn format_result(record: &AnnotationRecord) -> AnnotationResult {
    AnnotationResult {
        from_name: "sentiment".to_string(),
        to_name: "review_text".to_string(),
        kind: "choices".to_string(),
        readonly: false,
        hidden: false,
        value: ResultValue {
            choices: vec![record.sentiment.clone()],
        },
    }
}

/// Attach matching judgments to the task list.
///
/// Tasks whose id misses the index, or whose record is entirely empty, pass
/// through untouched. A hit gains exactly one annotation block with
/// `completed_by = 1`; a repeated merge overwrites rather than appends.
/// The returned sequence has the same length and order as the input.
pub fn merge(
    index: &HashMap<String, AnnotationRecord>,
    tasks: Vec<TaskRecord>,
) -> Vec<TaskRecord> {
    let mut merged = Vec::with_capacity(tasks.len());
    for mut task in tasks {
        if let Some(record) = index.get(&task.data.id) {
            if !record.is_empty() {
                log::debug!(
                    "task {} matched annotation (sentiment={:?})",
                    task.data.id,
                    record.sentiment
                );
                task.annotations = Some(vec![AnnotationBlock {
                    result: vec![format_result(record)],
                    completed_by: COMPLETED_BY,
                }]);
            }
        }
        merged.push(task);
    }
    merged
}

/// Render tasks as the bulk-import JSON document.
///
/// Pretty-printed with 4-space indentation for human review before upload.
pub fn to_import_json(tasks: &[TaskRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    tasks.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Read both inputs, merge, and write the import document.
///
/// Returns the number of tasks written. The output file is created only
/// after the whole document has been rendered, so a failed run never leaves
/// a partial file behind.
pub fn merge_files(
    annotations_path: impl AsRef<Path>,
    tasks_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<usize> {
    let index = build_index(annotations_path)?;
    let tasks = read_tasks(tasks_path)?;
    let merged = merge(&index, tasks);
    let json = to_import_json(&merged)?;
    fs::write(output_path.as_ref(), json)?;
    log::debug!(
        "wrote {} merged tasks to {}",
        merged.len(),
        output_path.as_ref().display()
    );
    Ok(merged.len())
}
