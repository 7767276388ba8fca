//! Canonical task reading and the platform's bulk-import schema.
//!
//! The types here are a wire-format contract: the importing platform
//! validates the document against its labeling configuration, so field names
//! and nesting must match it exactly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input;

/// Columns the canonical tasks CSV must carry.
const REQUIRED_COLUMNS: [&str; 4] = ["id", "review", "filename", "url"];

/// The free-form data block of one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskData {
    /// Task identifier, the join key against the annotation index.
    pub id: String,
    /// Review body. The source CSV calls this column `review`; the import
    /// schema calls it `review_text`. The rename happens here, at the
    /// vocabulary boundary.
    pub review_text: String,
    /// Source file the review came from.
    pub filename: String,
    /// Canonical URL of the review.
    pub url: String,
}

/// One unit of annotation work in the bulk-import document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Free-form task payload.
    pub data: TaskData,
    /// Present only for tasks that matched a judgment during the merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<AnnotationBlock>>,
}

/// One round of annotation attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationBlock {
    /// Labeling results for this round.
    pub result: Vec<AnnotationResult>,
    /// User id of the reviewer the round is attributed to.
    pub completed_by: u64,
}

/// A single labeling result in the platform's result schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationResult {
    /// Name of the control tag that produced the value.
    pub from_name: String,
    /// Name of the object tag the value applies to.
    pub to_name: String,
    /// Result kind; always `choices` for sentiment labels.
    #[serde(rename = "type")]
    pub kind: String,
    pub readonly: bool,
    pub hidden: bool,
    /// The selected choices.
    pub value: ResultValue,
}

/// Value payload of a `choices` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultValue {
    pub choices: Vec<String>,
}

/// Read the canonical task universe from a CSV export.
///
/// The header must contain at least `id`, `review`, `filename`, `url`.
/// Output order equals input row order, and ids are not deduplicated here;
/// uniqueness only matters on the annotation side of the join.
pub fn read_tasks(path: impl AsRef<Path>) -> Result<Vec<TaskRecord>> {
    let path = path.as_ref();
    let mut reader = input::open_reader(path)?;
    let cols = input::column_indexes(&mut reader, &REQUIRED_COLUMNS, path)?;
    let (id_col, review_col, filename_col, url_col) = (cols[0], cols[1], cols[2], cols[3]);

    let mut tasks = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |i: usize| row.get(i).unwrap_or("").to_string();
        tasks.push(TaskRecord {
            data: TaskData {
                id: cell(id_col),
                review_text: cell(review_col),
                filename: cell(filename_col),
                url: cell(url_col),
            },
            annotations: None,
        });
    }
    log::debug!("read {} tasks from {}", tasks.len(), path.display());
    Ok(tasks)
}
