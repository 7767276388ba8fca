//! # labelkit
//!
//! Utilities for annotation projects on a labeling platform: project and
//! task management over the platform's REST API, and a CSV-to-JSON merge
//! that joins externally-collected annotation judgments onto the canonical
//! task list in the platform's bulk-import format.
//!
//! ## Quick start - merging annotations
//!
//! ```rust,ignore
//! use labelkit::merge::merge_files;
//!
//! // Joins judgments onto tasks by id and writes the import document.
//! let count = merge_files("test-annotations.csv", "all_tasks.csv", "merged_annotations.json")?;
//! println!("merged {count} tasks");
//! ```
//!
//! ## Talking to the platform
//!
//! ```rust,ignore
//! use labelkit::client::{HttpProjectService, ProjectService};
//! use labelkit::config::ClientConfig;
//!
//! let service = HttpProjectService::new(ClientConfig::from_env()?);
//! for project in service.list_projects()? {
//!     println!("{:>4}  {}", project.id, project.title);
//! }
//! ```
//!
//! Everything network-facing sits behind the [`client::ProjectService`]
//! trait; the merge core is pure file-to-file and is independently testable
//! with [`client::InMemoryProjectService`] standing in for the server.

pub mod annotations;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
mod input;
pub mod logging;
pub mod merge;
pub mod tasks;

pub use annotations::{build_index, AnnotationRecord};
pub use client::{HttpProjectService, InMemoryProjectService, Project, ProjectService};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use merge::{format_result, merge, merge_files, to_import_json};
pub use tasks::{read_tasks, AnnotationBlock, AnnotationResult, ResultValue, TaskData, TaskRecord};
