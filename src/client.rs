//! Platform client: project and task operations on the labeling service.
//!
//! The merge core never touches the network. Everything that does goes
//! through the [`ProjectService`] trait, so tests (and dry runs) can
//! substitute the in-memory implementation for the HTTP one.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::tasks::TaskRecord;

/// A project as reported by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub title: String,
    /// Labeling configuration XML, when the endpoint returns it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_config: Option<String>,
}

/// Capability interface over the platform's project and task endpoints.
pub trait ProjectService {
    /// Create a project with the given title and labeling configuration XML.
    fn create_project(&self, title: &str, label_config: &str) -> Result<Project>;

    /// List all projects.
    fn list_projects(&self) -> Result<Vec<Project>>;

    /// Fetch one project by id.
    fn get_project(&self, id: u64) -> Result<Project>;

    /// Delete a project.
    fn delete_project(&self, id: u64) -> Result<()>;

    /// Delete every task in a project, returning how many were removed.
    fn delete_all_tasks(&self, project_id: u64) -> Result<usize>;

    /// Bulk-import pre-annotated tasks, returning how many were accepted.
    fn import_tasks(&self, project_id: u64, tasks: &[TaskRecord]) -> Result<usize>;
}

// ============================================================================
// HTTP implementation
// ============================================================================

/// HTTP implementation of [`ProjectService`] against the platform REST API.
///
/// Authenticates every request with the `Authorization: Token <key>` header.
pub struct HttpProjectService {
    config: ClientConfig,
    agent: ureq::Agent,
}

impl HttpProjectService {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn auth(&self) -> String {
        format!("Token {}", self.config.api_key)
    }

    /// Task ids currently in the project.
    fn list_task_ids(&self, project_id: u64) -> Result<Vec<u64>> {
        let url = self.url("/api/tasks");
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &self.auth())
            .query("project", &project_id.to_string())
            .call()
            .map_err(|e| request_failed("task listing", e))?;
        let value: Value = response
            .into_json()
            .map_err(|e| Error::api(format!("task listing returned invalid JSON: {}", e)))?;

        // Older servers answer with a bare array, newer ones wrap it.
        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("tasks").or_else(|| map.remove("results")) {
                Some(Value::Array(items)) => items,
                _ => return Err(Error::api("task listing has an unexpected shape")),
            },
            _ => return Err(Error::api("task listing has an unexpected shape")),
        };
        items
            .iter()
            .map(|item| {
                item.get("id").and_then(Value::as_u64).ok_or_else(|| {
                    Error::api("task listing entry is missing a numeric 'id'")
                })
            })
            .collect()
    }
}

impl ProjectService for HttpProjectService {
    fn create_project(&self, title: &str, label_config: &str) -> Result<Project> {
        let url = self.url("/api/projects/");
        let body = serde_json::json!({
            "title": title,
            "label_config": label_config,
        });
        let response = self
            .agent
            .post(&url)
            .set("Authorization", &self.auth())
            .send_json(body)
            .map_err(|e| request_failed("project creation", e))?;
        response
            .into_json()
            .map_err(|e| Error::api(format!("project creation returned invalid JSON: {}", e)))
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        let url = self.url("/api/projects/");
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &self.auth())
            .call()
            .map_err(|e| request_failed("project listing", e))?;
        let value: Value = response
            .into_json()
            .map_err(|e| Error::api(format!("project listing returned invalid JSON: {}", e)))?;

        let items = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("results") {
                Some(Value::Array(items)) => items,
                _ => return Err(Error::api("project listing has an unexpected shape")),
            },
            _ => return Err(Error::api("project listing has an unexpected shape")),
        };
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(Error::from))
            .collect()
    }

    fn get_project(&self, id: u64) -> Result<Project> {
        let url = self.url(&format!("/api/projects/{}/", id));
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &self.auth())
            .call()
            .map_err(|e| request_failed("project fetch", e))?;
        response
            .into_json()
            .map_err(|e| Error::api(format!("project fetch returned invalid JSON: {}", e)))
    }

    fn delete_project(&self, id: u64) -> Result<()> {
        let url = self.url(&format!("/api/projects/{}/", id));
        self.agent
            .delete(&url)
            .set("Authorization", &self.auth())
            .call()
            .map_err(|e| request_failed("project deletion", e))?;
        Ok(())
    }

    fn delete_all_tasks(&self, project_id: u64) -> Result<usize> {
        let task_ids = self.list_task_ids(project_id)?;
        for task_id in &task_ids {
            let url = self.url(&format!("/api/tasks/{}/", task_id));
            self.agent
                .delete(&url)
                .set("Authorization", &self.auth())
                .call()
                .map_err(|e| request_failed("task deletion", e))?;
            log::debug!("deleted task {} from project {}", task_id, project_id);
        }
        Ok(task_ids.len())
    }

    fn import_tasks(&self, project_id: u64, tasks: &[TaskRecord]) -> Result<usize> {
        let url = self.url(&format!("/api/projects/{}/import", project_id));
        let body = serde_json::to_value(tasks)?;
        let response = self
            .agent
            .post(&url)
            .set("Authorization", &self.auth())
            .send_json(body)
            .map_err(|e| request_failed("task import", e))?;
        let value: Value = response
            .into_json()
            .map_err(|e| Error::api(format!("task import returned invalid JSON: {}", e)))?;
        Ok(value
            .get("task_count")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(tasks.len()))
    }
}

fn request_failed(context: &str, err: ureq::Error) -> Error {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            Error::api(format!(
                "{} failed with HTTP {}: {}",
                context,
                code,
                body.trim()
            ))
        }
        ureq::Error::Transport(transport) => {
            Error::api(format!("{} failed: {}", context, transport))
        }
    }
}

// ============================================================================
// In-memory implementation
// ============================================================================

/// In-memory [`ProjectService`] backing tests and offline dry runs.
#[derive(Debug, Default)]
pub struct InMemoryProjectService {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    projects: Vec<Project>,
    tasks: HashMap<u64, Vec<TaskRecord>>,
}

impl InMemoryProjectService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks imported into a project so far (test inspection hook).
    pub fn tasks_in(&self, project_id: u64) -> Vec<TaskRecord> {
        let state = self.state.lock().unwrap();
        state.tasks.get(&project_id).cloned().unwrap_or_default()
    }
}

impl ProjectService for InMemoryProjectService {
    fn create_project(&self, title: &str, label_config: &str) -> Result<Project> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let project = Project {
            id: state.next_id,
            title: title.to_string(),
            label_config: Some(label_config.to_string()),
        };
        state.projects.push(project.clone());
        Ok(project)
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.state.lock().unwrap().projects.clone())
    }

    fn get_project(&self, id: u64) -> Result<Project> {
        self.state
            .lock()
            .unwrap()
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Error::api(format!("project {} not found", id)))
    }

    fn delete_project(&self, id: u64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.projects.len();
        state.projects.retain(|p| p.id != id);
        if state.projects.len() == before {
            return Err(Error::api(format!("project {} not found", id)));
        }
        state.tasks.remove(&id);
        Ok(())
    }

    fn delete_all_tasks(&self, project_id: u64) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        Ok(state.tasks.remove(&project_id).map_or(0, |t| t.len()))
    }

    fn import_tasks(&self, project_id: u64, tasks: &[TaskRecord]) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        if !state.projects.iter().any(|p| p.id == project_id) {
            return Err(Error::api(format!("project {} not found", project_id)));
        }
        state
            .tasks
            .entry(project_id)
            .or_default()
            .extend_from_slice(tasks);
        Ok(tasks.len())
    }
}
