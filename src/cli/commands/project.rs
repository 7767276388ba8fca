//! Project command - project and task management on the platform

use std::fs;

use clap::{Args, Subcommand};

use crate::cli::output::{color, print_project_table};
use crate::client::{HttpProjectService, ProjectService};
use crate::config::ClientConfig;
use crate::tasks::TaskRecord;

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List all projects
    #[command(name = "list-all", visible_alias = "ls")]
    ListAll,

    /// Create a new project from a labeling configuration XML file
    Create(CreateArgs),

    /// Show one project, including its labeling configuration
    Show {
        /// The ID of the project
        id: u64,
    },

    /// Delete a project
    #[command(name = "delete-project", visible_alias = "delete")]
    DeleteProject {
        /// The ID of the project to delete
        id: u64,
    },

    /// Delete every task in a project
    #[command(name = "delete-all-tasks", visible_alias = "purge")]
    DeleteAllTasks {
        /// The ID of the project
        project_id: u64,
    },

    /// Bulk-import tasks from a merged JSON document
    Import(ImportArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// The project title
    pub name: String,

    /// The labeling configuration XML file
    pub config: String,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Target project id
    pub project_id: u64,

    /// Merged import document produced by `labelkit merge`
    #[arg(long, value_name = "PATH", default_value = "merged_annotations.json")]
    pub tasks_file: String,
}

pub fn run(command: ProjectCommand) -> Result<(), String> {
    let config = ClientConfig::from_env().map_err(|e| e.to_string())?;
    let service = HttpProjectService::new(config);
    dispatch(&service, command)
}

/// Command dispatch against any [`ProjectService`], so tests can drive the
/// same paths with the in-memory implementation.
pub fn dispatch(service: &dyn ProjectService, command: ProjectCommand) -> Result<(), String> {
    match command {
        ProjectCommand::ListAll => {
            let projects = service.list_projects().map_err(|e| e.to_string())?;
            print_project_table(&projects);
        }
        ProjectCommand::Create(args) => {
            let label_config = fs::read_to_string(&args.config)
                .map_err(|e| format!("Failed to read labeling config {}: {}", args.config, e))?;
            let project = service
                .create_project(&args.name, &label_config)
                .map_err(|e| e.to_string())?;
            log::info!("Project created: {} ID: {}", project.title, project.id);
            println!(
                "{} Created project \"{}\" (ID {})",
                color("32", "✓"),
                project.title,
                project.id
            );
        }
        ProjectCommand::Show { id } => {
            let project = service.get_project(id).map_err(|e| e.to_string())?;
            println!("ID:    {}", project.id);
            println!("Title: {}", project.title);
            if let Some(label_config) = &project.label_config {
                println!("Labeling config:");
                for line in label_config.lines() {
                    println!("  {}", line);
                }
            }
        }
        ProjectCommand::DeleteProject { id } => {
            service.delete_project(id).map_err(|e| e.to_string())?;
            log::info!("Project deleted ID: {}", id);
            println!("{} Deleted project {}", color("32", "✓"), id);
            // Show what remains, matching the listing command.
            let projects = service.list_projects().map_err(|e| e.to_string())?;
            print_project_table(&projects);
        }
        ProjectCommand::DeleteAllTasks { project_id } => {
            let removed = service
                .delete_all_tasks(project_id)
                .map_err(|e| e.to_string())?;
            log::info!("Deleted {} tasks from project {}", removed, project_id);
            println!(
                "{} Deleted {} tasks from project {}",
                color("32", "✓"),
                removed,
                project_id
            );
        }
        ProjectCommand::Import(args) => {
            let raw = fs::read_to_string(&args.tasks_file)
                .map_err(|e| format!("Failed to read tasks file {}: {}", args.tasks_file, e))?;
            let tasks: Vec<TaskRecord> = serde_json::from_str(&raw)
                .map_err(|e| format!("Invalid tasks document {}: {}", args.tasks_file, e))?;
            let imported = service
                .import_tasks(args.project_id, &tasks)
                .map_err(|e| e.to_string())?;
            log::info!(
                "Imported {} tasks into project {}",
                imported,
                args.project_id
            );
            println!(
                "{} Imported {} tasks into project {}",
                color("32", "✓"),
                imported,
                args.project_id
            );
        }
    }
    Ok(())
}
