//! Merge command - CSV judgments into the bulk-import JSON document

use clap::Parser;

use crate::cli::output::color;
use crate::merge::merge_files;

/// Merge collected annotations into the platform's task import format.
#[derive(Parser, Debug)]
pub struct MergeArgs {
    /// CSV of human annotation judgments (id,sentiment,notes,highlight)
    #[arg(long, value_name = "PATH", default_value = "test-annotations.csv")]
    pub annotations_file: String,

    /// CSV of the canonical task universe (id,review,filename,url)
    #[arg(long, value_name = "PATH", default_value = "all_tasks.csv")]
    pub all_tasks_file: String,

    /// Where to write the merged import document
    #[arg(long, value_name = "PATH", default_value = "merged_annotations.json")]
    pub output_file: String,
}

pub fn run(args: MergeArgs) -> Result<(), String> {
    log::info!("Reading annotations from {}", args.annotations_file);
    log::info!("Reading all tasks from {}", args.all_tasks_file);
    log::info!("Writing merged annotations to {}", args.output_file);

    let count = merge_files(&args.annotations_file, &args.all_tasks_file, &args.output_file)
        .map_err(|e| e.to_string())?;

    println!(
        "{} Merged {} tasks into {}",
        color("32", "✓"),
        count,
        args.output_file
    );
    Ok(())
}
