//! Output formatting utilities for CLI commands

use is_terminal::IsTerminal;
use std::io;

use crate::client::Project;

/// Colorize text with ANSI escape codes (only if stdout is a terminal)
pub fn color(code: &str, text: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Print the two-column project listing.
pub fn print_project_table(projects: &[Project]) {
    println!("   ID   Title");
    println!("===================");
    for project in projects {
        println!(" {:>4}   {}", project.id, project.title);
    }
}
