//! CLI library modules for the labelkit binary.
//!
//! This module contains the command-line interface structure, argument
//! parsing, and command routing. Individual command implementations are in
//! the `commands` submodule so they can be tested independently of the
//! installed binary.

pub mod commands;
pub mod output;
pub mod parser;
