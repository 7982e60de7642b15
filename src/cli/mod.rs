//! CLI module for stepwise
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stepwise - Drive a change request through an ordered, resumable sequence of implementation steps
#[derive(Parser, Debug)]
#[command(name = "stepwise")]
#[command(version)]
#[command(about = "Drive a change request through an ordered, resumable sequence of implementation steps")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a config file (defaults to .stepwise/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute the next workflow step for a change request
    Implement {
        /// Path to the change request file
        change_request: PathBuf,

        /// Reset the workflow to its first step instead of executing
        #[arg(long)]
        reset: bool,
    },

    /// Show how far a change request has progressed
    Status {
        /// Path to the change request file
        change_request: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the configured workflow steps
    Steps {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
