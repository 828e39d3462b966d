//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SPIF: definition checker for the netCDF imaging-probe standard
#[derive(Parser)]
#[command(name = "spif")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a definition file against the standard
    Check {
        /// Path to the definition file (JSON/YAML)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },
}
