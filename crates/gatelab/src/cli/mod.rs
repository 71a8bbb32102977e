//! Command-line interface for gatelab.
//!
//! This module provides the CLI structure for the `gatelab` binary. The
//! handlers live in `main.rs`.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use crate::format::OutputFormat;
pub use commands::{
    CircuitArgs, ConfigCommand, PrefsCommand, SessionCommand, SetCommand, ShowCommand,
    StateCommand, StatusCommand, TableCommand, ToggleCommand,
};

/// gatelab - An interactive digital-logic workbench
///
/// Evaluate gates, adders, decoders, multiplexers, comparators and a 4-bit
/// ALU, print their truth tables, and keep your input settings between runs.
#[derive(Debug, Parser)]
#[command(name = "gatelab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the circuit catalog
    List,

    /// Evaluate a circuit and print its outputs
    Show(ShowCommand),

    /// Print a circuit's truth table
    Table(TableCommand),

    /// Flip one input of a circuit's saved state
    Toggle(ToggleCommand),

    /// Set inputs of a circuit's saved state
    Set(SetCommand),

    /// Save all-low inputs for a circuit
    Reset {
        /// Circuit id or alias
        circuit: String,
    },

    /// Work with a circuit interactively
    Session(SessionCommand),

    /// Inspect and manage saved states
    #[command(subcommand)]
    State(StateCommand),

    /// Inspect and edit preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// Show storage statistics
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub const fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}
