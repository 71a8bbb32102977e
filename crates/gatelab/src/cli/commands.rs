//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::format::OutputFormat;

/// Which circuit to work on, with an optional mode and input overrides.
#[derive(Debug, Args)]
pub struct CircuitArgs {
    /// Circuit id or alias (see `gatelab list`)
    pub circuit: String,

    /// Gate, width or operation, for circuits that have one
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Set an input, as NAME=VALUE (repeatable)
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
    pub assignments: Vec<String>,

    /// Start from the latest saved state of this circuit
    #[arg(long)]
    pub saved: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// The circuit to evaluate
    #[command(flatten)]
    pub circuit: CircuitArgs,

    /// Evaluate with the power switched off
    #[arg(long)]
    pub off: bool,

    /// Save the inputs as a new state
    #[arg(long)]
    pub save: bool,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Table command arguments.
#[derive(Debug, Args)]
pub struct TableCommand {
    /// The circuit to tabulate
    #[command(flatten)]
    pub circuit: CircuitArgs,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Toggle command arguments.
#[derive(Debug, Args)]
pub struct ToggleCommand {
    /// Circuit id or alias
    pub circuit: String,

    /// Input to flip
    pub input: String,
}

/// Set command arguments.
#[derive(Debug, Args)]
pub struct SetCommand {
    /// Circuit id or alias
    pub circuit: String,

    /// Assignments, as NAME=VALUE
    #[arg(required = true, value_name = "NAME=VALUE")]
    pub assignments: Vec<String>,

    /// Also change the mode
    #[arg(short, long)]
    pub mode: Option<String>,
}

/// Session command arguments.
#[derive(Debug, Args)]
pub struct SessionCommand {
    /// Circuit id or alias (defaults to the last visited circuit)
    pub circuit: Option<String>,

    /// Start from all-low inputs instead of the last saved state
    #[arg(long)]
    pub fresh: bool,

    /// Disable autosave for this session
    #[arg(long)]
    pub no_autosave: bool,
}

/// Saved state commands.
#[derive(Debug, Subcommand)]
pub enum StateCommand {
    /// List saved states, newest first
    List {
        /// Only states of this circuit
        #[arg(long)]
        circuit: Option<String>,

        /// Maximum number of states
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show one state as JSON
    Show {
        /// State id
        id: String,
    },

    /// Show the latest state of a circuit as JSON
    Latest {
        /// Circuit id or alias
        circuit: String,
    },

    /// Delete a state
    Delete {
        /// State id
        id: String,
    },

    /// Apply the configured retention limits now
    Prune {
        /// Keep at most this many states (overrides config)
        #[arg(long)]
        keep: Option<usize>,

        /// Delete states older than this many days (overrides config)
        #[arg(long)]
        older_than_days: Option<u32>,
    },
}

/// Preference commands.
#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Show the preferences record as JSON
    Show,

    /// Record a circuit as last visited
    Visit {
        /// Circuit id or alias
        circuit: String,
    },

    /// Forget the last visited circuit
    ClearLast,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
