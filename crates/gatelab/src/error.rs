//! Error types for gatelab.
//!
//! This module defines all error types used throughout the gatelab crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for gatelab operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Input Validation Errors ===
    /// The named circuit does not exist.
    #[error("unknown circuit '{name}'")]
    UnknownCircuit {
        /// The name that failed to resolve.
        name: String,
    },

    /// The circuit has no input with this name.
    #[error("circuit '{circuit}' has no input named '{name}'")]
    UnknownInput {
        /// Circuit identifier.
        circuit: String,
        /// The offending input name.
        name: String,
    },

    /// The mode is not one the circuit understands.
    #[error("circuit '{circuit}' has no mode '{mode}'")]
    UnknownMode {
        /// Circuit identifier.
        circuit: String,
        /// The requested mode.
        mode: String,
    },

    /// An input assignment could not be parsed.
    #[error("invalid input assignment '{text}' (expected NAME=VALUE)")]
    InvalidAssignment {
        /// The raw assignment text.
        text: String,
    },

    /// The circuit has no power switch.
    #[error("circuit '{circuit}' has no power switch")]
    PowerNotSupported {
        /// Circuit identifier.
        circuit: String,
    },

    /// Enumerating the truth table would exceed the configured size.
    #[error("truth table for '{circuit}' needs {inputs} inputs, limit is {max}")]
    TableTooLarge {
        /// Circuit identifier.
        circuit: String,
        /// Number of enumerated inputs.
        inputs: usize,
        /// Configured maximum.
        max: usize,
    },

    /// An unrecognised session command.
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    // === State Errors ===
    /// A circuit state failed validation.
    #[error("invalid circuit state: {message}")]
    StateValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// No circuit state with the given id.
    #[error("circuit state not found: {id}")]
    StateNotFound {
        /// The missing id.
        id: String,
    },

    /// The autosave worker failed.
    #[error("autosave failed: {0}")]
    Autosave(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for gatelab operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an unknown circuit error.
    #[must_use]
    pub fn unknown_circuit(name: impl Into<String>) -> Self {
        Self::UnknownCircuit { name: name.into() }
    }

    /// Create an unknown input error.
    #[must_use]
    pub fn unknown_input(circuit: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownInput {
            circuit: circuit.into(),
            name: name.into(),
        }
    }

    /// Create an unknown mode error.
    #[must_use]
    pub fn unknown_mode(circuit: impl Into<String>, mode: impl Into<String>) -> Self {
        Self::UnknownMode {
            circuit: circuit.into(),
            mode: mode.into(),
        }
    }

    /// Create an invalid assignment error.
    #[must_use]
    pub fn invalid_assignment(text: impl Into<String>) -> Self {
        Self::InvalidAssignment { text: text.into() }
    }

    /// Create a state validation error.
    #[must_use]
    pub fn state_validation(message: impl Into<String>) -> Self {
        Self::StateValidation {
            message: message.into(),
        }
    }

    /// Create an autosave error.
    #[must_use]
    pub fn autosave(message: impl Into<String>) -> Self {
        Self::Autosave(message.into())
    }

    /// Create a state not found error.
    #[must_use]
    pub fn state_not_found(id: impl Into<String>) -> Self {
        Self::StateNotFound { id: id.into() }
    }

    /// Check if this error comes from bad user input rather than the system.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCircuit { .. }
                | Self::UnknownInput { .. }
                | Self::UnknownMode { .. }
                | Self::InvalidAssignment { .. }
                | Self::PowerNotSupported { .. }
                | Self::TableTooLarge { .. }
                | Self::UnknownCommand(_)
                | Self::StateValidation { .. }
        )
    }
}
