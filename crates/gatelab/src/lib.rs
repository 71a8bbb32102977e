//! `gatelab` - an interactive digital-logic workbench
//!
//! This library evaluates a catalog of combinational circuits (gates, adders,
//! subtractors, a decoder, a multiplexer, a priority encoder, comparators, a
//! carry look-ahead adder and a 4-bit ALU), builds their truth tables, and
//! keeps per-circuit input settings in a local store with debounced autosave.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod autosave;
pub mod circuits;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod inputs;
pub mod logging;
pub mod logic;
pub mod session;
pub mod state;
pub mod storage;
pub mod store;
pub mod truth_table;

pub use autosave::{AutosaveStats, Autosaver, StateSink};
pub use circuits::{Circuit, CircuitKind, Evaluation, Mode};
pub use config::Config;
pub use error::{Error, Result};
pub use format::OutputFormat;
pub use inputs::InputSet;
pub use logging::init_logging;
pub use session::Session;
pub use state::{CircuitState, UserPreferences};
pub use storage::{Storage, StorageStats};
pub use store::{MemoryStore, StateStore};
pub use truth_table::TruthTable;
