//! Interactive sessions with a single circuit.

use std::str::FromStr;

use crate::circuits::{Circuit, Evaluation};
use crate::error::{Error, Result};
use crate::inputs::{parse_bit, InputSet};
use crate::state::CircuitState;
use crate::truth_table::TruthTable;

/// Help text listing the session commands.
pub const HELP: &str = "\
Commands:
  toggle NAME        flip an input (alias: t)
  set NAME VALUE     set an input; VALUE is 1/0, on/off, high/low (also NAME=VALUE)
  mode NAME          select the gate or operation
  power on|off       switch power, on circuits that have a switch
  reset              all inputs low, power on
  show               print the current outputs
  table              print the truth table
  help               this text
  quit               leave the session";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Flip one input.
    Toggle(String),
    /// Set one input.
    Set(String, bool),
    /// Change the selector setting.
    Mode(String),
    /// Switch the power.
    Power(bool),
    /// Clear inputs and restore power.
    Reset,
    /// Print the outputs.
    Show,
    /// Print the truth table.
    Table,
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&verb, args)) = words.split_first() else {
            return Ok(Self::Show);
        };
        let command = match (verb.to_ascii_lowercase().as_str(), args) {
            ("toggle" | "t", [name]) => Self::Toggle((*name).to_string()),
            ("set", [assignment]) => {
                let (name, value) = InputSet::parse_assignment(assignment)?;
                Self::Set(name, value)
            }
            ("set", [name, value]) => {
                let value = parse_bit(value).ok_or_else(|| Error::invalid_assignment(*value))?;
                Self::Set((*name).to_string(), value)
            }
            ("mode" | "m", [mode]) => Self::Mode((*mode).to_string()),
            ("power" | "p", [state]) => match parse_bit(state) {
                Some(on) => Self::Power(on),
                None => return Err(Error::UnknownCommand(line.trim().to_string())),
            },
            ("reset" | "r", []) => Self::Reset,
            ("show" | "s", []) => Self::Show,
            ("table", []) => Self::Table,
            ("help" | "h" | "?", []) => Self::Help,
            ("quit" | "exit" | "q", []) => Self::Quit,
            _ => return Err(Error::UnknownCommand(line.trim().to_string())),
        };
        Ok(command)
    }
}

/// What the front end should display after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The evaluation.
    Evaluation,
    /// The truth table.
    Table,
    /// The help text.
    Help,
    /// Nothing; the session is over.
    Quit,
}

/// Result of applying a command.
#[derive(Debug, Clone)]
pub struct Response {
    /// The circuit re-evaluated after the command.
    pub evaluation: Evaluation,
    /// Snapshot to persist, when inputs or mode changed.
    pub snapshot: Option<CircuitState>,
    /// What to show.
    pub view: View,
}

/// A live interaction with one circuit.
#[derive(Debug, Clone)]
pub struct Session {
    circuit: Circuit,
    inputs: InputSet,
    powered: bool,
}

impl Session {
    /// Start with every input low and the power on.
    #[must_use]
    pub fn new(circuit: Circuit) -> Self {
        Self {
            circuit,
            inputs: InputSet::all_low(circuit.kind().all_input_names()),
            powered: true,
        }
    }

    /// Resume from a saved state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state fails validation.
    pub fn restore(state: &CircuitState) -> Result<Self> {
        state.validate()?;
        let mut session = Self::new(state.circuit()?);
        session.inputs.merge(&state.inputs);
        tracing::debug!(id = %state.id, "Restored session state");
        Ok(session)
    }

    /// The circuit and its current mode.
    #[must_use]
    pub const fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Current input levels.
    #[must_use]
    pub const fn inputs(&self) -> &InputSet {
        &self.inputs
    }

    /// Power switch position.
    #[must_use]
    pub const fn powered(&self) -> bool {
        self.powered
    }

    /// Evaluate the circuit at the current settings.
    #[must_use]
    pub fn evaluate(&self) -> Evaluation {
        self.circuit.evaluate(&self.inputs, self.powered)
    }

    /// Truth table for the current mode, highlighting the current inputs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableTooLarge`] past `max_inputs`.
    pub fn table(&self, max_inputs: usize) -> Result<TruthTable> {
        TruthTable::build(&self.circuit, &self.inputs, max_inputs)
    }

    /// A snapshot of the current settings.
    #[must_use]
    pub fn snapshot(&self) -> CircuitState {
        CircuitState::of(&self.circuit, self.inputs.clone())
    }

    /// Flip an input and return its new level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownInput`] if the circuit has no such input in
    /// its current mode.
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        let name = self.resolve_input(name)?;
        Ok(self.inputs.toggle(name))
    }

    /// Set an input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownInput`] if the circuit has no such input in
    /// its current mode.
    pub fn set(&mut self, name: &str, value: bool) -> Result<()> {
        let name = self.resolve_input(name)?;
        self.inputs.set(name, value);
        Ok(())
    }

    /// Change the selector setting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMode`] for a mode the circuit doesn't have.
    pub fn set_mode(&mut self, mode: &str) -> Result<()> {
        self.circuit.set_mode(mode)
    }

    /// Switch the power.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PowerNotSupported`] if the circuit has no switch.
    pub fn set_power(&mut self, on: bool) -> Result<()> {
        if !self.circuit.kind().has_power_switch() {
            return Err(Error::PowerNotSupported {
                circuit: self.circuit.kind().id().to_string(),
            });
        }
        self.powered = on;
        Ok(())
    }

    /// All inputs low, power on. The mode is kept.
    pub fn reset(&mut self) {
        self.inputs = InputSet::all_low(self.circuit.kind().all_input_names());
        self.powered = true;
    }

    /// Apply a command and re-evaluate.
    ///
    /// # Errors
    ///
    /// Returns the validation error of a rejected command; the session is
    /// left unchanged.
    pub fn apply(&mut self, command: Command) -> Result<Response> {
        let (changed, view) = match command {
            Command::Toggle(name) => {
                self.toggle(&name)?;
                (true, View::Evaluation)
            }
            Command::Set(name, value) => {
                self.set(&name, value)?;
                (true, View::Evaluation)
            }
            Command::Mode(mode) => {
                self.set_mode(&mode)?;
                (true, View::Evaluation)
            }
            Command::Power(on) => {
                self.set_power(on)?;
                (false, View::Evaluation)
            }
            Command::Reset => {
                self.reset();
                (true, View::Evaluation)
            }
            Command::Show => (false, View::Evaluation),
            Command::Table => (false, View::Table),
            Command::Help => (false, View::Help),
            Command::Quit => (false, View::Quit),
        };
        Ok(Response {
            evaluation: self.evaluate(),
            snapshot: changed.then(|| self.snapshot()),
            view,
        })
    }

    /// Parse and apply one line of input.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error.
    pub fn execute(&mut self, line: &str) -> Result<Response> {
        let command: Command = line.parse()?;
        self.apply(command)
    }

    /// Match an input name of the current mode, ignoring case.
    fn resolve_input(&self, name: &str) -> Result<&'static str> {
        self.circuit
            .input_names()
            .iter()
            .find(|n| n.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| Error::unknown_input(self.circuit.kind().id(), name))
    }
}
