//! Persisted UI state.
//!
//! These types define the JSON shape of saved state, so field names are
//! camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::circuits::{Circuit, CircuitKind, Mode};
use crate::error::{Error, Result};
use crate::inputs::InputSet;

/// A snapshot of one circuit's inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitState {
    /// `<circuit-type>-<timestamp-ms>` unless supplied by the caller.
    pub id: String,

    /// Which circuit the inputs belong to.
    pub circuit_type: CircuitKind,

    /// Input levels by name.
    pub inputs: InputSet,

    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,

    /// Selector setting, for circuits that have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl CircuitState {
    /// Snapshot the given inputs, stamped with the current time.
    #[must_use]
    pub fn capture(kind: CircuitKind, mode: Option<Mode>, inputs: InputSet) -> Self {
        Self::at(kind, mode, inputs, Utc::now().timestamp_millis())
    }

    /// Snapshot the given inputs at an explicit timestamp.
    #[must_use]
    pub fn at(kind: CircuitKind, mode: Option<Mode>, inputs: InputSet, timestamp: i64) -> Self {
        Self {
            id: format!("{}-{timestamp}", kind.id()),
            circuit_type: kind,
            inputs,
            timestamp,
            mode: mode.map(|m| m.name().to_string()),
        }
    }

    /// Snapshot a circuit in its current mode.
    #[must_use]
    pub fn of(circuit: &Circuit, inputs: InputSet) -> Self {
        Self::capture(circuit.kind(), circuit.mode(), inputs)
    }

    /// Check the id and that every input belongs to the circuit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateValidation`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::state_validation("id must not be empty"));
        }
        self.inputs
            .validate_for(self.circuit_type)
            .map_err(|e| Error::state_validation(e.to_string()))?;
        if let Some(mode) = &self.mode {
            self.circuit_type
                .parse_mode(mode)
                .map_err(|e| Error::state_validation(e.to_string()))?;
        }
        Ok(())
    }

    /// Rebuild the circuit this state was saved from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMode`] if the saved mode no longer parses.
    pub fn circuit(&self) -> Result<Circuit> {
        Circuit::with_mode(self.circuit_type, self.mode.as_deref())
    }

    /// BLAKE3 digest of circuit type, mode and every input of the circuit.
    ///
    /// The id and timestamp are not included, so two saves of the same
    /// settings share a fingerprint. Inputs are hashed over the circuit's
    /// full input list with unset names read as low, so a sparse map and
    /// its all-low expansion fingerprint the same.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.circuit_type.id().as_bytes());
        hasher.update(b"\0");
        hasher.update(self.mode.as_deref().unwrap_or("").as_bytes());
        for name in self.circuit_type.all_input_names() {
            hasher.update(b"\0");
            hasher.update(name.as_bytes());
            hasher.update(if self.inputs.get(name) { b"=1" } else { b"=0" });
        }
        hasher.finalize().to_hex().to_string()
    }

    /// Every input of the circuit as `A=1 B=0`, unset names low.
    #[must_use]
    pub fn describe_inputs(&self) -> String {
        self.inputs.describe(self.circuit_type.all_input_names())
    }

    /// The timestamp as a date, if it is in range.
    #[must_use]
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// The single user preferences record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Opaque user identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Circuit most recently opened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visited_circuit: Option<CircuitKind>,

    /// States the user pinned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_states: Option<Vec<CircuitState>>,
}

impl UserPreferences {
    /// Preferences recording a visit to `kind`, keeping everything else.
    #[must_use]
    pub fn visited(mut self, kind: CircuitKind) -> Self {
        self.last_visited_circuit = Some(kind);
        self
    }
}
