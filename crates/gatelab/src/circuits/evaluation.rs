//! Evaluation results.

use serde::Serialize;

use super::{CircuitKind, Mode};

/// A named signal level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Signal {
    /// Signal name, e.g. `Cout` or `Y5`.
    pub name: &'static str,
    /// Signal level.
    pub value: bool,
}

impl Signal {
    /// `1` or `0`.
    #[must_use]
    pub const fn bit(&self) -> char {
        if self.value {
            '1'
        } else {
            '0'
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.bit())
    }
}

/// A derived, human-readable fact about an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detail {
    /// Short label, e.g. `Selected`.
    pub label: &'static str,
    /// Rendered value.
    pub value: String,
}

impl Detail {
    pub(crate) fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Everything shown for a circuit at one input setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Circuit evaluated.
    pub circuit: CircuitKind,
    /// Selector setting, if the circuit has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Power switch position. Always on for circuits without a switch.
    pub powered: bool,
    /// Inputs read, in display order.
    pub inputs: Vec<Signal>,
    /// Outputs, in display order.
    pub outputs: Vec<Signal>,
    /// Derived values such as the selected line or the numeric result.
    pub details: Vec<Detail>,
}

impl Evaluation {
    /// Look up an output by name.
    #[must_use]
    pub fn output(&self, name: &str) -> Option<bool> {
        self.outputs.iter().find(|s| s.name == name).map(|s| s.value)
    }

    /// Look up a detail by label.
    #[must_use]
    pub fn detail(&self, label: &str) -> Option<&str> {
        self.details
            .iter()
            .find(|d| d.label == label)
            .map(|d| d.value.as_str())
    }

    /// Whether any output is high.
    #[must_use]
    pub fn any_output_high(&self) -> bool {
        self.outputs.iter().any(|s| s.value)
    }
}
