//! Two-input logic gates.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A two-input logic gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    /// Output high only when both inputs are high.
    And,
    /// Output high when at least one input is high.
    Or,
    /// Inverted AND.
    Nand,
    /// Inverted OR.
    Nor,
    /// Output high when the inputs differ.
    Xor,
    /// Output high when the inputs match.
    Xnor,
}

impl GateKind {
    /// Every gate, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::And,
        Self::Or,
        Self::Nand,
        Self::Nor,
        Self::Xor,
        Self::Xnor,
    ];

    /// Apply the gate.
    #[must_use]
    pub const fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Self::And => a && b,
            Self::Or => a || b,
            Self::Nand => !(a && b),
            Self::Nor => !(a || b),
            Self::Xor => a != b,
            Self::Xnor => a == b,
        }
    }

    /// The Boolean equation for this gate.
    #[must_use]
    pub const fn equation(self) -> &'static str {
        match self {
            Self::And => "Y = A · B",
            Self::Or => "Y = A + B",
            Self::Nand => "Y = (A · B)'",
            Self::Nor => "Y = (A + B)'",
            Self::Xor => "Y = A ⊕ B",
            Self::Xnor => "Y = (A ⊕ B)'",
        }
    }

    /// Upper-case gate name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Nand => "NAND",
            Self::Nor => "NOR",
            Self::Xor => "XOR",
            Self::Xnor => "XNOR",
        }
    }
}

impl std::fmt::Display for GateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown gate: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Outputs for (0,0), (0,1), (1,0), (1,1).
    fn column(gate: GateKind) -> [bool; 4] {
        [
            gate.apply(false, false),
            gate.apply(false, true),
            gate.apply(true, false),
            gate.apply(true, true),
        ]
    }

    #[test]
    fn test_gate_truth_columns() {
        assert_eq!(column(GateKind::And), [false, false, false, true]);
        assert_eq!(column(GateKind::Or), [false, true, true, true]);
        assert_eq!(column(GateKind::Nand), [true, true, true, false]);
        assert_eq!(column(GateKind::Nor), [true, false, false, false]);
        assert_eq!(column(GateKind::Xor), [false, true, true, false]);
        assert_eq!(column(GateKind::Xnor), [true, false, false, true]);
    }

    #[test]
    fn test_inverted_pairs() {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            assert_eq!(GateKind::Nand.apply(a, b), !GateKind::And.apply(a, b));
            assert_eq!(GateKind::Nor.apply(a, b), !GateKind::Or.apply(a, b));
            assert_eq!(GateKind::Xnor.apply(a, b), !GateKind::Xor.apply(a, b));
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("xor".parse::<GateKind>(), Ok(GateKind::Xor));
        assert_eq!("Nand".parse::<GateKind>(), Ok(GateKind::Nand));
        assert!("buffer".parse::<GateKind>().is_err());
    }

    #[test]
    fn test_display_matches_name() {
        for gate in GateKind::ALL {
            assert_eq!(gate.to_string(), gate.name());
        }
    }

    #[test]
    fn test_equations() {
        assert_eq!(GateKind::And.equation(), "Y = A · B");
        assert_eq!(GateKind::Xnor.equation(), "Y = (A ⊕ B)'");
    }

    #[test]
    fn test_serde_uppercase() {
        let json = serde_json::to_string(&GateKind::Nor).unwrap();
        assert_eq!(json, "\"NOR\"");
    }
}
