//! Circuit operating modes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::logic::{AluOp, CompositeOp, GateKind};

/// Operand width of the comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparatorWidth {
    /// Single bits A and B.
    #[serde(rename = "1-bit")]
    OneBit,
    /// Nibbles A3..A0 and B3..B0.
    #[serde(rename = "4-bit")]
    FourBit,
}

impl ComparatorWidth {
    /// Both widths.
    pub const ALL: [Self; 2] = [Self::OneBit, Self::FourBit];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OneBit => "1-bit",
            Self::FourBit => "4-bit",
        }
    }
}

impl std::fmt::Display for ComparatorWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComparatorWidth {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "1-bit" | "1bit" => Ok(Self::OneBit),
            "4" | "4-bit" | "4bit" => Ok(Self::FourBit),
            _ => Err(format!("unknown width: {s}")),
        }
    }
}

/// The selector setting of a circuit that has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Gate shown by the basic gates circuit.
    Gate(GateKind),
    /// Comparator width.
    Width(ComparatorWidth),
    /// Composite unit operation.
    Composite(CompositeOp),
    /// ALU operation.
    Alu(AluOp),
}

impl Mode {
    /// Name as shown and persisted.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gate(g) => g.name(),
            Self::Width(w) => w.name(),
            Self::Composite(op) => op.name(),
            Self::Alu(op) => op.name(),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Mode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_parse() {
        assert_eq!("4".parse::<ComparatorWidth>(), Ok(ComparatorWidth::FourBit));
        assert_eq!("1-Bit".parse::<ComparatorWidth>(), Ok(ComparatorWidth::OneBit));
        assert!("8-bit".parse::<ComparatorWidth>().is_err());
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(Mode::Gate(GateKind::Xnor).to_string(), "XNOR");
        assert_eq!(Mode::Width(ComparatorWidth::FourBit).to_string(), "4-bit");
        assert_eq!(Mode::Alu(AluOp::Dec).name(), "DEC");
    }

    #[test]
    fn test_mode_serializes_as_name() {
        let json = serde_json::to_string(&Mode::Composite(CompositeOp::Sub)).unwrap();
        assert_eq!(json, "\"SUB\"");
    }
}
