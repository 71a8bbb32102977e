//! The circuit catalog.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::mode::{ComparatorWidth, Mode};
use crate::error::{Error, Result};
use crate::logic::{AluOp, CompositeOp, GateKind};

/// One of the circuits the workbench knows how to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CircuitKind {
    /// AND, OR, NAND, NOR, XOR and XNOR on two inputs.
    BasicGates,
    /// Half adder.
    HalfAdder,
    /// Full adder.
    FullAdder,
    /// Half subtractor.
    HalfSubtractor,
    /// Full subtractor.
    FullSubtractor,
    /// 3-to-8 line decoder.
    #[serde(rename = "decoder-3to8")]
    Decoder3to8,
    /// 4:1 multiplexer.
    #[serde(rename = "mux-4to1")]
    Mux4to1,
    /// 8-to-3 priority encoder.
    PriorityEncoder,
    /// 1-bit and 4-bit magnitude comparator.
    Comparator,
    /// Single-bit arithmetic/logic unit.
    CompositeUnit,
    /// 4-bit carry look-ahead adder.
    CarryLookahead,
    /// 4-bit arithmetic logic unit.
    Alu,
}

const AB: &[&str] = &["A", "B"];
const NIBBLES: &[&str] = &["A3", "A2", "A1", "A0", "B3", "B2", "B1", "B0"];
const COMPARATOR_ALL: &[&str] = &["A", "B", "A3", "A2", "A1", "A0", "B3", "B2", "B1", "B0"];
const CLA_INPUTS: &[&str] = &["A3", "A2", "A1", "A0", "B3", "B2", "B1", "B0", "C0"];

impl CircuitKind {
    /// Every circuit, in menu order.
    pub const ALL: [Self; 12] = [
        Self::BasicGates,
        Self::HalfAdder,
        Self::FullAdder,
        Self::HalfSubtractor,
        Self::FullSubtractor,
        Self::Decoder3to8,
        Self::Mux4to1,
        Self::PriorityEncoder,
        Self::Comparator,
        Self::CompositeUnit,
        Self::CarryLookahead,
        Self::Alu,
    ];

    /// Stable identifier, used in persisted state.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::BasicGates => "basic-gates",
            Self::HalfAdder => "half-adder",
            Self::FullAdder => "full-adder",
            Self::HalfSubtractor => "half-subtractor",
            Self::FullSubtractor => "full-subtractor",
            Self::Decoder3to8 => "decoder-3to8",
            Self::Mux4to1 => "mux-4to1",
            Self::PriorityEncoder => "priority-encoder",
            Self::Comparator => "comparator",
            Self::CompositeUnit => "composite-unit",
            Self::CarryLookahead => "carry-lookahead",
            Self::Alu => "alu",
        }
    }

    /// Look up a circuit by its exact stable id.
    ///
    /// Unlike [`FromStr`], aliases, case folding and the empty route are
    /// not accepted.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    /// Short page alias. Also accepted when parsing.
    #[must_use]
    pub const fn alias(self) -> &'static str {
        match self {
            Self::BasicGates => "gates",
            Self::HalfAdder => "half-adder",
            Self::FullAdder => "full-adder",
            Self::HalfSubtractor => "half-subtractor",
            Self::FullSubtractor => "full-subtractor",
            Self::Decoder3to8 => "decoder",
            Self::Mux4to1 => "multiplexer",
            Self::PriorityEncoder => "encoder",
            Self::Comparator => "comparator",
            Self::CompositeUnit => "composite",
            Self::CarryLookahead => "cla",
            Self::Alu => "alu",
        }
    }

    /// Display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::BasicGates => "Basic Logic Gates",
            Self::HalfAdder => "Half Adder",
            Self::FullAdder => "Full Adder",
            Self::HalfSubtractor => "Half Subtractor",
            Self::FullSubtractor => "Full Subtractor",
            Self::Decoder3to8 => "3-to-8 Line Decoder",
            Self::Mux4to1 => "4:1 Multiplexer (MUX)",
            Self::PriorityEncoder => "Priority Encoder (8-to-3)",
            Self::Comparator => "Comparator (1-bit & 4-bit)",
            Self::CompositeUnit => "Composite Arithmetic-Logic Unit",
            Self::CarryLookahead => "Carry Look-Ahead Adder (4-bit)",
            Self::Alu => "4-bit Arithmetic Logic Unit (ALU)",
        }
    }

    /// A short explanation of how the circuit works.
    #[must_use]
    pub const fn principle(self) -> &'static str {
        match self {
            Self::BasicGates => {
                "Gates are the building blocks of digital logic. AND is high only when both \
                 inputs are high, OR when at least one is. NAND and NOR invert them. XOR is \
                 high when the inputs differ and XNOR when they match."
            }
            Self::HalfAdder => {
                "Adds two bits. An XOR gate produces the Sum, which is high when the inputs \
                 differ. An AND gate produces the Carry, which is high only when both are."
            }
            Self::FullAdder => {
                "Adds two bits plus a carry in. Two half adders are chained: the first adds \
                 A and B, the second adds Cin to that sum, and an OR gate merges the carries."
            }
            Self::HalfSubtractor => {
                "Subtracts B from A. XOR gives the Difference; an AND gate with A inverted \
                 raises Borrow when A=0 and B=1."
            }
            Self::FullSubtractor => {
                "Subtracts B and a borrow in from A. Two half subtractors compute A-B and \
                 then subtract Bin; an OR gate merges the two borrows."
            }
            Self::Decoder3to8 => {
                "Turns a 3-bit code into one of eight lines. Inverters and AND gates detect \
                 each code, so exactly one output is high: 101 lights Y5."
            }
            Self::Mux4to1 => {
                "Routes one of four data lines to the output. S1 and S0 form the address of \
                 the selected line; AND gates enable it and an OR gate joins the paths."
            }
            Self::PriorityEncoder => {
                "Outputs the binary index of the highest active input. D7 has top priority. \
                 V reports whether any input is active at all."
            }
            Self::Comparator => {
                "Compares two numbers and raises exactly one of Equal, Greater or Lesser. \
                 The 4-bit version cascades from the MSB down; the first differing bit \
                 decides."
            }
            Self::CompositeUnit => {
                "Combines logic (AND, OR, NOT) and arithmetic (ADD, SUB) behind one \
                 operation selector, routing the inputs through the chosen gate network."
            }
            Self::CarryLookahead => {
                "Computes all carries at once from Generate (Gi = Ai·Bi) and Propagate \
                 (Pi = Ai⊕Bi) signals instead of rippling them bit by bit."
            }
            Self::Alu => {
                "The core of a processor. Control lines pick an arithmetic (ADD, SUB, INC, \
                 DEC) or logic (AND, OR, XOR, NOT) operation; Carry, Zero and Overflow flags \
                 report on the result."
            }
        }
    }

    /// Every input name the circuit uses in any mode.
    #[must_use]
    pub const fn all_input_names(self) -> &'static [&'static str] {
        match self {
            Self::BasicGates
            | Self::HalfAdder
            | Self::HalfSubtractor
            | Self::CompositeUnit => AB,
            Self::FullAdder => &["A", "B", "Cin"],
            Self::FullSubtractor => &["A", "B", "Bin"],
            Self::Decoder3to8 => &["A2", "A1", "A0"],
            Self::Mux4to1 => &["D0", "D1", "D2", "D3", "S1", "S0"],
            Self::PriorityEncoder => &["D7", "D6", "D5", "D4", "D3", "D2", "D1", "D0"],
            Self::Comparator => COMPARATOR_ALL,
            Self::CarryLookahead => CLA_INPUTS,
            Self::Alu => NIBBLES,
        }
    }

    /// Whether the circuit has a power switch.
    #[must_use]
    pub const fn has_power_switch(self) -> bool {
        matches!(
            self,
            Self::Decoder3to8
                | Self::PriorityEncoder
                | Self::CompositeUnit
                | Self::CarryLookahead
                | Self::Alu
        )
    }

    /// The mode a fresh circuit starts in.
    #[must_use]
    pub const fn default_mode(self) -> Option<Mode> {
        match self {
            Self::BasicGates => Some(Mode::Gate(GateKind::And)),
            Self::Comparator => Some(Mode::Width(ComparatorWidth::OneBit)),
            Self::CompositeUnit => Some(Mode::Composite(CompositeOp::And)),
            Self::Alu => Some(Mode::Alu(AluOp::Add)),
            _ => None,
        }
    }

    /// All selectable modes, empty if the circuit has none.
    #[must_use]
    pub fn modes(self) -> Vec<Mode> {
        match self {
            Self::BasicGates => GateKind::ALL.into_iter().map(Mode::Gate).collect(),
            Self::Comparator => ComparatorWidth::ALL.into_iter().map(Mode::Width).collect(),
            Self::CompositeUnit => CompositeOp::ALL.into_iter().map(Mode::Composite).collect(),
            Self::Alu => AluOp::ALL.into_iter().map(Mode::Alu).collect(),
            _ => Vec::new(),
        }
    }

    /// Parse a mode name for this circuit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMode`] if the circuit has no such mode.
    pub fn parse_mode(self, text: &str) -> Result<Mode> {
        let parsed = match self {
            Self::BasicGates => text.parse().map(Mode::Gate).ok(),
            Self::Comparator => text.parse().map(Mode::Width).ok(),
            Self::CompositeUnit => text.parse().map(Mode::Composite).ok(),
            Self::Alu => text.parse().map(Mode::Alu).ok(),
            _ => None,
        };
        parsed.ok_or_else(|| Error::unknown_mode(self.id(), text))
    }
}

impl std::fmt::Display for CircuitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CircuitKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().trim_start_matches('/');
        if needle.is_empty() {
            return Ok(Self::BasicGates);
        }
        Self::ALL
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(needle) || k.alias().eq_ignore_ascii_case(needle))
            .ok_or_else(|| Error::unknown_circuit(s))
    }
}
