//! 4-bit arithmetic logic unit.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Nibble;

/// Operation selected on the ALU control lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AluOp {
    /// A + B
    Add,
    /// A - B
    Sub,
    /// A + 1
    Inc,
    /// A - 1
    Dec,
    /// A & B
    And,
    /// A | B
    Or,
    /// A ^ B
    Xor,
    /// !A
    Not,
}

impl AluOp {
    /// Every operation, in selector order.
    pub const ALL: [Self; 8] = [
        Self::Add,
        Self::Sub,
        Self::Inc,
        Self::Dec,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Not,
    ];

    /// Upper-case operation name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Inc => "INC",
            Self::Dec => "DEC",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Not => "NOT",
        }
    }

    /// ADD, SUB, INC and DEC go through the adder; the rest are bitwise.
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Inc | Self::Dec)
    }

    /// Whether operand B is read.
    #[must_use]
    pub const fn uses_b(self) -> bool {
        !matches!(self, Self::Inc | Self::Dec | Self::Not)
    }
}

impl std::fmt::Display for AluOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AluOp {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown operation: {s}"))
    }
}

/// ALU result and status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AluOutput {
    /// 4-bit result.
    pub result: Nibble,
    /// Carry out (ADD, INC) or borrow (SUB, DEC). Always clear for logic ops.
    pub carry: bool,
    /// Result is zero.
    pub zero: bool,
    /// Signed overflow. Only ADD and SUB set this flag.
    pub overflow: bool,
}

/// Evaluate the ALU.
#[must_use]
pub fn alu(op: AluOp, a: Nibble, b: Nibble) -> AluOutput {
    let (x, y) = (a.value(), b.value());
    let (result, carry, overflow) = match op {
        AluOp::Add => {
            let r = Nibble::new(x + y);
            let overflow = a.sign() == b.sign() && r.sign() != a.sign();
            (r, x + y > 15, overflow)
        }
        AluOp::Sub => {
            let r = Nibble::new(x + 16 - y);
            let overflow = a.sign() != b.sign() && r.sign() != a.sign();
            (r, x < y, overflow)
        }
        AluOp::Inc => (Nibble::new(x + 1), x == 15, false),
        AluOp::Dec => (Nibble::new(x + 15), x == 0, false),
        AluOp::And => (Nibble::new(x & y), false, false),
        AluOp::Or => (Nibble::new(x | y), false, false),
        AluOp::Xor => (Nibble::new(x ^ y), false, false),
        AluOp::Not => (Nibble::new(!x), false, false),
    };
    AluOutput {
        result,
        carry,
        zero: result.value() == 0,
        overflow,
    }
}
