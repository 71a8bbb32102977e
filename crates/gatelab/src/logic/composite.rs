//! Single-bit composite arithmetic/logic unit.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::arith::{half_adder, half_subtractor};

/// Operation selected on the composite unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompositeOp {
    /// `Y = A · B`
    And,
    /// `Y = A + B`
    Or,
    /// `Y = A'`
    Not,
    /// Half adder.
    Add,
    /// Half subtractor.
    Sub,
}

impl CompositeOp {
    /// Every operation, in selector order.
    pub const ALL: [Self; 5] = [Self::And, Self::Or, Self::Not, Self::Add, Self::Sub];

    /// Upper-case operation name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Add => "ADD",
            Self::Sub => "SUB",
        }
    }

    /// Whether the operation routes through the adder/subtractor path.
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }

    /// Whether the B input takes part in the operation.
    #[must_use]
    pub const fn uses_b(self) -> bool {
        !matches!(self, Self::Not)
    }

    /// Equation shown for the operation.
    #[must_use]
    pub const fn equation(self) -> &'static str {
        match self {
            Self::And => "Y = A · B",
            Self::Or => "Y = A + B",
            Self::Not => "Y = A'",
            Self::Add => "Sum = A ⊕ B, Carry = A · B",
            Self::Sub => "Diff = A ⊕ B, Borrow = A' · B",
        }
    }
}

impl std::fmt::Display for CompositeOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompositeOp {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown operation: {s}"))
    }
}

/// Output of the composite unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeOutput {
    /// Y, Sum or Diff depending on the operation.
    pub result: bool,
    /// Carry or borrow; `None` for logic operations.
    pub carry: Option<bool>,
}

/// Evaluate the composite unit.
#[must_use]
pub const fn composite(op: CompositeOp, a: bool, b: bool) -> CompositeOutput {
    match op {
        CompositeOp::And => CompositeOutput {
            result: a && b,
            carry: None,
        },
        CompositeOp::Or => CompositeOutput {
            result: a || b,
            carry: None,
        },
        CompositeOp::Not => CompositeOutput {
            result: !a,
            carry: None,
        },
        CompositeOp::Add => {
            let out = half_adder(a, b);
            CompositeOutput {
                result: out.sum,
                carry: Some(out.carry),
            }
        }
        CompositeOp::Sub => {
            let out = half_subtractor(a, b);
            CompositeOutput {
                result: out.diff,
                carry: Some(out.borrow),
            }
        }
    }
}
