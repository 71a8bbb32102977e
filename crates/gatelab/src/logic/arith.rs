//! Single-bit adder and subtractor cells.

/// Outputs of a single-bit addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddBit {
    /// Sum bit.
    pub sum: bool,
    /// Carry out.
    pub carry: bool,
}

/// Outputs of a single-bit subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubBit {
    /// Difference bit.
    pub diff: bool,
    /// Borrow out.
    pub borrow: bool,
}

/// Half adder: `Sum = A ⊕ B`, `Carry = A · B`.
#[must_use]
pub const fn half_adder(a: bool, b: bool) -> AddBit {
    AddBit {
        sum: a != b,
        carry: a && b,
    }
}

/// Full adder built from two half adders and an OR gate.
///
/// `Sum = A ⊕ B ⊕ Cin`, `Cout = A · B + Cin · (A ⊕ B)`.
#[must_use]
pub const fn full_adder(a: bool, b: bool, cin: bool) -> AddBit {
    let first = half_adder(a, b);
    let second = half_adder(first.sum, cin);
    AddBit {
        sum: second.sum,
        carry: first.carry || second.carry,
    }
}

/// Half subtractor: `Diff = A ⊕ B`, `Borrow = A' · B`.
#[must_use]
pub const fn half_subtractor(a: bool, b: bool) -> SubBit {
    SubBit {
        diff: a != b,
        borrow: !a && b,
    }
}

/// Full subtractor built from two half subtractors and an OR gate.
///
/// `Diff = A ⊕ B ⊕ Bin`, `Bout = A' · B + Bin · (A ⊕ B)'`.
#[must_use]
pub const fn full_subtractor(a: bool, b: bool, bin: bool) -> SubBit {
    let first = half_subtractor(a, b);
    let second = half_subtractor(first.diff, bin);
    SubBit {
        diff: second.diff,
        borrow: first.borrow || second.borrow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(b: bool) -> i8 {
        i8::from(b)
    }

    #[test]
    fn test_half_adder_table() {
        assert_eq!(half_adder(false, false), AddBit { sum: false, carry: false });
        assert_eq!(half_adder(false, true), AddBit { sum: true, carry: false });
        assert_eq!(half_adder(true, false), AddBit { sum: true, carry: false });
        assert_eq!(half_adder(true, true), AddBit { sum: false, carry: true });
    }

    #[test]
    fn test_full_adder_is_arithmetic_sum() {
        for bits in 0..8u8 {
            let (a, b, c) = (bits & 4 != 0, bits & 2 != 0, bits & 1 != 0);
            let out = full_adder(a, b, c);
            let total = n(a) + n(b) + n(c);
            assert_eq!(n(out.sum) + 2 * n(out.carry), total, "inputs {a} {b} {c}");
        }
    }

    #[test]
    fn test_full_adder_matches_equation() {
        for bits in 0..8u8 {
            let (a, b, c) = (bits & 4 != 0, bits & 2 != 0, bits & 1 != 0);
            let out = full_adder(a, b, c);
            assert_eq!(out.carry, (a && b) || (c && (a != b)));
        }
    }

    #[test]
    fn test_half_subtractor_table() {
        assert_eq!(half_subtractor(false, false), SubBit { diff: false, borrow: false });
        assert_eq!(half_subtractor(false, true), SubBit { diff: true, borrow: true });
        assert_eq!(half_subtractor(true, false), SubBit { diff: true, borrow: false });
        assert_eq!(half_subtractor(true, true), SubBit { diff: false, borrow: false });
    }

    #[test]
    fn test_full_subtractor_table() {
        // Rows for A B Bin -> Diff Bout.
        let expected = [
            (false, false),
            (true, true),
            (true, true),
            (false, true),
            (true, false),
            (false, false),
            (false, false),
            (true, true),
        ];
        for (bits, want) in expected.iter().enumerate() {
            let a = bits & 4 != 0;
            let b = bits & 2 != 0;
            let bin = bits & 1 != 0;
            let out = full_subtractor(a, b, bin);
            assert_eq!((out.diff, out.borrow), *want, "row {bits}");
        }
    }

    #[test]
    fn test_full_subtractor_is_arithmetic_difference() {
        for bits in 0..8u8 {
            let (a, b, bin) = (bits & 4 != 0, bits & 2 != 0, bits & 1 != 0);
            let out = full_subtractor(a, b, bin);
            assert_eq!(n(out.diff) - 2 * n(out.borrow), n(a) - n(b) - n(bin));
        }
    }
}
