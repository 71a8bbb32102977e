//! Magnitude comparators.

use super::Nibble;

/// Outputs of a comparator. Exactly one field is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    /// A = B.
    pub equal: bool,
    /// A > B.
    pub greater: bool,
    /// A < B.
    pub lesser: bool,
}

/// 1-bit comparator: `Equal = (A ⊕ B)'`, `Greater = A · B'`, `Lesser = A' · B`.
#[must_use]
pub const fn compare_bit(a: bool, b: bool) -> Comparison {
    Comparison {
        equal: a == b,
        greater: a && !b,
        lesser: !a && b,
    }
}

/// 4-bit comparator, cascading from the MSB down.
///
/// The first position where the bits differ decides the result.
#[must_use]
pub fn compare_nibble(a: Nibble, b: Nibble) -> Comparison {
    for i in (0..4).rev() {
        let stage = compare_bit(a.bit(i), b.bit(i));
        if !stage.equal {
            return stage;
        }
    }
    compare_bit(false, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_bit_table() {
        let rows = [
            (false, false, (true, false, false)),
            (false, true, (false, false, true)),
            (true, false, (false, true, false)),
            (true, true, (true, false, false)),
        ];
        for (a, b, (eq, gt, lt)) in rows {
            let c = compare_bit(a, b);
            assert_eq!((c.equal, c.greater, c.lesser), (eq, gt, lt));
        }
    }

    #[test]
    fn test_compare_nibble_matches_integer_order() {
        for a in 0..16u8 {
            for b in 0..16u8 {
                let c = compare_nibble(Nibble::new(a), Nibble::new(b));
                assert_eq!(c.equal, a == b);
                assert_eq!(c.greater, a > b);
                assert_eq!(c.lesser, a < b);
            }
        }
    }

    #[test]
    fn test_msb_takes_precedence() {
        // 1000 vs 0111: the MSB alone decides.
        let c = compare_nibble(Nibble::new(8), Nibble::new(7));
        assert!(c.greater);
    }
}
