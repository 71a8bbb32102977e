//! 4-bit carry look-ahead adder.

use super::Nibble;

/// Every internal and external signal of the look-ahead adder.
///
/// Arrays are indexed by bit position, LSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LookaheadOutput {
    /// `Pi = Ai ⊕ Bi`
    pub propagate: [bool; 4],
    /// `Gi = Ai · Bi`
    pub generate: [bool; 4],
    /// `C0..C4`, where `C0` is the carry in and `C4` the carry out.
    pub carries: [bool; 5],
    /// `Si = Pi ⊕ Ci`
    pub sum: [bool; 4],
}

impl LookaheadOutput {
    /// Carry out of the most significant stage.
    #[must_use]
    pub const fn carry_out(&self) -> bool {
        self.carries[4]
    }

    /// The sum bits as a nibble.
    #[must_use]
    pub const fn sum_value(&self) -> Nibble {
        Nibble::from_bits(self.sum[3], self.sum[2], self.sum[1], self.sum[0])
    }
}

/// Add two nibbles with every carry computed in parallel from G, P and C0.
///
/// Each carry is the flattened two-level sum of products, so no carry depends
/// on another carry:
///
/// ```text
/// C1 = G0 + P0·C0
/// C2 = G1 + P1·G0 + P1·P0·C0
/// C3 = G2 + P2·G1 + P2·P1·G0 + P2·P1·P0·C0
/// C4 = G3 + P3·G2 + P3·P2·G1 + P3·P2·P1·G0 + P3·P2·P1·P0·C0
/// ```
#[must_use]
pub fn carry_lookahead(a: Nibble, b: Nibble, c0: bool) -> LookaheadOutput {
    let a = a.bits_lsb_first();
    let b = b.bits_lsb_first();
    let p: [bool; 4] = std::array::from_fn(|i| a[i] != b[i]);
    let g: [bool; 4] = std::array::from_fn(|i| a[i] && b[i]);

    let c1 = g[0] || (p[0] && c0);
    let c2 = g[1] || (p[1] && g[0]) || (p[1] && p[0] && c0);
    let c3 = g[2] || (p[2] && g[1]) || (p[2] && p[1] && g[0]) || (p[2] && p[1] && p[0] && c0);
    let c4 = g[3]
        || (p[3] && g[2])
        || (p[3] && p[2] && g[1])
        || (p[3] && p[2] && p[1] && g[0])
        || (p[3] && p[2] && p[1] && p[0] && c0);

    let carries = [c0, c1, c2, c3, c4];
    let sum = std::array::from_fn(|i| p[i] != carries[i]);

    LookaheadOutput {
        propagate: p,
        generate: g,
        carries,
        sum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::arith::full_adder;

    #[test]
    fn test_exhaustive_against_integer_addition() {
        for a in 0..16u8 {
            for b in 0..16u8 {
                for c0 in [false, true] {
                    let out = carry_lookahead(Nibble::new(a), Nibble::new(b), c0);
                    let total = a + b + u8::from(c0);
                    assert_eq!(out.sum_value().value(), total & 0xF, "{a}+{b}+{c0}");
                    assert_eq!(out.carry_out(), total > 15, "{a}+{b}+{c0}");
                }
            }
        }
    }

    #[test]
    fn test_matches_ripple_carry() {
        for a in 0..16u8 {
            for b in 0..16u8 {
                let out = carry_lookahead(Nibble::new(a), Nibble::new(b), true);
                let (na, nb) = (Nibble::new(a), Nibble::new(b));
                let mut carry = true;
                for i in 0..4u8 {
                    let stage = full_adder(na.bit(i), nb.bit(i), carry);
                    assert_eq!(out.sum[usize::from(i)], stage.sum);
                    carry = stage.carry;
                    assert_eq!(out.carries[usize::from(i) + 1], carry);
                }
            }
        }
    }

    #[test]
    fn test_propagate_and_generate() {
        let out = carry_lookahead(Nibble::new(0b1100), Nibble::new(0b1010), false);
        assert_eq!(out.propagate, [false, true, true, false]);
        assert_eq!(out.generate, [false, false, false, true]);
    }

    #[test]
    fn test_carry_in_passes_through_c0() {
        let out = carry_lookahead(Nibble::ZERO, Nibble::ZERO, true);
        assert!(out.carries[0]);
        assert_eq!(out.sum_value().value(), 1);
    }
}
