//! Line selection circuits: decoder, multiplexer and priority encoder.

/// 3-to-8 line decoder. Exactly one of the eight outputs is high.
#[must_use]
pub fn decode_3to8(a2: bool, a1: bool, a0: bool) -> [bool; 8] {
    let index = line_index(&[a2, a1, a0]);
    std::array::from_fn(|i| i == index)
}

/// Result of routing a data line through a multiplexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MuxOutput {
    /// Index of the selected data line.
    pub selected: usize,
    /// Value on the output line.
    pub y: bool,
}

/// 4:1 multiplexer: `Y = S1'·S0'·D0 + S1'·S0·D1 + S1·S0'·D2 + S1·S0·D3`.
#[must_use]
pub fn mux_4to1(data: [bool; 4], s1: bool, s0: bool) -> MuxOutput {
    let selected = line_index(&[s1, s0]);
    MuxOutput {
        selected,
        y: data[selected],
    }
}

/// Outputs of the 8-to-3 priority encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderOutput {
    /// Code bit 2.
    pub a2: bool,
    /// Code bit 1.
    pub a1: bool,
    /// Code bit 0.
    pub a0: bool,
    /// Any input active.
    pub valid: bool,
}

impl EncoderOutput {
    /// The encoded line number, if any input was active.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        self.valid.then(|| line_index(&[self.a2, self.a1, self.a0]))
    }
}

/// 8-to-3 priority encoder. `data[i]` is line `Di`; D7 wins over everything.
#[must_use]
pub fn priority_encode(data: [bool; 8]) -> EncoderOutput {
    match (0..8).rev().find(|&i| data[i]) {
        Some(i) => EncoderOutput {
            a2: i & 4 != 0,
            a1: i & 2 != 0,
            a0: i & 1 != 0,
            valid: true,
        },
        None => EncoderOutput::default(),
    }
}

/// Interpret MSB-first bits as an unsigned index.
#[must_use]
pub fn line_index(bits_msb_first: &[bool]) -> usize {
    bits_msb_first
        .iter()
        .fold(0, |acc, &bit| (acc << 1) | usize::from(bit))
}
