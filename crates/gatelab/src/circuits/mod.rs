//! The circuit catalog and evaluator.
//!
//! A [`Circuit`] is a [`CircuitKind`] plus its selector setting. Evaluating
//! one reads named inputs from an [`InputSet`], dispatches to the pure
//! functions in [`crate::logic`] and names the results.

mod evaluation;
mod kind;
mod mode;

pub use evaluation::{Detail, Evaluation, Signal};
pub use kind::CircuitKind;
pub use mode::{ComparatorWidth, Mode};

use crate::error::Result;
use crate::inputs::InputSet;
use crate::logic::{
    alu, carry_lookahead, compare_bit, compare_nibble, composite, decode_3to8, full_adder,
    full_subtractor, half_adder, half_subtractor, line_index, mux_4to1, priority_encode, AluOp,
    Comparison, CompositeOp, GateKind, Nibble,
};

const A_NIBBLE: [&str; 4] = ["A3", "A2", "A1", "A0"];
const B_NIBBLE: [&str; 4] = ["B3", "B2", "B1", "B0"];

const DECODER_OUTPUTS: &[&str] = &["Y0", "Y1", "Y2", "Y3", "Y4", "Y5", "Y6", "Y7"];

const DECODER_EQUATIONS: &[&str] = &[
    "Y0 = A2' · A1' · A0'",
    "Y1 = A2' · A1' · A0",
    "Y2 = A2' · A1 · A0'",
    "Y3 = A2' · A1 · A0",
    "Y4 = A2 · A1' · A0'",
    "Y5 = A2 · A1' · A0",
    "Y6 = A2 · A1 · A0'",
    "Y7 = A2 · A1 · A0",
];

const ENCODER_EQUATIONS: &[&str] = &[
    "A2 = D7 + D6 + D5 + D4",
    "A1 = D7 + D6 + D5' · D4' · (D3 + D2)",
    "A0 = D7 + D6' · D5 + D6' · D4' · D3 + D6' · D4' · D2' · D1",
    "V = D7 + D6 + D5 + D4 + D3 + D2 + D1 + D0",
];

const CLA_EQUATIONS: &[&str] = &[
    "Pi = Ai ⊕ Bi",
    "Gi = Ai · Bi",
    "C1 = G0 + P0·C0",
    "C2 = G1 + P1·G0 + P1·P0·C0",
    "C3 = G2 + P2·G1 + P2·P1·G0 + P2·P1·P0·C0",
    "C4 = G3 + P3·G2 + P3·P2·G1 + P3·P2·P1·G0 + P3·P2·P1·P0·C0",
    "Si = Pi ⊕ Ci",
];

/// A circuit with its current selector setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Circuit {
    kind: CircuitKind,
    mode: Option<Mode>,
}

impl Circuit {
    /// A circuit in its default mode.
    #[must_use]
    pub const fn new(kind: CircuitKind) -> Self {
        Self {
            kind,
            mode: kind.default_mode(),
        }
    }

    /// A circuit in the named mode, or the default mode for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownMode`] if the circuit has no such mode.
    pub fn with_mode(kind: CircuitKind, mode: Option<&str>) -> Result<Self> {
        let mut circuit = Self::new(kind);
        if let Some(text) = mode {
            circuit.set_mode(text)?;
        }
        Ok(circuit)
    }

    /// Change the selector setting.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownMode`] if the circuit has no such mode.
    pub fn set_mode(&mut self, text: &str) -> Result<()> {
        self.mode = Some(self.kind.parse_mode(text)?);
        Ok(())
    }

    /// Which circuit this is.
    #[must_use]
    pub const fn kind(&self) -> CircuitKind {
        self.kind
    }

    /// Current selector setting.
    #[must_use]
    pub const fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Display title of the circuit.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// How the circuit works, in a few sentences.
    #[must_use]
    pub const fn principle(&self) -> &'static str {
        self.kind.principle()
    }

    /// Input names in the current mode, MSB first where it matters.
    #[must_use]
    pub fn input_names(&self) -> &'static [&'static str] {
        match (self.kind, self.mode) {
            (CircuitKind::Comparator, Some(Mode::Width(ComparatorWidth::OneBit))) => &["A", "B"],
            (CircuitKind::Comparator, _) => {
                &["A3", "A2", "A1", "A0", "B3", "B2", "B1", "B0"]
            }
            (CircuitKind::CompositeUnit, Some(Mode::Composite(CompositeOp::Not))) => &["A"],
            (CircuitKind::Alu, Some(Mode::Alu(op))) if !op.uses_b() => &A_NIBBLE,
            (kind, _) => kind.all_input_names(),
        }
    }

    /// Output names in the current mode.
    #[must_use]
    pub fn output_names(&self) -> &'static [&'static str] {
        match self.kind {
            CircuitKind::BasicGates | CircuitKind::Mux4to1 => &["Y"],
            CircuitKind::HalfAdder => &["Sum", "Carry"],
            CircuitKind::FullAdder => &["Sum", "Cout"],
            CircuitKind::HalfSubtractor => &["Diff", "Borrow"],
            CircuitKind::FullSubtractor => &["Diff", "Bout"],
            CircuitKind::Decoder3to8 => DECODER_OUTPUTS,
            CircuitKind::PriorityEncoder => &["A2", "A1", "A0", "V"],
            CircuitKind::Comparator => &["Equal", "Greater", "Lesser"],
            CircuitKind::CompositeUnit => match self.composite_op() {
                CompositeOp::Add => &["Sum", "Carry"],
                CompositeOp::Sub => &["Diff", "Borrow"],
                _ => &["Y"],
            },
            CircuitKind::CarryLookahead => &["S3", "S2", "S1", "S0", "C4"],
            CircuitKind::Alu => &["R3", "R2", "R1", "R0", "Carry", "Zero", "Overflow"],
        }
    }

    /// Boolean equations for the current mode.
    #[must_use]
    pub fn equations(&self) -> Vec<&'static str> {
        match self.kind {
            CircuitKind::BasicGates => vec![self.gate().equation()],
            CircuitKind::HalfAdder => vec!["Sum = A ⊕ B", "Carry = A · B"],
            CircuitKind::FullAdder => {
                vec!["Sum = A ⊕ B ⊕ Cin", "Cout = (A · B) + (Cin · (A ⊕ B))"]
            }
            CircuitKind::HalfSubtractor => vec!["Diff = A ⊕ B", "Borrow = A' · B"],
            CircuitKind::FullSubtractor => {
                vec!["Diff = A ⊕ B ⊕ Bin", "Bout = (A' · B) + (Bin · (A ⊕ B)')"]
            }
            CircuitKind::Decoder3to8 => DECODER_EQUATIONS.to_vec(),
            CircuitKind::Mux4to1 => vec!["Y = S1'·S0'·D0 + S1'·S0·D1 + S1·S0'·D2 + S1·S0·D3"],
            CircuitKind::PriorityEncoder => ENCODER_EQUATIONS.to_vec(),
            CircuitKind::Comparator => match self.mode {
                Some(Mode::Width(ComparatorWidth::OneBit)) => {
                    vec!["Equal = (A ⊕ B)'", "Greater = A · B'", "Lesser = A' · B"]
                }
                _ => vec![
                    "Xi = (Ai ⊕ Bi)'",
                    "Equal = X3 · X2 · X1 · X0",
                    "Greater = A3·B3' + X3·A2·B2' + X3·X2·A1·B1' + X3·X2·X1·A0·B0'",
                    "Lesser = A3'·B3 + X3·A2'·B2 + X3·X2·A1'·B1 + X3·X2·X1·A0'·B0",
                ],
            },
            CircuitKind::CompositeUnit => vec![self.composite_op().equation()],
            CircuitKind::CarryLookahead => CLA_EQUATIONS.to_vec(),
            CircuitKind::Alu => {
                let result = match self.alu_op() {
                    AluOp::Add => "R = A + B (mod 16)",
                    AluOp::Sub => "R = A - B (mod 16)",
                    AluOp::Inc => "R = A + 1 (mod 16)",
                    AluOp::Dec => "R = A - 1 (mod 16)",
                    AluOp::And => "Ri = Ai · Bi",
                    AluOp::Or => "Ri = Ai + Bi",
                    AluOp::Xor => "Ri = Ai ⊕ Bi",
                    AluOp::Not => "Ri = Ai'",
                };
                vec![
                    result,
                    "Carry = carry or borrow out of bit 3",
                    "Zero = (R3 + R2 + R1 + R0)'",
                    "Overflow = signed overflow (ADD, SUB only)",
                ]
            }
        }
    }

    /// Output levels for a powered circuit, in [`Self::output_names`] order.
    #[must_use]
    pub fn outputs(&self, inputs: &InputSet) -> Vec<bool> {
        self.compute(inputs, false).0
    }

    /// Evaluate the circuit.
    ///
    /// `powered` only matters for circuits with a power switch; when off,
    /// every output is low.
    #[must_use]
    pub fn evaluate(&self, inputs: &InputSet, powered: bool) -> Evaluation {
        let powered = powered || !self.kind.has_power_switch();
        let (values, details) = if powered {
            self.compute(inputs, true)
        } else {
            (
                vec![false; self.output_names().len()],
                vec![Detail::new("Power", "OFF")],
            )
        };
        Evaluation {
            circuit: self.kind,
            mode: self.mode,
            powered,
            inputs: signals(self.input_names(), &inputs.bits(self.input_names())),
            outputs: signals(self.output_names(), &values),
            details,
        }
    }

    fn gate(&self) -> GateKind {
        match self.mode {
            Some(Mode::Gate(g)) => g,
            _ => GateKind::And,
        }
    }

    fn composite_op(&self) -> CompositeOp {
        match self.mode {
            Some(Mode::Composite(op)) => op,
            _ => CompositeOp::And,
        }
    }

    fn alu_op(&self) -> AluOp {
        match self.mode {
            Some(Mode::Alu(op)) => op,
            _ => AluOp::Add,
        }
    }

    /// Outputs plus, if `explain` is set, the derived details.
    fn compute(&self, inputs: &InputSet, explain: bool) -> (Vec<bool>, Vec<Detail>) {
        let get = |name: &str| inputs.get(name);
        let mut details = Vec::new();
        let mut note = |label: &'static str, value: String| {
            if explain {
                details.push(Detail::new(label, value));
            }
        };

        let values = match self.kind {
            CircuitKind::BasicGates => vec![self.gate().apply(get("A"), get("B"))],
            CircuitKind::HalfAdder => {
                let out = half_adder(get("A"), get("B"));
                vec![out.sum, out.carry]
            }
            CircuitKind::FullAdder => {
                let out = full_adder(get("A"), get("B"), get("Cin"));
                vec![out.sum, out.carry]
            }
            CircuitKind::HalfSubtractor => {
                let out = half_subtractor(get("A"), get("B"));
                vec![out.diff, out.borrow]
            }
            CircuitKind::FullSubtractor => {
                let out = full_subtractor(get("A"), get("B"), get("Bin"));
                vec![out.diff, out.borrow]
            }
            CircuitKind::Decoder3to8 => {
                let code = [get("A2"), get("A1"), get("A0")];
                note("Input", bit_string(&code));
                note("Active", format!("Y{}", line_index(&code)));
                decode_3to8(code[0], code[1], code[2]).to_vec()
            }
            CircuitKind::Mux4to1 => {
                let data = [get("D0"), get("D1"), get("D2"), get("D3")];
                let out = mux_4to1(data, get("S1"), get("S0"));
                note("Selected", format!("D{}", out.selected));
                note("Path", format!("D{} → Y", out.selected));
                vec![out.y]
            }
            CircuitKind::PriorityEncoder => {
                let data: [bool; 8] = std::array::from_fn(|i| get(&format!("D{i}")));
                let out = priority_encode(data);
                note(
                    "Highest",
                    out.line().map_or_else(|| "none".to_string(), |i| format!("D{i}")),
                );
                note("Code", bit_string(&[out.a2, out.a1, out.a0]));
                vec![out.a2, out.a1, out.a0, out.valid]
            }
            CircuitKind::Comparator => {
                let cmp = match self.mode {
                    Some(Mode::Width(ComparatorWidth::OneBit)) => compare_bit(get("A"), get("B")),
                    _ => {
                        let (a, b) = (nibble(inputs, A_NIBBLE), nibble(inputs, B_NIBBLE));
                        note("A", describe_nibble(a));
                        note("B", describe_nibble(b));
                        compare_nibble(a, b)
                    }
                };
                note("Result", relation(cmp).to_string());
                vec![cmp.equal, cmp.greater, cmp.lesser]
            }
            CircuitKind::CompositeUnit => {
                let op = self.composite_op();
                let out = composite(op, get("A"), get("B"));
                note("Class", class(op.is_arithmetic()).to_string());
                let mut values = vec![out.result];
                values.extend(out.carry);
                values
            }
            CircuitKind::CarryLookahead => {
                let (a, b) = (nibble(inputs, A_NIBBLE), nibble(inputs, B_NIBBLE));
                let out = carry_lookahead(a, b, get("C0"));
                note("A", describe_nibble(a));
                note("B", describe_nibble(b));
                note("P", msb_first(&out.propagate));
                note("G", msb_first(&out.generate));
                note(
                    "Carries",
                    out.carries
                        .iter()
                        .enumerate()
                        .map(|(i, c)| format!("C{i}={}", u8::from(*c)))
                        .collect::<Vec<_>>()
                        .join(" "),
                );
                note("Sum", describe_nibble(out.sum_value()));
                let mut values: Vec<bool> = out.sum.iter().rev().copied().collect();
                values.push(out.carry_out());
                values
            }
            CircuitKind::Alu => {
                let op = self.alu_op();
                let (a, b) = (nibble(inputs, A_NIBBLE), nibble(inputs, B_NIBBLE));
                let out = alu(op, a, b);
                note("A", describe_nibble(a));
                if op.uses_b() {
                    note("B", describe_nibble(b));
                }
                note("Result", describe_nibble(out.result));
                note("Class", class(op.is_arithmetic()).to_string());
                let mut values: Vec<bool> = out.result.bits_lsb_first().into_iter().rev().collect();
                values.extend([out.carry, out.zero, out.overflow]);
                values
            }
        };
        (values, details)
    }
}

impl From<CircuitKind> for Circuit {
    fn from(kind: CircuitKind) -> Self {
        Self::new(kind)
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mode {
            Some(mode) => write!(f, "{} [{mode}]", self.kind.title()),
            None => f.write_str(self.kind.title()),
        }
    }
}

/// Parse a circuit name and optional mode in one go.
///
/// # Errors
///
/// Returns [`crate::Error::UnknownCircuit`] or [`crate::Error::UnknownMode`].
pub fn resolve(name: &str, mode: Option<&str>) -> Result<Circuit> {
    let kind: CircuitKind = name.parse()?;
    Circuit::with_mode(kind, mode)
}

fn signals(names: &'static [&'static str], values: &[bool]) -> Vec<Signal> {
    names
        .iter()
        .zip(values)
        .map(|(name, value)| Signal {
            name: *name,
            value: *value,
        })
        .collect()
}

fn nibble(inputs: &InputSet, names: [&str; 4]) -> Nibble {
    Nibble::from_bits(
        inputs.get(names[0]),
        inputs.get(names[1]),
        inputs.get(names[2]),
        inputs.get(names[3]),
    )
}

fn bit_string(bits: &[bool]) -> String {
    bits.iter().map(|b| if *b { '1' } else { '0' }).collect()
}

fn msb_first(bits: &[bool; 4]) -> String {
    bits.iter().rev().map(|b| if *b { '1' } else { '0' }).collect()
}

fn describe_nibble(n: Nibble) -> String {
    format!("{} ({})", n.to_binary_string(), n.value())
}

const fn relation(cmp: Comparison) -> &'static str {
    if cmp.greater {
        "A > B"
    } else if cmp.lesser {
        "A < B"
    } else {
        "A = B"
    }
}

const fn class(arithmetic: bool) -> &'static str {
    if arithmetic {
        "arithmetic"
    } else {
        "logic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn inputs(assignments: &[&str]) -> InputSet {
        InputSet::parse_assignments(assignments).unwrap()
    }

    fn eval(kind: CircuitKind, mode: Option<&str>, assignments: &[&str]) -> Evaluation {
        Circuit::with_mode(kind, mode)
            .unwrap()
            .evaluate(&inputs(assignments), true)
    }

    #[test]
    fn test_outputs_match_output_names() {
        for kind in CircuitKind::ALL {
            let mut modes: Vec<Option<Mode>> = kind.modes().into_iter().map(Some).collect();
            if modes.is_empty() {
                modes.push(None);
            }
            for mode in modes {
                let circuit = Circuit { kind, mode };
                let out = circuit.outputs(&InputSet::new());
                assert_eq!(out.len(), circuit.output_names().len(), "{circuit}");
            }
        }
    }

    #[test]
    fn test_basic_gate_modes() {
        assert_eq!(eval(CircuitKind::BasicGates, Some("NAND"), &["A=1", "B=1"]).output("Y"), Some(false));
        assert_eq!(eval(CircuitKind::BasicGates, None, &["A=1", "B=1"]).output("Y"), Some(true));
        assert_eq!(eval(CircuitKind::BasicGates, Some("xor"), &["A=1"]).output("Y"), Some(true));
    }

    #[test]
    fn test_full_adder_all_high() {
        let ev = eval(CircuitKind::FullAdder, None, &["A=1", "B=1", "Cin=1"]);
        assert_eq!(ev.output("Sum"), Some(true));
        assert_eq!(ev.output("Cout"), Some(true));
    }

    #[test]
    fn test_full_subtractor() {
        let ev = eval(CircuitKind::FullSubtractor, None, &["A=0", "B=0", "Bin=1"]);
        assert_eq!(ev.output("Diff"), Some(true));
        assert_eq!(ev.output("Bout"), Some(true));
    }

    #[test]
    fn test_decoder_details() {
        let ev = eval(CircuitKind::Decoder3to8, None, &["A2=1", "A0=1"]);
        assert_eq!(ev.output("Y5"), Some(true));
        assert_eq!(ev.outputs.iter().filter(|s| s.value).count(), 1);
        assert_eq!(ev.detail("Input"), Some("101"));
        assert_eq!(ev.detail("Active"), Some("Y5"));
    }

    #[test]
    fn test_power_off_forces_outputs_low() {
        let circuit = Circuit::new(CircuitKind::Decoder3to8);
        let ev = circuit.evaluate(&InputSet::new(), false);
        assert!(!ev.powered);
        assert!(!ev.any_output_high());
        assert_eq!(ev.detail("Power"), Some("OFF"));

        let alu = Circuit::new(CircuitKind::Alu).evaluate(&InputSet::new(), false);
        assert_eq!(alu.output("Zero"), Some(false));
    }

    #[test]
    fn test_power_ignored_without_switch() {
        let circuit = Circuit::new(CircuitKind::HalfAdder);
        let ev = circuit.evaluate(&inputs(&["A=1"]), false);
        assert!(ev.powered);
        assert_eq!(ev.output("Sum"), Some(true));
    }

    #[test]
    fn test_mux_selects_line() {
        let ev = eval(CircuitKind::Mux4to1, None, &["D2=1", "S1=1", "S0=0"]);
        assert_eq!(ev.output("Y"), Some(true));
        assert_eq!(ev.detail("Selected"), Some("D2"));
        let ev = eval(CircuitKind::Mux4to1, None, &["D2=1", "S1=1", "S0=1"]);
        assert_eq!(ev.output("Y"), Some(false));
    }

    #[test]
    fn test_priority_encoder() {
        let ev = eval(CircuitKind::PriorityEncoder, None, &["D6=1", "D3=1", "D0=1"]);
        assert_eq!(ev.output("A2"), Some(true));
        assert_eq!(ev.output("A1"), Some(true));
        assert_eq!(ev.output("A0"), Some(false));
        assert_eq!(ev.output("V"), Some(true));
        assert_eq!(ev.detail("Highest"), Some("D6"));

        let none = eval(CircuitKind::PriorityEncoder, None, &[]);
        assert_eq!(none.output("V"), Some(false));
        assert_eq!(none.detail("Highest"), Some("none"));
    }

    #[test]
    fn test_comparator_widths() {
        let one = eval(CircuitKind::Comparator, None, &["A=0", "B=1"]);
        assert_eq!(one.output("Lesser"), Some(true));
        assert_eq!(one.inputs.len(), 2);

        let four = eval(
            CircuitKind::Comparator,
            Some("4-bit"),
            &["A3=1", "A2=1", "B2=1", "B0=1"],
        );
        assert_eq!(four.output("Greater"), Some(true));
        assert_eq!(four.detail("A"), Some("1100 (12)"));
        assert_eq!(four.detail("B"), Some("0101 (5)"));
        assert_eq!(four.detail("Result"), Some("A > B"));
    }

    #[test]
    fn test_composite_output_names_follow_op() {
        let add = eval(CircuitKind::CompositeUnit, Some("ADD"), &["A=1", "B=1"]);
        assert_eq!(add.output("Sum"), Some(false));
        assert_eq!(add.output("Carry"), Some(true));
        assert_eq!(add.detail("Class"), Some("arithmetic"));

        let not = eval(CircuitKind::CompositeUnit, Some("NOT"), &["A=0", "B=1"]);
        assert_eq!(not.output("Y"), Some(true));
        assert_eq!(not.inputs.len(), 1);
    }

    #[test]
    fn test_cla() {
        let ev = eval(
            CircuitKind::CarryLookahead,
            None,
            &["A3=1", "A1=1", "B3=1", "B2=1", "C0=1"],
        );
        // 10 + 12 + 1 = 23 = 16 + 7
        assert_eq!(ev.output("C4"), Some(true));
        assert_eq!(ev.detail("Sum"), Some("0111 (7)"));
        assert_eq!(ev.detail("P"), Some("0110"));
        assert_eq!(ev.detail("G"), Some("1000"));
    }

    #[test]
    fn test_alu_sub_borrow() {
        let ev = eval(CircuitKind::Alu, Some("SUB"), &["A0=1", "B1=1"]);
        // 1 - 2 = 15 with borrow
        for r in ["R3", "R2", "R1", "R0"] {
            assert_eq!(ev.output(r), Some(true));
        }
        assert_eq!(ev.output("Carry"), Some(true));
        assert_eq!(ev.output("Zero"), Some(false));
    }

    #[test]
    fn test_alu_unary_hides_b() {
        let circuit = Circuit::with_mode(CircuitKind::Alu, Some("INC")).unwrap();
        assert_eq!(circuit.input_names(), &["A3", "A2", "A1", "A0"]);
        let ev = circuit.evaluate(&inputs(&["A3=1", "A2=1", "A1=1", "A0=1"]), true);
        assert_eq!(ev.output("Zero"), Some(true));
        assert_eq!(ev.detail("B"), None);
    }

    #[test]
    fn test_equations_present() {
        for kind in CircuitKind::ALL {
            assert!(!Circuit::new(kind).equations().is_empty(), "{kind}");
        }
        assert_eq!(
            Circuit::with_mode(CircuitKind::BasicGates, Some("NOR")).unwrap().equations(),
            vec!["Y = (A + B)'"]
        );
    }

    #[test]
    fn test_title_and_principle() {
        for kind in CircuitKind::ALL {
            let circuit = Circuit::new(kind);
            assert_eq!(circuit.title(), kind.title());
            assert!(!circuit.principle().is_empty(), "{kind}");
        }
        let mux = resolve("multiplexer", None).unwrap();
        assert!(mux.principle().contains("S1 and S0"));
        let alu = resolve("alu", Some("sub")).unwrap();
        assert!(alu.principle().contains("Overflow"));
    }

    #[test]
    fn test_resolve() {
        let circuit = resolve("alu", Some("xor")).unwrap();
        assert_eq!(circuit.mode(), Some(Mode::Alu(AluOp::Xor)));
        assert!(matches!(
            resolve("alu", Some("nand")).unwrap_err(),
            Error::UnknownMode { .. }
        ));
        assert!(matches!(
            resolve("nope", None).unwrap_err(),
            Error::UnknownCircuit { .. }
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Circuit::new(CircuitKind::HalfAdder).to_string(), "Half Adder");
        assert_eq!(
            Circuit::new(CircuitKind::Alu).to_string(),
            "4-bit Arithmetic Logic Unit (ALU) [ADD]"
        );
    }
}
