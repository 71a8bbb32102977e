//! Truth table generation and rendering.
//!
//! Most circuits get a full table: every combination of the current inputs,
//! MSB first, so row 0 is all zeros. Two circuits are special:
//!
//! - the multiplexer enumerates only its select lines, naming the data line
//!   routed to `Y` and showing that line's current level;
//! - the priority encoder is condensed to one row per highest active input,
//!   with lower-priority inputs as don't-care cells.

use std::fmt::Write as _;

use serde::Serialize;

use crate::circuits::{Circuit, CircuitKind};
use crate::format::OutputFormat;
use crate::error::{Error, Result};
use crate::inputs::InputSet;
use crate::logic::{line_index, priority_encode};

/// Default limit on enumerated inputs.
pub const DEFAULT_MAX_INPUTS: usize = 8;

/// A table cell.
///
/// Serializes as a JSON boolean, `"X"`, or the label text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// A logic level.
    Bit(bool),
    /// Matches either level.
    DontCare,
    /// Free text, such as a selected line name.
    Label(String),
}

impl Serialize for Cell {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Bit(b) => serializer.serialize_bool(*b),
            Self::DontCare => serializer.serialize_str("X"),
            Self::Label(text) => serializer.serialize_str(text),
        }
    }
}

impl Cell {
    /// Whether this cell accepts the given level.
    #[must_use]
    pub const fn matches(&self, value: bool) -> bool {
        match self {
            Self::Bit(b) => *b == value,
            Self::DontCare => true,
            Self::Label(_) => false,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bit(true) => f.write_str("1"),
            Self::Bit(false) => f.write_str("0"),
            Self::DontCare => f.write_str("X"),
            Self::Label(text) => f.write_str(text),
        }
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Input cells, in header order.
    pub inputs: Vec<Cell>,
    /// Output cells, in header order.
    pub outputs: Vec<Cell>,
}

/// A generated truth table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthTable {
    /// Circuit the table describes.
    pub circuit: CircuitKind,
    /// Input column headers.
    pub input_headers: Vec<&'static str>,
    /// Output column headers.
    pub output_headers: Vec<&'static str>,
    /// Rows, in display order.
    pub rows: Vec<Row>,
    /// Index of the row matching the inputs the table was built with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<usize>,
}

impl TruthTable {
    /// Build the table for a circuit in its current mode.
    ///
    /// `inputs` selects the highlighted row and, for the multiplexer, supplies
    /// the data line levels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableTooLarge`] when more than `max_inputs` inputs
    /// would be enumerated.
    pub fn build(circuit: &Circuit, inputs: &InputSet, max_inputs: usize) -> Result<Self> {
        let mut table = match circuit.kind() {
            CircuitKind::Mux4to1 => Self::multiplexer(inputs),
            CircuitKind::PriorityEncoder => Self::priority_encoder(),
            kind => {
                let names = circuit.input_names();
                if names.len() > max_inputs {
                    return Err(Error::TableTooLarge {
                        circuit: kind.id().to_string(),
                        inputs: names.len(),
                        max: max_inputs,
                    });
                }
                Self::enumerate(circuit)
            }
        };
        table.current = table.current_row(inputs);
        tracing::debug!(
            circuit = %circuit.kind(),
            rows = table.rows.len(),
            "Built truth table"
        );
        Ok(table)
    }

    fn enumerate(circuit: &Circuit) -> Self {
        let names = circuit.input_names();
        let width = names.len();
        let rows = (0..1usize << width)
            .map(|index| {
                let bits: Vec<bool> = (0..width)
                    .map(|i| index & (1 << (width - 1 - i)) != 0)
                    .collect();
                let row_inputs: InputSet = names
                    .iter()
                    .zip(&bits)
                    .map(|(name, bit)| ((*name).to_string(), *bit))
                    .collect();
                Row {
                    inputs: bits.into_iter().map(Cell::Bit).collect(),
                    outputs: circuit
                        .outputs(&row_inputs)
                        .into_iter()
                        .map(Cell::Bit)
                        .collect(),
                }
            })
            .collect();
        Self {
            circuit: circuit.kind(),
            input_headers: names.to_vec(),
            output_headers: circuit.output_names().to_vec(),
            rows,
            current: None,
        }
    }

    fn multiplexer(inputs: &InputSet) -> Self {
        let rows = [(false, false), (false, true), (true, false), (true, true)]
            .into_iter()
            .map(|(s1, s0)| {
                let line = format!("D{}", line_index(&[s1, s0]));
                let level = inputs.get(&line);
                Row {
                    inputs: vec![Cell::Bit(s1), Cell::Bit(s0)],
                    outputs: vec![Cell::Label(line), Cell::Bit(level)],
                }
            })
            .collect();
        Self {
            circuit: CircuitKind::Mux4to1,
            input_headers: vec!["S1", "S0"],
            output_headers: vec!["Selected", "Y"],
            rows,
            current: None,
        }
    }

    fn priority_encoder() -> Self {
        let mut rows: Vec<Row> = (0..8usize)
            .rev()
            .map(|highest| {
                // Columns run D7..D0.
                let cells = (0..8usize)
                    .rev()
                    .map(|line| match line.cmp(&highest) {
                        std::cmp::Ordering::Greater => Cell::Bit(false),
                        std::cmp::Ordering::Equal => Cell::Bit(true),
                        std::cmp::Ordering::Less => Cell::DontCare,
                    })
                    .collect();
                let mut data = [false; 8];
                data[highest] = true;
                let out = priority_encode(data);
                Row {
                    inputs: cells,
                    outputs: [out.a2, out.a1, out.a0, out.valid]
                        .into_iter()
                        .map(Cell::Bit)
                        .collect(),
                }
            })
            .collect();
        rows.push(Row {
            inputs: vec![Cell::Bit(false); 8],
            outputs: vec![Cell::Bit(false); 4],
        });
        Self {
            circuit: CircuitKind::PriorityEncoder,
            input_headers: vec!["D7", "D6", "D5", "D4", "D3", "D2", "D1", "D0"],
            output_headers: vec!["A2", "A1", "A0", "V"],
            rows,
            current: None,
        }
    }

    /// The first row whose input cells match `inputs`.
    #[must_use]
    pub fn current_row(&self, inputs: &InputSet) -> Option<usize> {
        self.rows.iter().position(|row| {
            self.input_headers
                .iter()
                .zip(&row.inputs)
                .all(|(name, cell)| cell.matches(inputs.get(name)))
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if JSON serialization fails.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Plain => Ok(self.render_plain()),
            OutputFormat::Table => Ok(self.render_table()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_plain(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "  {} | {}",
            self.input_headers.join(" "),
            self.output_headers.join(" ")
        );
        for (i, row) in self.rows.iter().enumerate() {
            let marker = if self.current == Some(i) { '>' } else { ' ' };
            let _ = writeln!(
                out,
                "{marker} {} | {}",
                join_cells(&row.inputs, &self.input_headers),
                join_cells(&row.outputs, &self.output_headers)
            );
        }
        out
    }

    fn render_table(&self) -> String {
        let headers: Vec<&str> = self
            .input_headers
            .iter()
            .chain(&self.output_headers)
            .copied()
            .collect();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.inputs.iter().chain(&row.outputs).enumerate() {
                widths[i] = widths[i].max(cell.to_string().chars().count());
            }
        }
        let split = self.input_headers.len();
        let line = |cells: Vec<String>| -> String {
            let mut text = String::from("|");
            for (i, cell) in cells.iter().enumerate() {
                if i == split {
                    text.push('|');
                }
                let _ = write!(text, " {cell:^width$} |", width = widths[i]);
            }
            text
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}", line(headers.iter().map(ToString::to_string).collect()));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", line(rule));
        for (i, row) in self.rows.iter().enumerate() {
            let cells = row
                .inputs
                .iter()
                .chain(&row.outputs)
                .map(ToString::to_string)
                .collect();
            let mark = if self.current == Some(i) { " <" } else { "" };
            let _ = writeln!(out, "{}{mark}", line(cells));
        }
        out
    }
}

/// Join cells, padding each to its header's width.
fn join_cells(cells: &[Cell], headers: &[&str]) -> String {
    cells
        .iter()
        .zip(headers)
        .map(|(cell, header)| format!("{:<width$}", cell.to_string(), width = header.len()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(kind: CircuitKind, mode: Option<&str>, assignments: &[&str]) -> Result<TruthTable> {
        let circuit = Circuit::with_mode(kind, mode).unwrap();
        let inputs = InputSet::parse_assignments(assignments).unwrap();
        TruthTable::build(&circuit, &inputs, DEFAULT_MAX_INPUTS)
    }

    fn bits(cells: &[Cell]) -> Vec<bool> {
        cells
            .iter()
            .map(|c| match c {
                Cell::Bit(b) => *b,
                other => panic!("not a bit: {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_half_adder_table() {
        let table = build(CircuitKind::HalfAdder, None, &[]).unwrap();
        assert_eq!(table.input_headers, vec!["A", "B"]);
        assert_eq!(table.output_headers, vec!["Sum", "Carry"]);
        assert_eq!(table.len(), 4);
        let outputs: Vec<Vec<bool>> = table.rows.iter().map(|r| bits(&r.outputs)).collect();
        assert_eq!(
            outputs,
            vec![
                vec![false, false],
                vec![true, false],
                vec![true, false],
                vec![false, true],
            ]
        );
    }

    #[test]
    fn test_rows_are_msb_first() {
        let table = build(CircuitKind::FullAdder, None, &[]).unwrap();
        assert_eq!(bits(&table.rows[0].inputs), vec![false, false, false]);
        assert_eq!(bits(&table.rows[1].inputs), vec![false, false, true]);
        assert_eq!(bits(&table.rows[4].inputs), vec![true, false, false]);
        assert_eq!(bits(&table.rows[7].outputs), vec![true, true]);
    }

    #[test]
    fn test_current_row() {
        let table = build(CircuitKind::FullAdder, None, &["A=1", "Cin=1"]).unwrap();
        assert_eq!(table.current, Some(5));
    }

    #[test]
    fn test_alu_has_256_rows() {
        let table = build(CircuitKind::Alu, None, &[]).unwrap();
        assert_eq!(table.len(), 256);
        let unary = build(CircuitKind::Alu, Some("NOT"), &[]).unwrap();
        assert_eq!(unary.len(), 16);
    }

    #[test]
    fn test_cla_too_large() {
        let err = build(CircuitKind::CarryLookahead, None, &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::TableTooLarge {
                inputs: 9,
                max: 8,
                ..
            }
        ));
        let circuit = Circuit::new(CircuitKind::CarryLookahead);
        let table = TruthTable::build(&circuit, &InputSet::new(), 9).unwrap();
        assert_eq!(table.len(), 512);
    }

    #[test]
    fn test_multiplexer_table() {
        let table = build(CircuitKind::Mux4to1, None, &["D2=1", "S1=1"]).unwrap();
        assert_eq!(table.input_headers, vec!["S1", "S0"]);
        assert_eq!(table.output_headers, vec!["Selected", "Y"]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.rows[2].outputs[0], Cell::Label("D2".to_string()));
        assert_eq!(table.rows[2].outputs[1], Cell::Bit(true));
        assert_eq!(table.rows[0].outputs[1], Cell::Bit(false));
        assert_eq!(table.current, Some(2));
    }

    #[test]
    fn test_priority_encoder_table() {
        let table = build(CircuitKind::PriorityEncoder, None, &[]).unwrap();
        assert_eq!(table.len(), 9);
        // D7 row: everything below is don't-care.
        assert_eq!(table.rows[0].inputs[0], Cell::Bit(true));
        assert!(table.rows[0].inputs[1..].iter().all(|c| *c == Cell::DontCare));
        assert_eq!(bits(&table.rows[0].outputs), vec![true, true, true, true]);
        // D1 row.
        assert_eq!(bits(&table.rows[6].outputs), vec![false, false, true, true]);
        assert_eq!(table.rows[6].inputs[7], Cell::DontCare);
        // All-zero row last.
        assert_eq!(bits(&table.rows[8].outputs), vec![false; 4]);
        assert_eq!(table.current, Some(8));
    }

    #[test]
    fn test_priority_encoder_current_row_uses_dont_care() {
        let table = build(CircuitKind::PriorityEncoder, None, &["D5=1", "D2=1", "D0=1"]).unwrap();
        assert_eq!(table.current, Some(2));
    }

    #[test]
    fn test_render_plain_marks_current_row() {
        let table = build(CircuitKind::HalfAdder, None, &["A=1", "B=1"]).unwrap();
        let text = table.render(OutputFormat::Plain).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  A B | Sum Carry");
        assert_eq!(lines[4], "> 1 1 | 0   1    ");
        assert!(lines[1].starts_with("  0 0"));
    }

    #[test]
    fn test_render_table() {
        let table = build(CircuitKind::Mux4to1, None, &[]).unwrap();
        let text = table.render(OutputFormat::Table).unwrap();
        assert!(text.lines().next().unwrap().contains("Selected"));
        assert!(text.contains("D3"));
        assert!(text.lines().nth(2).unwrap().ends_with(" <"));
    }

    #[test]
    fn test_render_json() {
        let table = build(CircuitKind::PriorityEncoder, None, &[]).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&table.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["circuit"], "priority-encoder");
        assert_eq!(json["rows"][0]["inputs"][1], "X");
        assert_eq!(json["rows"][0]["inputs"][0], true);
    }
}
