//! Pure combinational logic.
//!
//! Everything in here is a stateless function of its inputs. The circuit
//! catalog in [`crate::circuits`] maps named input sets onto these
//! functions; nothing here knows about names, power switches or storage.

pub mod alu;
pub mod arith;
pub mod cla;
pub mod comparator;
pub mod composite;
pub mod gates;
mod nibble;
pub mod select;

pub use alu::{alu, AluOp, AluOutput};
pub use arith::{full_adder, full_subtractor, half_adder, half_subtractor, AddBit, SubBit};
pub use cla::{carry_lookahead, LookaheadOutput};
pub use comparator::{compare_bit, compare_nibble, Comparison};
pub use composite::{composite, CompositeOp, CompositeOutput};
pub use gates::GateKind;
pub use nibble::Nibble;
pub use select::{decode_3to8, line_index, mux_4to1, priority_encode, EncoderOutput, MuxOutput};
