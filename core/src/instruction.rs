use crate::error::Error;
use crate::keyboard::Keyboard;
use crate::opcode::Decoded;
use crate::operations::*;
use crate::state::State;

/// An operation applies one decoded instruction to the state
pub type Operation = fn(op: &Decoded, state: &mut State, keys: &dyn Keyboard) -> Result<(), Error>;

/// Selects the correct Operation for a decoded Opcode.
///
/// Every one of the 65536 opcodes lands somewhere: gaps in a family fall
/// through to `unknown` rather than into the next family.
pub fn from_op(op: &Decoded) -> Operation {
    lookup(op).unwrap_or(unknown)
}

/// The Operation an opcode names, if it names one
pub fn lookup(op: &Decoded) -> Option<Operation> {
    let operation: Operation = match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => clr,
        (0x0, 0x0, 0xE, 0xE) => rts,
        (0x0, ..) => sys,
        (0x1, ..) => jump,
        (0x2, ..) => call,
        (0x3, ..) => ske,
        (0x4, ..) => skne,
        (0x5, .., 0x0) => skre,
        (0x6, ..) => load,
        (0x7, ..) => add,
        (0x8, .., 0x0) => mv,
        (0x8, .., 0x1) => or,
        (0x8, .., 0x2) => and,
        (0x8, .., 0x3) => xor,
        (0x8, .., 0x4) => addr,
        (0x8, .., 0x5) => sub,
        (0x8, .., 0x6) => shr,
        (0x8, .., 0x7) => subn,
        (0x8, .., 0xE) => shl,
        (0x9, .., 0x0) => skrne,
        (0xA, ..) => loadi,
        (0xB, ..) => jumpi,
        (0xC, ..) => rand,
        (0xD, ..) => draw,
        (0xE, .., 0x9, 0xE) => skpr,
        (0xE, .., 0xA, 0x1) => skup,
        (0xF, .., 0x0, 0x7) => moved,
        (0xF, .., 0x0, 0xA) => keyd,
        (0xF, .., 0x1, 0x5) => loads,
        (0xF, .., 0x1, 0x8) => ld,
        (0xF, .., 0x1, 0xE) => addi,
        (0xF, .., 0x2, 0x9) => ldspr,
        (0xF, .., 0x3, 0x3) => bcd,
        (0xF, .., 0x5, 0x5) => stor,
        (0xF, .., 0x6, 0x5) => read,
        _ => return None,
    };
    Some(operation)
}

/// Whether an opcode names a real instruction
pub fn is_known(op: &Decoded) -> bool {
    lookup(op).is_some()
}
