use crate::constants::PROGRAM_START;
use crate::opcode::{decode, Decoded};

/// `0x`-prefixed upper-case hex, zero-padded to at least `width` digits
pub fn format_hex(value: u32, width: usize) -> String {
    format!("0x{:0width$X}", value, width = width)
}

/// Human readable assembly for one instruction, in the usual Cowgod syntax.
/// Words that aren't instructions come out as `DW` (define word).
pub fn mnemonic(op: &Decoded) -> String {
    let (x, y, n, kk, nnn) = (op.x, op.y, op.n, op.kk, op.nnn);
    match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => "CLS".to_string(),
        (0x0, 0x0, 0xE, 0xE) => "RET".to_string(),
        (0x0, ..) => format!("SYS {:#05X}", nnn),
        (0x1, ..) => format!("JP {:#05X}", nnn),
        (0x2, ..) => format!("CALL {:#05X}", nnn),
        (0x3, ..) => format!("SE V{:X}, {:#04X}", x, kk),
        (0x4, ..) => format!("SNE V{:X}, {:#04X}", x, kk),
        (0x5, .., 0x0) => format!("SE V{:X}, V{:X}", x, y),
        (0x6, ..) => format!("LD V{:X}, {:#04X}", x, kk),
        (0x7, ..) => format!("ADD V{:X}, {:#04X}", x, kk),
        (0x8, .., 0x0) => format!("LD V{:X}, V{:X}", x, y),
        (0x8, .., 0x1) => format!("OR V{:X}, V{:X}", x, y),
        (0x8, .., 0x2) => format!("AND V{:X}, V{:X}", x, y),
        (0x8, .., 0x3) => format!("XOR V{:X}, V{:X}", x, y),
        (0x8, .., 0x4) => format!("ADD V{:X}, V{:X}", x, y),
        (0x8, .., 0x5) => format!("SUB V{:X}, V{:X}", x, y),
        (0x8, .., 0x6) => format!("SHR V{:X}, V{:X}", x, y),
        (0x8, .., 0x7) => format!("SUBN V{:X}, V{:X}", x, y),
        (0x8, .., 0xE) => format!("SHL V{:X}, V{:X}", x, y),
        (0x9, .., 0x0) => format!("SNE V{:X}, V{:X}", x, y),
        (0xA, ..) => format!("LD I, {:#05X}", nnn),
        (0xB, ..) => format!("JP V0, {:#05X}", nnn),
        (0xC, ..) => format!("RND V{:X}, {:#04X}", x, kk),
        (0xD, ..) => format!("DRW V{:X}, V{:X}, {}", x, y, n),
        (0xE, .., 0x9, 0xE) => format!("SKP V{:X}", x),
        (0xE, .., 0xA, 0x1) => format!("SKNP V{:X}", x),
        (0xF, .., 0x0, 0x7) => format!("LD V{:X}, DT", x),
        (0xF, .., 0x0, 0xA) => format!("LD V{:X}, K", x),
        (0xF, .., 0x1, 0x5) => format!("LD DT, V{:X}", x),
        (0xF, .., 0x1, 0x8) => format!("LD ST, V{:X}", x),
        (0xF, .., 0x1, 0xE) => format!("ADD I, V{:X}", x),
        (0xF, .., 0x2, 0x9) => format!("LD F, V{:X}", x),
        (0xF, .., 0x3, 0x3) => format!("LD B, V{:X}", x),
        (0xF, .., 0x5, 0x5) => format!("LD [I], V{:X}", x),
        (0xF, .., 0x6, 0x5) => format!("LD V{:X}, [I]", x),
        _ => format!("DW {}", format_hex(u32::from(op.instruction), 4)),
    }
}

/// One listing line: `address  opcode  mnemonic`
pub fn line(address: u16, op: &Decoded) -> String {
    format!(
        "{}  {}  {}",
        format_hex(u32::from(address), 4),
        format_hex(u32::from(op.instruction), 4),
        mnemonic(op)
    )
}

/// Lists every word of a ROM as if it were loaded at `PROGRAM_START`.
/// A trailing odd byte can't form an opcode and is left out.
pub fn disassemble(rom: &[u8]) -> Vec<String> {
    rom.chunks_exact(2)
        .enumerate()
        .map(|(i, word)| {
            let address = PROGRAM_START.wrapping_add((2 * i) as u16);
            let op = decode(u16::from(word[0]) << 8 | u16::from(word[1]));
            line(address, &op)
        })
        .collect()
}
