/// # Opcodes
///
/// Every instruction is one big-endian 16-bit word, read as four nibbles `c x y n`.
/// The leading nibble picks the instruction family; inside a family the trailing
/// nibble, the trailing byte, or the whole word picks the instruction.
///
/// The remaining nibbles are operands:
/// ```text
/// c x y n
///   x        register Vx, or the last register of V0..=Vx
///     y      register Vy
///       n    sprite height
///     k k    byte immediate
///   n n n    12-bit address
/// ```
pub trait Opcode {
    /// instruction family, `c___`
    fn command(&self) -> u8;
    /// `_x__`
    fn x(&self) -> u8;
    /// `__y_`
    fn y(&self) -> u8;
    /// `___n`
    fn n(&self) -> u8;
    /// `__kk`
    fn kk(&self) -> u8;
    /// `_nnn`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn command(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}

/// Every field of an opcode, extracted once before dispatch.
///
/// Decoding is total: any 16-bit word produces a `Decoded`, whether or not it
/// names a real instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub instruction: u16,
    pub command: u8,
    pub nnn: u16,
    pub kk: u8,
    pub n: u8,
    pub x: u8,
    pub y: u8,
}

impl Decoded {
    /// `(command, x, y, n)`
    pub fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.command, self.x, self.y, self.n)
    }
}

pub fn decode(instruction: u16) -> Decoded {
    Decoded {
        instruction,
        command: instruction.command(),
        nnn: instruction.nnn(),
        kk: instruction.kk(),
        n: instruction.n(),
        x: instruction.x(),
        y: instruction.y(),
    }
}

impl From<u16> for Decoded {
    fn from(instruction: u16) -> Self {
        decode(instruction)
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_operand_fields() {
        let op: u16 = 0xABCD;
        assert_eq!(
            (op.command(), op.x(), op.y(), op.n()),
            (0xA, 0xB, 0xC, 0xD)
        );
        assert_eq!(op.kk(), 0xCD);
        assert_eq!(op.nnn(), 0xBCD);
    }

    #[test]
    fn test_decode() {
        let decoded = decode(0x8123);
        assert_eq!(
            decoded,
            Decoded {
                instruction: 0x8123,
                command: 0x8,
                nnn: 0x123,
                kk: 0x23,
                n: 0x3,
                x: 0x1,
                y: 0x2,
            }
        );
        assert_eq!(decoded.nibbles(), (0x8, 0x1, 0x2, 0x3));
    }

    #[test]
    fn test_decode_extremes() {
        let decoded = Decoded::from(0xFFFF);
        assert_eq!(decoded.nibbles(), (0xF, 0xF, 0xF, 0xF));
        assert_eq!((decoded.nnn, decoded.kk), (0xFFF, 0xFF));
        assert_eq!(Decoded::from(0x0000).nibbles(), (0, 0, 0, 0));
    }
}
