use crate::constants::{FONT_START, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::Error;

// NB. addresses are taken as usize. The index register wraps at 16 bits, so it can
//     point past MEMORY_SIZE; that only faults with OutOfBounds once it is dereferenced

/// # Memory
/// Chip-8 has `MEMORY_SIZE` bytes of byte-addressable memory:
///
/// ```text
/// 0x000-0x04F  font sprite sheet
/// 0x050-0x1FF  unused (the interpreter lived here on original hardware)
/// 0x200-0xFFE  program
/// ```
///
/// Every access is bounds-checked; reaching outside memory is an `Error::OutOfBounds`
/// rather than a wrap, since it means either the program or the index register went astray.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    /// Zeroed memory with the sprite sheet in place
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: vec![0; MEMORY_SIZE].into_boxed_slice(),
        };
        memory.write_font();
        memory
    }

    /// Replace the whole image: zero-fill, write the font, then copy `rom` to `PROGRAM_START`.
    /// Nothing is touched if the ROM doesn't fit.
    pub fn load(&mut self, rom: &[u8]) -> Result<(), Error> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                capacity: MAX_ROM_SIZE,
            });
        }
        self.bytes.iter_mut().for_each(|b| *b = 0);
        self.write_font();
        self.slice_mut(PROGRAM_START as usize, rom.len())?
            .copy_from_slice(rom);
        Ok(())
    }

    fn write_font(&mut self) {
        let start = FONT_START as usize;
        self.bytes[start..start + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn read_byte(&self, addr: usize) -> Result<u8, Error> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or(Error::OutOfBounds { address: addr })
    }

    /// Opcodes are 16 bits, stored big-endian across two subsequent bytes
    pub fn read_word(&self, addr: usize) -> Result<u16, Error> {
        let word = self.slice(addr, 2)?;
        Ok(u16::from(word[0]) << 8 | u16::from(word[1]))
    }

    /// `len` bytes starting at `addr`
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8], Error> {
        let end = self.check(addr, len)?;
        Ok(&self.bytes[addr..end])
    }

    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8], Error> {
        let end = self.check(addr, len)?;
        Ok(&mut self.bytes[addr..end])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the exclusive end of the range, or the first address outside memory
    fn check(&self, addr: usize, len: usize) -> Result<usize, Error> {
        match addr.checked_add(len) {
            Some(end) if end <= self.bytes.len() => Ok(end),
            _ => Err(Error::OutOfBounds {
                address: addr.max(self.bytes.len()),
            }),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory").field("len", &self.bytes.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed_after_font() {
        let m = Memory::new();
        assert_eq!(m.len(), 0xFFF);
        assert!(m.as_slice()[SPRITE_SHEET.len()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_font_at_start() {
        let m = Memory::new();
        assert_eq!(m.slice(0, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        // glyph F
        assert_eq!(m.slice(75, 5).unwrap(), &[0xF0, 0x80, 0xF0, 0x80, 0x80]);
    }

    #[test]
    fn test_program_load_ok() -> Result<(), Error> {
        let mut m = Memory::new();
        m.load(&[0x00, 0xE0])?;
        assert_eq!(m.slice(0x200, 2)?, &[0x00, 0xE0]);
        Ok(())
    }

    #[test]
    fn test_load_replaces_previous_program() -> Result<(), Error> {
        let mut m = Memory::new();
        m.load(&[0x12, 0x34, 0x56, 0x78])?;
        m.slice_mut(0x300, 1)?[0] = 0xAA;
        m.load(&[0x00, 0xE0])?;
        assert_eq!(m.slice(0x200, 4)?, &[0x00, 0xE0, 0x00, 0x00]);
        assert_eq!(m.read_byte(0x300)?, 0);
        assert_eq!(m.read_byte(0)?, 0xF0);
        Ok(())
    }

    #[test]
    fn test_largest_rom_fits() {
        let mut m = Memory::new();
        let rom = vec![0xAB; MAX_ROM_SIZE];
        assert!(m.load(&rom).is_ok());
        assert_eq!(m.read_byte(MEMORY_SIZE - 1), Ok(0xAB));
    }

    #[test]
    fn test_rom_too_large() {
        let mut m = Memory::new();
        let rom = vec![0xAB; MAX_ROM_SIZE + 1];
        assert_eq!(
            m.load(&rom),
            Err(Error::RomTooLarge {
                size: MAX_ROM_SIZE + 1,
                capacity: MAX_ROM_SIZE
            })
        );
        assert_eq!(m.read_byte(0x200), Ok(0));
    }

    #[test]
    fn test_read_word() -> Result<(), Error> {
        let mut m = Memory::new();
        m.slice_mut(0, 8)?.copy_from_slice(&[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(m.read_word(0x4)?, 0x0405);
        Ok(())
    }

    #[test]
    fn test_read_word_straddling_end() {
        let m = Memory::new();
        assert_eq!(
            m.read_word(MEMORY_SIZE - 1),
            Err(Error::OutOfBounds {
                address: MEMORY_SIZE
            })
        );
    }

    #[test]
    fn test_read_past_end() {
        let m = Memory::new();
        assert_eq!(
            m.read_byte(0x1000),
            Err(Error::OutOfBounds { address: 0x1000 })
        );
        assert!(m.slice(usize::MAX, 2).is_err());
    }
}
