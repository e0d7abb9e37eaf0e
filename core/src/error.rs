use thiserror::Error;

/// Everything that can stop a Chip-8 cycle or a ROM load.
///
/// Unknown opcodes aren't errors; they execute as no-ops and show up as
/// `Outcome::Ignored`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("no ROM has been loaded")]
    NotLoaded,
    #[error("address {address:#06X} is outside of memory")]
    OutOfBounds { address: usize },
    #[error("returned from a subroutine with an empty call stack")]
    StackUnderflow,
    #[error("ROM is {size} bytes but only {capacity} bytes fit in memory")]
    RomTooLarge { size: usize, capacity: usize },
}
