use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, PROGRAM_START, REGISTER_COUNT};
use crate::memory::Memory;
use crate::register::{self, Register, I_NAME};

/// The FrameBuffer is indexed as [y][x]; every cell is 0 (unlit) or 1 (lit)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Everything an instruction can read or write.
///
/// - `v` holds V0..VF. VF doubles as the carry, borrow and collision flag
/// - `i` is the index register used by sprite and memory instructions
/// - `stack` holds return addresses, most recent last
/// - `delay_timer` and `sound_timer` count down towards 0; a tone plays while `sound_timer > 0`
/// - `frame_buffer` is the picture as of the last `CLS` or `DRW`, and `draw_flag` says it changed
/// - while `register_needing_key` is set, fetching stops until a key press lands in that register
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [Register<u8>; REGISTER_COUNT],
    pub i: Register<u16>,
    pub pc: u16,
    pub stack: Vec<u16>,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub register_needing_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        State {
            v: register::general_purpose(),
            i: Register::new(I_NAME),
            pc: PROGRAM_START,
            stack: Vec::new(),
            delay_timer: 0,
            sound_timer: 0,
            memory: Memory::new(),
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            register_needing_key: None,
        }
    }

    /// Value of register Vx
    pub fn vx(&self, x: u8) -> u8 {
        self.v[usize::from(x & 0xF)].get()
    }

    pub fn set_vx(&mut self, x: u8, value: u8) {
        self.v[usize::from(x & 0xF)].set(value);
    }

    /// Step over the current instruction
    pub fn next(&mut self) {
        self.pc = self.pc.wrapping_add(0x2);
    }

    /// Step over the current instruction, and the one after it too if `condition` holds
    pub fn skip_if(&mut self, condition: bool) {
        let step = if condition { 0x4 } else { 0x2 };
        self.pc = self.pc.wrapping_add(step);
    }

    pub fn clear_screen(&mut self) {
        self.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.draw_flag = true;
    }

    /// Forget which registers the previous cycle wrote to
    pub fn clear_updated(&mut self) {
        self.v.iter_mut().for_each(Register::clear_updated);
        self.i.clear_updated();
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
