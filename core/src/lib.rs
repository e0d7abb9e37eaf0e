pub use chip8::{Chip8, Outcome, Status, TraceEntry};
pub use config::{Config, TimerSource};
pub use constants::{CLOCK_SPEED, TIMER_RATE};
pub use error::Error;
pub use keyboard::{Keyboard, Keypad, KEYPAD_LAYOUT};
pub use output::{Buzzer, Mute, Screen};
pub use rom::Rom;
pub use state::FrameBuffer;

mod chip8;
pub mod config;
pub mod constants;
pub mod disasm;
mod error;
mod instruction;
pub mod keyboard;
pub mod memory;
pub mod opcode;
mod operations;
pub mod output;
pub mod register;
mod rom;
pub mod state;
