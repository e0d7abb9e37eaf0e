use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use log::{debug, trace};

use crate::config::{Config, TimerSource};
use crate::constants::TRACE_LENGTH;
use crate::disasm;
use crate::error::Error;
use crate::instruction;
use crate::keyboard::{logical_key, Keyboard, Keypad};
use crate::memory::Memory;
use crate::opcode::{decode, Decoded};
use crate::register::Register;
use crate::rom::Rom;
use crate::state::{FrameBuffer, State};

/// Where the fetch-execute loop is at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Nothing to run yet
    Unloaded,
    /// Loaded and steppable, but the host loop isn't running
    Ready,
    /// The host loop is running cycles through `advance`
    Running,
    /// Fetching is suspended until a key press lands in `register`
    HaltedOnKey { register: u8 },
}

/// One executed instruction and where it was fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    pub address: u16,
    pub op: Decoded,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&disasm::line(self.address, &self.op))
    }
}

/// What a single `cycle` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Executed(TraceEntry),
    /// The word at pc wasn't an instruction; it was skipped
    Ignored(TraceEntry),
    /// Still waiting on a key press; nothing was fetched
    Waiting,
    /// The awaited key arrived and was stored in `register`
    Resumed { register: u8, key: u8 },
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `keyboard` it reads key presses from
///  - the loaded `rom`, so it can be reset
///  - a bounded `trace` of executed instructions
///
/// Supplies interfaces for:
/// - loading and resetting roms
/// - single-stepping (`cycle`) and running at the configured clock speed (`run`, `advance`, `stop`)
/// - advancing its timers
/// - inspecting registers and the frame buffer for presentation
///
/// All reads for presentation happen between cycles; nothing here is shared across threads.
pub struct Chip8<K: Keyboard = Keypad> {
    state: State,
    keyboard: K,
    config: Config,
    rom: Option<Rom>,
    running: bool,
    instruction_count: u64,
    cycle_debt: Duration,
    timer_debt: Duration,
    trace: VecDeque<TraceEntry>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_keyboard(Keypad::new(), config)
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the logical key (0x0..0xF) that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.keyboard.key_press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the logical key (0x0..0xF) that was released
    pub fn key_release(&mut self, key: u8) {
        self.keyboard.key_release(key);
    }
}

impl<K: Keyboard> Chip8<K> {
    pub fn with_keyboard(keyboard: K, config: Config) -> Self {
        Chip8 {
            state: State::new(),
            keyboard,
            config,
            rom: None,
            running: false,
            instruction_count: 0,
            cycle_debt: Duration::from_secs(0),
            timer_debt: Duration::from_secs(0),
            trace: VecDeque::with_capacity(config.trace_length.min(TRACE_LENGTH)),
        }
    }

    /// Load a rom, replacing all existing state
    ///
    /// Registers, stack, timers and the frame buffer are cleared and the pc returns to
    /// `PROGRAM_START`. Leaves the machine `Ready` whatever it was doing before.
    pub fn load(&mut self, rom: Rom) -> Result<(), Error> {
        let mut state = State::new();
        state.memory.load(&rom.data)?;
        debug!("loaded '{}' ({} bytes)", rom.name, rom.len());

        self.state = state;
        self.state.draw_flag = true;
        self.rom = Some(rom);
        self.running = false;
        self.instruction_count = 0;
        self.cycle_debt = Duration::from_secs(0);
        self.timer_debt = Duration::from_secs(0);
        self.trace.clear();
        // a press made before loading must not satisfy the program's first key wait
        self.keyboard.take_next_press();
        Ok(())
    }

    /// Load the current rom again
    pub fn reset(&mut self) -> Result<(), Error> {
        let rom = self.rom.take().ok_or(Error::NotLoaded)?;
        self.load(rom)
    }

    pub fn status(&self) -> Status {
        match (&self.rom, self.state.register_needing_key, self.running) {
            (None, ..) => Status::Unloaded,
            (Some(_), Some(register), _) => Status::HaltedOnKey { register },
            (Some(_), None, true) => Status::Running,
            (Some(_), None, false) => Status::Ready,
        }
    }

    /// Let `advance` run cycles until `stop`
    pub fn run(&mut self) -> Result<(), Error> {
        if self.rom.is_none() {
            return Err(Error::NotLoaded);
        }
        if !self.running {
            debug!("running at {} Hz", self.config.clock_speed);
        }
        self.running = true;
        Ok(())
    }

    /// Stop `advance` from running cycles. The current cycle, if any, has already finished.
    pub fn stop(&mut self) {
        if self.running {
            debug!("stopped after {} cycles", self.instruction_count);
        }
        self.running = false;
        self.cycle_debt = Duration::from_secs(0);
        self.timer_debt = Duration::from_secs(0);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run however many cycles (and, on the wall clock, timer ticks) fit in `elapsed`.
    ///
    /// Does nothing unless running. A failing cycle stops the machine and is returned.
    /// Returns the number of cycles run.
    pub fn advance(&mut self, elapsed: Duration) -> Result<usize, Error> {
        if self.rom.is_none() {
            return Err(Error::NotLoaded);
        }
        if !self.running {
            return Ok(0);
        }

        if self.config.timer_source == TimerSource::WallClock {
            let period = self.config.timer_period();
            self.timer_debt += elapsed;
            while self.timer_debt >= period {
                self.timer_debt -= period;
                self.tick_timers();
            }
        }

        let period = self.config.cycle_period();
        self.cycle_debt += elapsed;
        let mut executed = 0;
        while self.cycle_debt >= period {
            self.cycle_debt -= period;
            if let Err(e) = self.cycle() {
                self.stop();
                return Err(e);
            }
            executed += 1;
        }
        Ok(executed)
    }

    /// Advances the CPU by a single cycle
    /// - waits (without fetching) while a key press is awaited
    /// - otherwise fetches, decodes and executes the next opcode
    /// - counts the cycle towards the timers
    pub fn cycle(&mut self) -> Result<Outcome, Error> {
        if self.rom.is_none() {
            return Err(Error::NotLoaded);
        }

        let outcome = match self.state.register_needing_key {
            Some(register) => match self.keyboard.take_next_press() {
                Some(key) => {
                    self.state.clear_updated();
                    self.state.set_vx(register, logical_key(key));
                    self.state.register_needing_key = None;
                    self.state.next();
                    debug!("V{:X} received key {:X}", register, key);
                    Outcome::Resumed { register, key }
                }
                None => Outcome::Waiting,
            },
            None => self.execute()?,
        };

        self.instruction_count += 1;
        if self.config.timer_source == TimerSource::Instructions
            && self.instruction_count % self.config.cycles_per_timer_tick() == 0
        {
            self.tick_timers();
        }
        Ok(outcome)
    }

    fn execute(&mut self) -> Result<Outcome, Error> {
        let address = self.state.pc;
        let op = decode(self.get_op()?);
        let entry = TraceEntry { address, op };
        trace!("{}", entry);

        // a failing handler writes nothing, so only the updated flags need restoring
        let (v, i) = (self.state.v, self.state.i);
        self.state.clear_updated();
        if let Err(e) = instruction::from_op(&op)(&op, &mut self.state, &self.keyboard) {
            self.state.v = v;
            self.state.i = i;
            return Err(e);
        }
        self.record(entry);

        if let Some(register) = self.state.register_needing_key {
            // only presses made from now on count
            self.keyboard.take_next_press();
            debug!("waiting for a key press for V{:X}", register);
        }

        if instruction::is_known(&op) {
            Ok(Outcome::Executed(entry))
        } else {
            Ok(Outcome::Ignored(entry))
        }
    }

    fn record(&mut self, entry: TraceEntry) {
        if self.config.trace_length == 0 {
            return;
        }
        if self.trace.len() == self.config.trace_length {
            self.trace.pop_front();
        }
        self.trace.push_back(entry);
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<u16, Error> {
        self.state.memory.read_word(usize::from(self.state.pc))
    }

    /// Counts both timers down by one, stopping at zero
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Whether a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Returns the FrameBuffer if it changed since it was last taken
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn registers(&self) -> &[Register<u8>] {
        &self.state.v
    }

    pub fn index_register(&self) -> &Register<u16> {
        &self.state.i
    }

    pub fn program_counter(&self) -> u16 {
        self.state.pc
    }

    pub fn stack(&self) -> &[u16] {
        &self.state.stack
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn rom(&self) -> Option<&Rom> {
        self.rom.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Cycles run since the rom was loaded, including ones spent waiting on a key
    pub fn instruction_count(&self) -> u64 {
        self.instruction_count
    }

    /// The most recently executed instructions, oldest first
    pub fn trace(&self) -> impl Iterator<Item = &TraceEntry> {
        self.trace.iter()
    }

    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
