use std::time::Duration;

use crate::constants::{CLOCK_SPEED, TIMER_RATE, TRACE_LENGTH};

/// What drives the delay and sound timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSource {
    /// Decrement once every `clock_speed / timer_rate` cycles
    Instructions,
    /// Decrement from the elapsed time handed to `Chip8::advance`
    WallClock,
}

/// # Config
/// Tunables for a `Chip8`.
///
/// - `clock_speed` instructions executed per second while running
/// - `timer_rate` timer decrements per second
/// - `timer_source` whether timers follow executed instructions or elapsed time
/// - `trace_length` how many executed instructions to remember (0 disables the trace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub clock_speed: u32,
    pub timer_rate: u32,
    pub timer_source: TimerSource,
    pub trace_length: usize,
}

impl Config {
    /// Number of cycles between two timer decrements, never less than one
    pub fn cycles_per_timer_tick(&self) -> u64 {
        u64::from((self.clock_speed / self.timer_rate.max(1)).max(1))
    }

    /// Time between two cycles while running
    pub fn cycle_period(&self) -> Duration {
        period(self.clock_speed)
    }

    /// Time between two wall clock timer decrements
    pub fn timer_period(&self) -> Duration {
        period(self.timer_rate)
    }
}

/// One second split `rate` ways, never shorter than a nanosecond
fn period(rate: u32) -> Duration {
    (Duration::from_secs(1) / rate.max(1)).max(Duration::from_nanos(1))
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_speed: CLOCK_SPEED,
            timer_rate: TIMER_RATE,
            timer_source: TimerSource::Instructions,
            trace_length: TRACE_LENGTH,
        }
    }
}
