use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};

use chip8_core::constants::TRACE_LENGTH;
use chip8_core::{disasm, Chip8, Config, Rom, TimerSource, CLOCK_SPEED, TIMER_RATE};

mod buzzer;
mod keymap;
mod run;

/// A Chip-8 emulator.
///
/// Keys 1234/QWER/ASDF/ZXCV are the keypad. Space runs or pauses, Tab steps while
/// paused, F5 resets and Escape quits.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(help = "Path to the ROM file to run")]
    rom: PathBuf,

    #[arg(long, default_value_t = CLOCK_SPEED, help = "Instructions per second")]
    clock_speed: u32,

    #[arg(long, default_value_t = TIMER_RATE, help = "Timer decrements per second")]
    timer_rate: u32,

    #[arg(long, help = "Count timers down by elapsed time instead of executed instructions")]
    wall_clock: bool,

    #[arg(long, default_value_t = 10, help = "Window pixels per Chip-8 pixel")]
    scale: u32,

    #[arg(long, default_value_t = TRACE_LENGTH, help = "Executed instructions to remember")]
    trace_length: usize,

    #[arg(long, help = "Start paused")]
    paused: bool,

    #[arg(long, help = "Print a disassembly of the ROM and exit")]
    disassemble: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            clock_speed: self.clock_speed,
            timer_rate: self.timer_rate,
            timer_source: if self.wall_clock {
                TimerSource::WallClock
            } else {
                TimerSource::Instructions
            },
            trace_length: self.trace_length,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("chip8", LevelFilter::Info)
        .filter_module("chip8_core", LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let rom = Rom::from_path(&args.rom)
        .with_context(|| format!("unable to read ROM {}", args.rom.display()))?;

    if args.disassemble {
        for line in disasm::disassemble(&rom.data) {
            println!("{}", line);
        }
        return Ok(());
    }

    let mut chip8 = Chip8::with_config(args.config());
    let (name, size) = (rom.name.clone(), rom.len());
    chip8
        .load(rom)
        .with_context(|| format!("unable to load ROM {}", args.rom.display()))?;
    info!(
        "successfully loaded {} ({} bytes) at {} Hz",
        name,
        size,
        chip8.config().clock_speed
    );

    run::run(chip8, args.scale, args.paused)
}
