use std::time::{Duration, Instant};

use anyhow::anyhow;
use log::{error, info, warn};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

use chip8_core::disasm::format_hex;
use chip8_core::{Buzzer, Chip8, Keyboard, Mute, Outcome, Screen, Status};
use chip8_display::Display;

use crate::buzzer::Tone;
use crate::keymap::keymap;

/// Roughly one 60 Hz frame
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// How many trace lines to show when the program faults
const FAULT_TRACE_LINES: usize = 16;

pub fn run(mut chip8: Chip8, scale: u32, paused: bool) -> anyhow::Result<()> {
    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl, &title(&chip8), scale)
        .map_err(|e| anyhow!("unable to open display: {}", e))?;
    let mut buzzer: Box<dyn Buzzer> = match Tone::new(&sdl) {
        Ok(tone) => Box::new(tone),
        Err(e) => {
            warn!("no audio, continuing without sound: {}", e);
            Box::new(Mute::new())
        }
    };
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    if !paused {
        chip8.run()?;
    }
    let mut status = chip8.status();
    let mut last_frame: Instant = Instant::now();

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat,
                    ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Escape, _) => break 'event,
                    (Keycode::Space, _) if !repeat => toggle(&mut chip8)?,
                    (Keycode::Tab, _) => step(&mut chip8),
                    (Keycode::F5, _) if !repeat => reset(&mut chip8)?,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_release(kc);
                    }
                }
                // key ups go elsewhere once focus is lost
                Event::Window {
                    win_event: WindowEvent::FocusLost,
                    ..
                } => chip8.keyboard_mut().release_all(),
                _ => continue,
            };
        }

        // Update state
        let current_time = Instant::now();
        if let Err(e) = chip8.advance(current_time - last_frame) {
            error!("stopped: {}", e);
            log_trace(&chip8);
        }
        last_frame = current_time;

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display
                .render(frame)
                .map_err(|e| anyhow!("unable to render frame: {}", e))?;
        }

        let sound = if chip8.sound_active() {
            buzzer.play_tone()
        } else {
            buzzer.stop_tone()
        };
        if let Err(e) = sound {
            warn!("unable to drive the buzzer: {}", e);
        }

        if chip8.status() != status {
            status = chip8.status();
            display
                .set_title(&title(&chip8))
                .map_err(|e| anyhow!("unable to set title: {}", e))?;
        }

        // Handle timing
        let elapsed = Instant::now() - current_time;
        if FRAME_TIME > elapsed {
            std::thread::sleep(FRAME_TIME - elapsed);
        }
    }

    info!("quit after {} cycles", chip8.instruction_count());
    Ok(())
}

fn title(chip8: &Chip8) -> String {
    let name = chip8.rom().map(|rom| rom.name.as_str()).unwrap_or("-");
    let status = match chip8.status() {
        Status::Unloaded => "empty".to_string(),
        Status::Ready => "paused".to_string(),
        Status::Running => "running".to_string(),
        Status::HaltedOnKey { register } => format!("waiting for key into V{:X}", register),
    };
    format!("Chip-8 - {} [{}]", name, status)
}

fn toggle(chip8: &mut Chip8) -> anyhow::Result<()> {
    if chip8.is_running() {
        chip8.stop();
        info!("paused at {}", format_hex(u32::from(chip8.program_counter()), 4));
    } else {
        chip8.run()?;
        info!("running");
    }
    Ok(())
}

fn reset(chip8: &mut Chip8) -> anyhow::Result<()> {
    let was_running = chip8.is_running();
    chip8.reset()?;
    if was_running {
        chip8.run()?;
    }
    info!("reset");
    Ok(())
}

/// Single-step while paused, showing what changed
fn step(chip8: &mut Chip8) {
    if chip8.is_running() {
        return;
    }
    match chip8.cycle() {
        Ok(outcome) => {
            match outcome {
                Outcome::Executed(entry) => info!("{}", entry),
                Outcome::Ignored(entry) => info!("{}  (skipped)", entry),
                Outcome::Waiting => info!("waiting for a key press"),
                Outcome::Resumed { register, key } => info!("V{:X} <- key {:X}", register, key),
            }
            log_registers(chip8);
        }
        Err(e) => {
            error!("{}", e);
            log_trace(chip8);
        }
    }
}

/// Registers changed by the last cycle are marked with `*`
fn log_registers(chip8: &Chip8) {
    let mut fields: Vec<String> = chip8
        .registers()
        .iter()
        .map(|r| {
            let mark = if r.updated() { "*" } else { "" };
            format!("{}{}={}", r.name(), mark, format_hex(u32::from(r.get()), 2))
        })
        .collect();
    let i = chip8.index_register();
    let mark = if i.updated() { "*" } else { "" };
    fields.push(format!("{}{}={}", i.name(), mark, format_hex(u32::from(i.get()), 4)));
    info!("{}", fields.join(" "));
    info!(
        "PC={} DT={} ST={} keys={:X?} stack=[{}]",
        format_hex(u32::from(chip8.program_counter()), 4),
        chip8.delay_timer(),
        chip8.sound_timer(),
        chip8.keyboard().keys_down(),
        chip8
            .stack()
            .iter()
            .map(|&address| format_hex(u32::from(address), 4))
            .collect::<Vec<_>>()
            .join(", ")
    );
}

fn log_trace(chip8: &Chip8) {
    let entries: Vec<_> = chip8.trace().collect();
    let start = entries.len().saturating_sub(FAULT_TRACE_LINES);
    for entry in &entries[start..] {
        info!("  {}", entry);
    }
}
