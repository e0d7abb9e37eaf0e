use std::error::Error;

use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

use chip8_core::Buzzer;

const TONE_FREQUENCY: f32 = 1500.0;
const VOLUME: f32 = 0.2;
const SAMPLE_RATE: i32 = 44_100;

struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// # Tone
/// A square wave on the default SDL2 playback device, paused unless the sound timer is running.
pub struct Tone {
    device: AudioDevice<SquareWave>,
    playing: bool,
}

impl Tone {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, Box<dyn Error>> {
        let audio = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let device = audio.open_playback(None, &desired, |spec| SquareWave {
            phase_inc: TONE_FREQUENCY / spec.freq as f32,
            phase: 0.0,
            volume: VOLUME,
        })?;
        Ok(Tone {
            device,
            playing: false,
        })
    }
}

impl Buzzer for Tone {
    fn play_tone(&mut self) -> Result<(), Box<dyn Error>> {
        if !self.playing {
            self.device.resume();
            self.playing = true;
        }
        Ok(())
    }

    fn stop_tone(&mut self) -> Result<(), Box<dyn Error>> {
        if self.playing {
            self.device.pause();
            self.playing = false;
        }
        Ok(())
    }
}
