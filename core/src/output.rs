use std::error::Error;

use crate::state::FrameBuffer;

/// Screen is used by the host to show the frame buffer. It should abstract the
/// implementation details, so a variety of kinds of screen would work.
pub trait Screen {
    /// Draw a whole frame; pixel `[y][x] == 1` is lit
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), Box<dyn Error>>;
}

/// Makes the tone that plays while the sound timer is running
pub trait Buzzer {
    fn play_tone(&mut self) -> Result<(), Box<dyn Error>>;
    fn stop_tone(&mut self) -> Result<(), Box<dyn Error>>;
}

/// A Buzzer that stays quiet, for headless runs and tests
#[derive(Debug, Default)]
pub struct Mute {
    playing: bool,
}

impl Mute {
    pub fn new() -> Self {
        Mute { playing: false }
    }

    /// Whether a tone would be playing right now
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl Buzzer for Mute {
    fn play_tone(&mut self) -> Result<(), Box<dyn Error>> {
        self.playing = true;
        Ok(())
    }

    fn stop_tone(&mut self) -> Result<(), Box<dyn Error>> {
        self.playing = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_tracks_tone() -> Result<(), Box<dyn Error>> {
        let mut mute = Mute::new();
        assert!(!mute.is_playing());
        mute.play_tone()?;
        assert!(mute.is_playing());
        mute.stop_tone()?;
        assert!(!mute.is_playing());
        Ok(())
    }
}
